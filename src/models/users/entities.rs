use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    /// 用户角色标签
    UserRole, "用户角色", "../frontend/src/types/generated/user.ts" {
        Employee => "employee",
        HrEvaluator => "hr_evaluators",
        Admin => "admin",
    }
}

impl UserRole {
    pub fn admin_roles() -> &'static [UserRole] {
        &[UserRole::Admin]
    }
}

string_enum! {
    /// 用户状态
    UserStatus, "用户状态", "../frontend/src/types/generated/user.ts" {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password_hash: String,
    pub roles: Vec<UserRole>,
    pub status: UserStatus,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.contains(&role)
    }

    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        roles.iter().any(|r| self.has_role(*r))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }

    /// "名 姓"，缺失时退回用户名
    pub fn full_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            self.username.clone()
        } else {
            parts.join(" ")
        }
    }

    fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.to_string()).collect()
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, jsonwebtoken::errors::Error> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.email,
            &self.role_names(),
            refresh_token_expiry,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(roles: Vec<UserRole>) -> User {
        User {
            id: 7,
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            password_hash: String::new(),
            roles,
            status: UserStatus::Active,
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_role_roundtrip_strings() {
        assert_eq!("hr_evaluators".parse::<UserRole>(), Ok(UserRole::HrEvaluator));
        assert_eq!(UserRole::Employee.to_string(), "employee");
        assert!("manager".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_deserialize_error_lists_choices() {
        let err = serde_json::from_str::<UserRole>("\"boss\"").unwrap_err();
        assert!(err.to_string().contains("employee, hr_evaluators, admin"));
    }

    #[test]
    fn test_has_role() {
        let user = sample_user(vec![UserRole::Employee, UserRole::HrEvaluator]);
        assert!(user.has_role(UserRole::HrEvaluator));
        assert!(!user.is_admin());
        assert!(user.has_any_role(&[UserRole::Admin, UserRole::Employee]));
    }

    #[test]
    fn test_full_name_fallback() {
        let mut user = sample_user(vec![]);
        assert_eq!(user.full_name(), "John Doe");
        user.first_name = None;
        user.last_name = None;
        assert_eq!(user.full_name(), "jdoe");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let mut user = sample_user(vec![UserRole::Admin]);
        user.password_hash = "secret".to_string();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("\"roles\":[\"admin\"]"));
    }
}

//! 用户实体

use sea_orm::entity::prelude::*;

use crate::models::users::entities::{User, UserRole, UserStatus};
use crate::utils::date::ts_to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    /// JSON 数组，如 `["employee","admin"]`
    pub roles: String,
    pub status: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project_members::Entity")]
    ProjectMembers,
}

impl Related<super::project_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 角色列表序列化为存储格式
pub fn encode_roles(roles: &[UserRole]) -> String {
    serde_json::to_string(roles).unwrap_or_else(|_| "[]".to_string())
}

/// 解析存储的角色列表，忽略无法识别的标签
pub fn decode_roles(raw: &str) -> Vec<UserRole> {
    serde_json::from_str::<Vec<String>>(raw)
        .unwrap_or_default()
        .iter()
        .filter_map(|r| r.parse::<UserRole>().ok())
        .collect()
}

impl Model {
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            roles: decode_roles(&self.roles),
            status: self
                .status
                .parse::<UserStatus>()
                .unwrap_or(UserStatus::Active),
            first_name: self.first_name,
            last_name: self.last_name,
            last_login: self.last_login.map(ts_to_datetime),
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_column_format() {
        let raw = encode_roles(&[UserRole::Employee, UserRole::HrEvaluator]);
        assert_eq!(raw, r#"["employee","hr_evaluators"]"#);
        assert_eq!(
            decode_roles(r#"["admin","unknown","employee"]"#),
            vec![UserRole::Admin, UserRole::Employee]
        );
        assert!(decode_roles("not json").is_empty());
    }
}

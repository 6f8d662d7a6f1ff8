use super::SeaOrmStorage;
use crate::entity::project_roles::{ActiveModel, Column, Entity as ProjectRoles};
use crate::errors::{BackofficeError, Result};
use crate::models::project_roles::{CreateProjectRoleRequest, ProjectRole};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn list_project_roles_impl(&self) -> Result<Vec<ProjectRole>> {
        let roles = ProjectRoles::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询项目角色失败: {e}")))?;

        Ok(roles.into_iter().map(|m| m.into_project_role()).collect())
    }

    pub async fn get_project_role_impl(&self, id: i64) -> Result<Option<ProjectRole>> {
        let role = ProjectRoles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询项目角色失败: {e}")))?;

        Ok(role.map(|m| m.into_project_role()))
    }

    pub async fn create_project_role_impl(
        &self,
        req: CreateProjectRoleRequest,
    ) -> Result<ProjectRole> {
        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            short_name: Set(req.short_name.trim().to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("创建项目角色失败: {e}")))?;

        Ok(result.into_project_role())
    }
}

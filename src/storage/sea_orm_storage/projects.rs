use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{project_members, projects};
use crate::errors::{BackofficeError, Result};
use crate::models::{
    Paginated,
    projects::{
        entities::{Project, ProjectMember, ProjectStatus},
        requests::{
            CreateProjectMemberRequest, CreateProjectRequest, ProjectListQuery,
            UpdateProjectMemberRequest, UpdateProjectRequest, check_date_order,
        },
    },
};
use crate::utils::date::{date_to_ts, ts_to_date};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 分页列出项目
    pub async fn list_projects_impl(&self, query: ProjectListQuery) -> Result<Paginated<Project>> {
        let mut select = Projects::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(projects::Column::Name.contains(&escaped))
                    .add(projects::Column::ClientName.contains(&escaped)),
            );
        }

        if let Some(status) = query.status {
            select = select.filter(projects::Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(projects::Column::CreatedAt);

        self.fetch_paginated(select, query.page, query.size, "项目", |m| m.into_project())
            .await
    }

    pub async fn get_project_by_id_impl(&self, id: i64) -> Result<Option<Project>> {
        let project = Projects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询项目失败: {e}")))?;
        Ok(project.map(|m| m.into_project()))
    }

    /// 按名称查找（用于唯一性检查）
    pub async fn get_project_by_name_impl(&self, name: &str) -> Result<Option<Project>> {
        let project = Projects::find()
            .filter(projects::Column::Name.eq(name.trim()))
            .one(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询项目失败: {e}")))?;
        Ok(project.map(|m| m.into_project()))
    }

    pub async fn create_project_impl(&self, req: CreateProjectRequest) -> Result<Project> {
        let now = chrono::Utc::now().timestamp();
        let model = ProjectActiveModel {
            name: Set(req.name.trim().to_string()),
            client_name: Set(req.client_name),
            status: Set(req.status.unwrap_or(ProjectStatus::Active).to_string()),
            start_date: Set(date_to_ts(req.start_date)),
            end_date: Set(req.end_date.map(date_to_ts)),
            remarks: Set(req.remarks),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("创建项目失败: {e}")))?;
        Ok(result.into_project())
    }

    pub async fn update_project_impl(
        &self,
        id: i64,
        update: UpdateProjectRequest,
    ) -> Result<Option<Project>> {
        let Some(existing) = Projects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询项目失败: {e}")))?
        else {
            return Ok(None);
        };

        // 合并后再校验日期顺序
        let start = update
            .start_date
            .unwrap_or_else(|| ts_to_date(existing.start_date));
        let end = update.end_date.or(existing.end_date.map(ts_to_date));
        check_date_order(start, end)?;

        let mut model: ProjectActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(client_name) = update.client_name {
            model.client_name = Set(Some(client_name));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(remarks) = update.remarks {
            model.remarks = Set(Some(remarks));
        }
        model.start_date = Set(date_to_ts(start));
        model.end_date = Set(end.map(date_to_ts));
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("更新项目失败: {e}")))?;
        Ok(Some(result.into_project()))
    }

    /// 删除项目及其成员
    pub async fn delete_project_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        ProjectMembers::delete_many()
            .filter(project_members::Column::ProjectId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("删除项目成员失败: {e}")))?;

        let result = Projects::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("删除项目失败: {e}")))?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn list_project_members_impl(&self, project_id: i64) -> Result<Vec<ProjectMember>> {
        let members = ProjectMembers::find()
            .filter(project_members::Column::ProjectId.eq(project_id))
            .order_by_asc(project_members::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询项目成员失败: {e}")))?;
        Ok(members
            .into_iter()
            .map(|m| m.into_project_member())
            .collect())
    }

    pub async fn get_project_member_impl(&self, member_id: i64) -> Result<Option<ProjectMember>> {
        let member = ProjectMembers::find_by_id(member_id)
            .one(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询项目成员失败: {e}")))?;
        Ok(member.map(|m| m.into_project_member()))
    }

    pub async fn create_project_member_impl(
        &self,
        project_id: i64,
        req: CreateProjectMemberRequest,
    ) -> Result<ProjectMember> {
        let now = chrono::Utc::now().timestamp();
        let model = ProjectMemberActiveModel {
            project_id: Set(project_id),
            employee_id: Set(req.employee_id),
            project_role_id: Set(req.project_role_id),
            start_date: Set(date_to_ts(req.start_date)),
            end_date: Set(date_to_ts(req.end_date)),
            allocation_rate: Set(req.allocation_rate),
            remarks: Set(req.remarks),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("添加项目成员失败: {e}")))?;
        Ok(result.into_project_member())
    }

    pub async fn update_project_member_impl(
        &self,
        member_id: i64,
        update: UpdateProjectMemberRequest,
    ) -> Result<Option<ProjectMember>> {
        let Some(existing) = ProjectMembers::find_by_id(member_id)
            .one(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询项目成员失败: {e}")))?
        else {
            return Ok(None);
        };

        let start = update
            .start_date
            .unwrap_or_else(|| ts_to_date(existing.start_date));
        let end = update
            .end_date
            .unwrap_or_else(|| ts_to_date(existing.end_date));
        check_date_order(start, Some(end))?;

        let mut model: ProjectMemberActiveModel = existing.into();
        if let Some(role_id) = update.project_role_id {
            model.project_role_id = Set(role_id);
        }
        if let Some(rate) = update.allocation_rate {
            model.allocation_rate = Set(rate);
        }
        if let Some(remarks) = update.remarks {
            model.remarks = Set(Some(remarks));
        }
        model.start_date = Set(date_to_ts(start));
        model.end_date = Set(date_to_ts(end));
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("更新项目成员失败: {e}")))?;
        Ok(Some(result.into_project_member()))
    }

    pub async fn delete_project_member_impl(&self, member_id: i64) -> Result<bool> {
        let result = ProjectMembers::delete_by_id(member_id)
            .exec(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("删除项目成员失败: {e}")))?;
        Ok(result.rows_affected > 0)
    }
}

//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod aggregation;
mod answers;
mod evaluation_administrations;
mod evaluation_generation;
mod evaluation_results;
mod evaluation_templates;
mod evaluations;
mod project_roles;
mod projects;
mod users;

use crate::config::AppConfig;
use crate::errors::{BackofficeError, Result};
use crate::models::Paginated;
use dashmap::DashMap;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait, Select,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::info;
use ts_rs::TS;

type ResultLocks = Arc<DashMap<i64, Arc<Mutex<()>>>>;

/// 评估结果锁守卫
pub(crate) struct ResultLockGuard {
    result_id: i64,
    locks: ResultLocks,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for ResultLockGuard {
    fn drop(&mut self) {
        self.guard.take();
        // 仅剩表内引用时说明没有持有者或等待者
        self.locks
            .remove_if(&self.result_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
    /// 按结果 ID 串行化“统计剩余评估 → 汇总”
    pub(crate) result_locks: ResultLocks,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self::from_connection(db))
    }

    /// 使用已有连接（不执行迁移）
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self {
            db,
            result_locks: Arc::new(DashMap::new()),
        }
    }

    /// 连接并执行迁移，用于测试或嵌入式场景
    pub async fn connect_and_migrate(url: &str) -> Result<Self> {
        let mut opt = ConnectOptions::new(url);
        opt.sqlx_logging(false);
        // 内存数据库每个连接独立，只能保留一个连接
        if url.contains(":memory:") {
            opt.max_connections(1).min_connections(1);
        }
        let db = Database::connect(opt)
            .await
            .map_err(|e| BackofficeError::database_connection(format!("无法连接到数据库: {e}")))?;
        Migrator::up(&db, None)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("数据库迁移失败: {e}")))?;
        Ok(Self::from_connection(db))
    }

    /// 锁定某个评估结果，守卫释放后清理无人使用的锁
    pub(crate) async fn lock_result(&self, result_id: i64) -> ResultLockGuard {
        let lock = self
            .result_locks
            .entry(result_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = lock.lock_owned().await;
        ResultLockGuard {
            result_id,
            locks: Arc::clone(&self.result_locks),
            guard: Some(guard),
        }
    }

    /// 分页查询并转换为业务实体
    pub(crate) async fn fetch_paginated<E, T, F>(
        &self,
        select: Select<E>,
        page: u64,
        size: u64,
        label: &str,
        map: F,
    ) -> Result<Paginated<T>>
    where
        E: EntityTrait,
        E::Model: Send + Sync,
        T: TS,
        F: Fn(E::Model) -> T,
    {
        let page = page.max(1);
        let paginator = select.paginate(&self.db, size.max(1));
        let total = paginator.num_items().await.map_err(|e| {
            BackofficeError::database_operation(format!("查询{label}总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            BackofficeError::database_operation(format!("查询{label}页数失败: {e}"))
        })?;
        let items = paginator.fetch_page(page - 1).await.map_err(|e| {
            BackofficeError::database_operation(format!("查询{label}列表失败: {e}"))
        })?;

        Ok(Paginated {
            data: items.into_iter().map(map).collect(),
            page_info: crate::models::PageInfo::new(page, total, pages),
        })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| BackofficeError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| BackofficeError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| BackofficeError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(BackofficeError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    answers::{
        Answer, AnswerOption, CreateAnswerOptionRequest, CreateAnswerRequest,
        UpdateAnswerOptionRequest,
    },
    evaluation_administrations::{
        entities::EvaluationAdministration,
        requests::{
            AdministrationListQuery, CreateAdministrationRequest, UpdateAdministrationRequest,
        },
        responses::GenerateEvaluationsResponse,
    },
    evaluation_results::{
        entities::EvaluationResult, requests::ResultListQuery, responses::ResultDetailResponse,
    },
    evaluation_templates::{
        entities::{EvaluationTemplate, EvaluationTemplateContent},
        requests::{
            CreateTemplateContentRequest, CreateTemplateRequest, TemplateListQuery,
            UpdateTemplateRequest,
        },
        responses::TemplateDetailResponse,
    },
    evaluations::{
        entities::{Evaluation, EvaluationRating},
        requests::{EvaluationListQuery, SubmitAnswerRequest},
        responses::EvaluationDetailResponse,
    },
    project_roles::{CreateProjectRoleRequest, ProjectRole},
    projects::{
        entities::{Project, ProjectMember},
        requests::{
            CreateProjectMemberRequest, CreateProjectRequest, ProjectListQuery,
            UpdateProjectMemberRequest, UpdateProjectRequest,
        },
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<Paginated<User>> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn list_project_roles(&self) -> Result<Vec<ProjectRole>> {
        self.list_project_roles_impl().await
    }

    async fn get_project_role(&self, id: i64) -> Result<Option<ProjectRole>> {
        self.get_project_role_impl(id).await
    }

    async fn create_project_role(&self, req: CreateProjectRoleRequest) -> Result<ProjectRole> {
        self.create_project_role_impl(req).await
    }

    async fn list_projects(&self, query: ProjectListQuery) -> Result<Paginated<Project>> {
        self.list_projects_impl(query).await
    }

    async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>> {
        self.get_project_by_id_impl(id).await
    }

    async fn get_project_by_name(&self, name: &str) -> Result<Option<Project>> {
        self.get_project_by_name_impl(name).await
    }

    async fn create_project(&self, req: CreateProjectRequest) -> Result<Project> {
        self.create_project_impl(req).await
    }

    async fn update_project(
        &self,
        id: i64,
        update: UpdateProjectRequest,
    ) -> Result<Option<Project>> {
        self.update_project_impl(id, update).await
    }

    async fn delete_project(&self, id: i64) -> Result<bool> {
        self.delete_project_impl(id).await
    }

    async fn list_project_members(&self, project_id: i64) -> Result<Vec<ProjectMember>> {
        self.list_project_members_impl(project_id).await
    }

    async fn get_project_member(&self, member_id: i64) -> Result<Option<ProjectMember>> {
        self.get_project_member_impl(member_id).await
    }

    async fn create_project_member(
        &self,
        project_id: i64,
        req: CreateProjectMemberRequest,
    ) -> Result<ProjectMember> {
        self.create_project_member_impl(project_id, req).await
    }

    async fn update_project_member(
        &self,
        member_id: i64,
        update: UpdateProjectMemberRequest,
    ) -> Result<Option<ProjectMember>> {
        self.update_project_member_impl(member_id, update).await
    }

    async fn delete_project_member(&self, member_id: i64) -> Result<bool> {
        self.delete_project_member_impl(member_id).await
    }

    async fn list_answers(&self) -> Result<Vec<Answer>> {
        self.list_answers_impl().await
    }

    async fn get_answer(&self, id: i64) -> Result<Option<Answer>> {
        self.get_answer_impl(id).await
    }

    async fn create_answer(&self, req: CreateAnswerRequest) -> Result<Answer> {
        self.create_answer_impl(req).await
    }

    async fn list_answer_options(&self, answer_id: i64) -> Result<Vec<AnswerOption>> {
        self.list_answer_options_impl(answer_id).await
    }

    async fn get_answer_option(&self, id: i64) -> Result<Option<AnswerOption>> {
        self.get_answer_option_impl(id).await
    }

    async fn create_answer_option(
        &self,
        answer_id: i64,
        req: CreateAnswerOptionRequest,
    ) -> Result<AnswerOption> {
        self.create_answer_option_impl(answer_id, req).await
    }

    async fn update_answer_option(
        &self,
        id: i64,
        update: UpdateAnswerOptionRequest,
    ) -> Result<Option<AnswerOption>> {
        self.update_answer_option_impl(id, update).await
    }

    async fn delete_answer_option(&self, id: i64) -> Result<bool> {
        self.delete_answer_option_impl(id).await
    }

    async fn list_templates(
        &self,
        query: TemplateListQuery,
    ) -> Result<Paginated<EvaluationTemplate>> {
        self.list_templates_impl(query).await
    }

    async fn get_template(&self, id: i64) -> Result<Option<TemplateDetailResponse>> {
        self.get_template_impl(id).await
    }

    async fn create_template(&self, req: CreateTemplateRequest) -> Result<TemplateDetailResponse> {
        self.create_template_impl(req).await
    }

    async fn update_template(
        &self,
        id: i64,
        update: UpdateTemplateRequest,
    ) -> Result<Option<EvaluationTemplate>> {
        self.update_template_impl(id, update).await
    }

    async fn delete_template(&self, id: i64) -> Result<bool> {
        self.delete_template_impl(id).await
    }

    async fn add_template_content(
        &self,
        template_id: i64,
        req: CreateTemplateContentRequest,
    ) -> Result<EvaluationTemplateContent> {
        self.add_template_content_impl(template_id, req).await
    }

    async fn delete_template_content(&self, template_id: i64, content_id: i64) -> Result<bool> {
        self.delete_template_content_impl(template_id, content_id).await
    }

    async fn list_administrations(
        &self,
        query: AdministrationListQuery,
    ) -> Result<Paginated<EvaluationAdministration>> {
        self.list_administrations_impl(query).await
    }

    async fn get_administration(&self, id: i64) -> Result<Option<EvaluationAdministration>> {
        self.get_administration_impl(id).await
    }

    async fn create_administration(
        &self,
        created_by: i64,
        req: CreateAdministrationRequest,
    ) -> Result<EvaluationAdministration> {
        self.create_administration_impl(created_by, req).await
    }

    async fn update_administration(
        &self,
        id: i64,
        update: UpdateAdministrationRequest,
    ) -> Result<EvaluationAdministration> {
        self.update_administration_impl(id, update).await
    }

    async fn delete_administration(&self, id: i64) -> Result<()> {
        self.delete_administration_impl(id).await
    }

    async fn publish_administration(&self, id: i64) -> Result<EvaluationAdministration> {
        self.publish_administration_impl(id).await
    }

    async fn close_administration(&self, id: i64) -> Result<EvaluationAdministration> {
        self.close_administration_impl(id).await
    }

    async fn cancel_administration(&self, id: i64) -> Result<EvaluationAdministration> {
        self.cancel_administration_impl(id).await
    }

    async fn generate_evaluations(
        &self,
        administration_id: i64,
        employee_ids: Vec<i64>,
        hr_template_evaluee_role_id: i64,
    ) -> Result<GenerateEvaluationsResponse> {
        self.generate_evaluations_impl(administration_id, employee_ids, hr_template_evaluee_role_id)
            .await
    }

    async fn list_results(
        &self,
        administration_id: i64,
        query: ResultListQuery,
    ) -> Result<Paginated<EvaluationResult>> {
        self.list_results_impl(administration_id, query).await
    }

    async fn get_result_detail(&self, id: i64) -> Result<Option<ResultDetailResponse>> {
        self.get_result_detail_impl(id).await
    }

    async fn delete_result(&self, id: i64) -> Result<bool> {
        self.delete_result_impl(id).await
    }

    async fn aggregate_result(&self, id: i64) -> Result<EvaluationResult> {
        self.aggregate_result_impl(id).await
    }

    async fn list_evaluations(&self, query: EvaluationListQuery) -> Result<Paginated<Evaluation>> {
        self.list_evaluations_impl(query).await
    }

    async fn get_evaluation(&self, id: i64) -> Result<Option<Evaluation>> {
        self.get_evaluation_impl(id).await
    }

    async fn get_evaluation_detail(&self, id: i64) -> Result<Option<EvaluationDetailResponse>> {
        self.get_evaluation_detail_impl(id).await
    }

    async fn submit_answer(
        &self,
        evaluation_id: i64,
        actor_id: i64,
        req: SubmitAnswerRequest,
    ) -> Result<EvaluationRating> {
        self.submit_answer_impl(evaluation_id, actor_id, req).await
    }

    async fn submit_comment(
        &self,
        evaluation_id: i64,
        actor_id: i64,
        comment: String,
    ) -> Result<Evaluation> {
        self.submit_comment_impl(evaluation_id, actor_id, comment).await
    }

    async fn submit_evaluation(&self, evaluation_id: i64, actor_id: i64) -> Result<Evaluation> {
        self.submit_evaluation_impl(evaluation_id, actor_id).await
    }

    async fn set_for_evaluation(
        &self,
        evaluation_id: i64,
        for_evaluation: bool,
    ) -> Result<Evaluation> {
        self.set_for_evaluation_impl(evaluation_id, for_evaluation).await
    }

    async fn approve_evaluation(&self, evaluation_id: i64) -> Result<Evaluation> {
        self.approve_evaluation_impl(evaluation_id).await
    }

    async fn decline_evaluation(&self, evaluation_id: i64) -> Result<Evaluation> {
        self.decline_evaluation_impl(evaluation_id).await
    }

    async fn delete_evaluation(&self, evaluation_id: i64) -> Result<bool> {
        self.delete_evaluation_impl(evaluation_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_storage() -> SeaOrmStorage {
        SeaOrmStorage::connect_and_migrate("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_result_lock_released_after_use() {
        let storage = memory_storage().await;

        let guard = storage.lock_result(7).await;
        assert_eq!(storage.result_locks.len(), 1);
        drop(guard);
        assert!(storage.result_locks.is_empty());

        for id in 1..=5 {
            let _guard = storage.lock_result(id).await;
        }
        assert!(storage.result_locks.is_empty());
    }

    #[tokio::test]
    async fn test_result_lock_kept_while_waiting() {
        let storage = memory_storage().await;

        let guard = storage.lock_result(3).await;
        let waiter = {
            let storage = storage.clone();
            tokio::spawn(async move {
                let _guard = storage.lock_result(3).await;
            })
        };
        // 等待者拿到 Arc 后再释放
        while Arc::strong_count(&storage.result_locks.get(&3).unwrap()) < 3 {
            tokio::task::yield_now().await;
        }
        drop(guard);
        assert_eq!(storage.result_locks.len(), 1);

        waiter.await.unwrap();
        assert!(storage.result_locks.is_empty());
    }
}

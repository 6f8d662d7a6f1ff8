use std::sync::Arc;

use crate::models::{
    Paginated,
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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<Paginated<User>>;
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;

    /// 项目角色
    async fn list_project_roles(&self) -> Result<Vec<ProjectRole>>;
    async fn get_project_role(&self, id: i64) -> Result<Option<ProjectRole>>;
    async fn create_project_role(&self, req: CreateProjectRoleRequest) -> Result<ProjectRole>;

    /// 项目与成员
    async fn list_projects(&self, query: ProjectListQuery) -> Result<Paginated<Project>>;
    async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>>;
    async fn get_project_by_name(&self, name: &str) -> Result<Option<Project>>;
    async fn create_project(&self, req: CreateProjectRequest) -> Result<Project>;
    async fn update_project(&self, id: i64, update: UpdateProjectRequest)
    -> Result<Option<Project>>;
    async fn delete_project(&self, id: i64) -> Result<bool>;
    async fn list_project_members(&self, project_id: i64) -> Result<Vec<ProjectMember>>;
    async fn get_project_member(&self, member_id: i64) -> Result<Option<ProjectMember>>;
    async fn create_project_member(
        &self,
        project_id: i64,
        req: CreateProjectMemberRequest,
    ) -> Result<ProjectMember>;
    async fn update_project_member(
        &self,
        member_id: i64,
        update: UpdateProjectMemberRequest,
    ) -> Result<Option<ProjectMember>>;
    async fn delete_project_member(&self, member_id: i64) -> Result<bool>;

    /// 答案量表与选项
    async fn list_answers(&self) -> Result<Vec<Answer>>;
    async fn get_answer(&self, id: i64) -> Result<Option<Answer>>;
    async fn create_answer(&self, req: CreateAnswerRequest) -> Result<Answer>;
    async fn list_answer_options(&self, answer_id: i64) -> Result<Vec<AnswerOption>>;
    async fn get_answer_option(&self, id: i64) -> Result<Option<AnswerOption>>;
    async fn create_answer_option(
        &self,
        answer_id: i64,
        req: CreateAnswerOptionRequest,
    ) -> Result<AnswerOption>;
    async fn update_answer_option(
        &self,
        id: i64,
        update: UpdateAnswerOptionRequest,
    ) -> Result<Option<AnswerOption>>;
    async fn delete_answer_option(&self, id: i64) -> Result<bool>;

    /// 评估模板与评分项
    async fn list_templates(&self, query: TemplateListQuery)
    -> Result<Paginated<EvaluationTemplate>>;
    async fn get_template(&self, id: i64) -> Result<Option<TemplateDetailResponse>>;
    async fn create_template(&self, req: CreateTemplateRequest) -> Result<TemplateDetailResponse>;
    async fn update_template(
        &self,
        id: i64,
        update: UpdateTemplateRequest,
    ) -> Result<Option<EvaluationTemplate>>;
    async fn delete_template(&self, id: i64) -> Result<bool>;
    async fn add_template_content(
        &self,
        template_id: i64,
        req: CreateTemplateContentRequest,
    ) -> Result<EvaluationTemplateContent>;
    async fn delete_template_content(&self, template_id: i64, content_id: i64) -> Result<bool>;

    /// 评估周期
    async fn list_administrations(
        &self,
        query: AdministrationListQuery,
    ) -> Result<Paginated<EvaluationAdministration>>;
    async fn get_administration(&self, id: i64) -> Result<Option<EvaluationAdministration>>;
    async fn create_administration(
        &self,
        created_by: i64,
        req: CreateAdministrationRequest,
    ) -> Result<EvaluationAdministration>;
    async fn update_administration(
        &self,
        id: i64,
        update: UpdateAdministrationRequest,
    ) -> Result<EvaluationAdministration>;
    async fn delete_administration(&self, id: i64) -> Result<()>;
    async fn publish_administration(&self, id: i64) -> Result<EvaluationAdministration>;
    async fn close_administration(&self, id: i64) -> Result<EvaluationAdministration>;
    async fn cancel_administration(&self, id: i64) -> Result<EvaluationAdministration>;
    // 为一批被评估者生成评估（单事务）
    async fn generate_evaluations(
        &self,
        administration_id: i64,
        employee_ids: Vec<i64>,
        hr_template_evaluee_role_id: i64,
    ) -> Result<GenerateEvaluationsResponse>;

    /// 评估结果
    async fn list_results(
        &self,
        administration_id: i64,
        query: ResultListQuery,
    ) -> Result<Paginated<EvaluationResult>>;
    async fn get_result_detail(&self, id: i64) -> Result<Option<ResultDetailResponse>>;
    async fn delete_result(&self, id: i64) -> Result<bool>;
    async fn aggregate_result(&self, id: i64) -> Result<EvaluationResult>;

    /// 评估任务
    async fn list_evaluations(&self, query: EvaluationListQuery) -> Result<Paginated<Evaluation>>;
    async fn get_evaluation(&self, id: i64) -> Result<Option<Evaluation>>;
    async fn get_evaluation_detail(&self, id: i64) -> Result<Option<EvaluationDetailResponse>>;
    async fn submit_answer(
        &self,
        evaluation_id: i64,
        actor_id: i64,
        req: SubmitAnswerRequest,
    ) -> Result<EvaluationRating>;
    async fn submit_comment(
        &self,
        evaluation_id: i64,
        actor_id: i64,
        comment: String,
    ) -> Result<Evaluation>;
    async fn submit_evaluation(&self, evaluation_id: i64, actor_id: i64) -> Result<Evaluation>;
    async fn set_for_evaluation(&self, evaluation_id: i64, for_evaluation: bool)
    -> Result<Evaluation>;
    async fn approve_evaluation(&self, evaluation_id: i64) -> Result<Evaluation>;
    async fn decline_evaluation(&self, evaluation_id: i64) -> Result<Evaluation>;
    async fn delete_evaluation(&self, evaluation_id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

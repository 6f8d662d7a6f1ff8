//! 评估流程集成测试：生成 → 选择 → 发布 → 作答提交 → 汇总

use chrono::NaiveDate;

use kh_backoffice::errors::BackofficeError;
use kh_backoffice::models::answers::{CreateAnswerOptionRequest, CreateAnswerRequest};
use kh_backoffice::models::evaluation_administrations::entities::AdministrationStatus;
use kh_backoffice::models::evaluation_administrations::requests::CreateAdministrationRequest;
use kh_backoffice::models::evaluation_results::entities::ResultStatus;
use kh_backoffice::models::evaluation_results::requests::ResultListQuery;
use kh_backoffice::models::evaluation_templates::requests::{
    CreateTemplateContentRequest, CreateTemplateRequest,
};
use kh_backoffice::models::evaluations::entities::{Evaluation, EvaluationStatus};
use kh_backoffice::models::evaluations::requests::{EvaluationListQuery, SubmitAnswerRequest};
use kh_backoffice::models::project_roles::CreateProjectRoleRequest;
use kh_backoffice::models::projects::requests::{CreateProjectMemberRequest, CreateProjectRequest};
use kh_backoffice::models::users::entities::UserRole;
use kh_backoffice::models::users::requests::CreateUserRequest;
use kh_backoffice::storage::Storage;
use kh_backoffice::storage::sea_orm_storage::SeaOrmStorage;
use kh_backoffice::utils::date::{days_in_year_of, today};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn criterion(name: &str, rate: f64) -> CreateTemplateContentRequest {
    CreateTemplateContentRequest {
        name: name.to_string(),
        description: None,
        rate,
        sequence_no: 0,
        is_active: true,
    }
}

struct Fixture {
    storage: SeaOrmStorage,
    developer_id: i64,
    lead_id: i64,
    hr_id: i64,
    hr_role_id: i64,
    good_option_id: i64,
    excellent_option_id: i64,
    administration_id: i64,
}

async fn create_user(storage: &SeaOrmStorage, name: &str, roles: Vec<UserRole>) -> i64 {
    storage
        .create_user(CreateUserRequest {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password: "hashed".to_string(),
            roles,
            first_name: None,
            last_name: None,
        })
        .await
        .unwrap()
        .id
}

/// 一个 Developer（1/10–1/20，参与度 80）与一个 Lead（1/5–1/25）同在一个项目，
/// 另有一名 HR 评估者；周期为 2024 年 1 月。
async fn setup() -> Fixture {
    let storage = SeaOrmStorage::connect_and_migrate("sqlite::memory:")
        .await
        .unwrap();

    let role = |name: &str, short: &str| CreateProjectRoleRequest {
        name: name.to_string(),
        short_name: short.to_string(),
    };
    let developer_role = storage
        .create_project_role(role("Developer", "DEV"))
        .await
        .unwrap();
    let lead_role = storage
        .create_project_role(role("Lead", "LEAD"))
        .await
        .unwrap();
    let hr_role = storage
        .create_project_role(role("Human Resources", "HR"))
        .await
        .unwrap();

    let answer = storage
        .create_answer(CreateAnswerRequest {
            name: "Five point scale".to_string(),
            description: None,
        })
        .await
        .unwrap();
    let option = |name: &str, rate: f64, seq: i32| CreateAnswerOptionRequest {
        name: name.to_string(),
        display_name: name.to_string(),
        rate,
        sequence_no: seq,
        description: None,
    };
    let good = storage
        .create_answer_option(answer.id, option("Good", 4.0, 4))
        .await
        .unwrap();
    let excellent = storage
        .create_answer_option(answer.id, option("Excellent", 5.0, 5))
        .await
        .unwrap();

    storage
        .create_template(CreateTemplateRequest {
            name: "developer-by-lead".to_string(),
            display_name: "Developer evaluated by Lead".to_string(),
            evaluee_role_id: developer_role.id,
            evaluator_role_id: lead_role.id,
            rate: 0.5,
            answer_id: answer.id,
            description: None,
            is_active: true,
            contents: vec![criterion("Quality", 50.0), criterion("Delivery", 50.0)],
        })
        .await
        .unwrap();
    storage
        .create_template(CreateTemplateRequest {
            name: "hr".to_string(),
            display_name: "HR evaluation".to_string(),
            evaluee_role_id: hr_role.id,
            evaluator_role_id: hr_role.id,
            rate: 0.5,
            answer_id: answer.id,
            description: None,
            is_active: true,
            contents: vec![criterion("Attitude", 100.0)],
        })
        .await
        .unwrap();

    let developer_id = create_user(&storage, "dev", vec![UserRole::Employee]).await;
    let lead_id = create_user(&storage, "lead", vec![UserRole::Employee]).await;
    let hr_id = create_user(
        &storage,
        "hr",
        vec![UserRole::Employee, UserRole::HrEvaluator],
    )
    .await;

    let project = storage
        .create_project(CreateProjectRequest {
            name: "Project P".to_string(),
            client_name: None,
            status: None,
            start_date: date(1, 1),
            end_date: None,
            remarks: None,
        })
        .await
        .unwrap();
    storage
        .create_project_member(
            project.id,
            CreateProjectMemberRequest {
                employee_id: developer_id,
                project_role_id: developer_role.id,
                start_date: date(1, 10),
                end_date: date(1, 20),
                allocation_rate: 80.0,
                remarks: None,
            },
        )
        .await
        .unwrap();
    storage
        .create_project_member(
            project.id,
            CreateProjectMemberRequest {
                employee_id: lead_id,
                project_role_id: lead_role.id,
                start_date: date(1, 5),
                end_date: date(1, 25),
                allocation_rate: 100.0,
                remarks: None,
            },
        )
        .await
        .unwrap();

    let administration = storage
        .create_administration(
            lead_id,
            CreateAdministrationRequest {
                name: "2024 January".to_string(),
                eval_period_start_date: date(1, 1),
                eval_period_end_date: date(1, 31),
                eval_schedule_start_date: date(2, 1),
                eval_schedule_end_date: date(2, 15),
                remarks: None,
            },
        )
        .await
        .unwrap();

    Fixture {
        storage,
        developer_id,
        lead_id,
        hr_id,
        hr_role_id: hr_role.id,
        good_option_id: good.id,
        excellent_option_id: excellent.id,
        administration_id: administration.id,
    }
}

impl Fixture {
    async fn generate(&self) -> kh_backoffice::errors::Result<()> {
        self.storage
            .generate_evaluations(
                self.administration_id,
                vec![self.developer_id],
                self.hr_role_id,
            )
            .await
            .map(|_| ())
    }

    async fn result_id(&self) -> i64 {
        let results = self
            .storage
            .list_results(
                self.administration_id,
                ResultListQuery {
                    page: 1,
                    size: 20,
                    status: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(results.data.len(), 1);
        results.data[0].id
    }

    async fn evaluations(&self) -> Vec<Evaluation> {
        self.storage
            .list_evaluations(EvaluationListQuery {
                page: 1,
                size: 50,
                evaluator_id: None,
                evaluation_result_id: None,
                evaluation_administration_id: Some(self.administration_id),
                status: None,
            })
            .await
            .unwrap()
            .data
    }

    async fn peer_and_hr(&self) -> (Evaluation, Evaluation) {
        let evaluations = self.evaluations().await;
        let peer = evaluations
            .iter()
            .find(|e| e.evaluator_id == self.lead_id)
            .cloned()
            .unwrap();
        let hr = evaluations
            .iter()
            .find(|e| e.evaluator_id == self.hr_id)
            .cloned()
            .unwrap();
        (peer, hr)
    }

    /// 选择参与的评估并发布周期
    async fn select_and_publish(&self, with_peer: bool, with_hr: bool) -> (Evaluation, Evaluation) {
        let (peer, hr) = self.peer_and_hr().await;
        self.storage
            .set_for_evaluation(peer.id, with_peer)
            .await
            .unwrap();
        self.storage.set_for_evaluation(hr.id, with_hr).await.unwrap();
        let administration = self
            .storage
            .publish_administration(self.administration_id)
            .await
            .unwrap();
        assert_eq!(administration.status, AdministrationStatus::Ongoing);
        (peer, hr)
    }

    /// 生成后只保留同事评估，发布周期
    async fn publish_with_peer_only(&self) -> (Evaluation, Evaluation) {
        self.generate().await.unwrap();
        self.select_and_publish(true, false).await
    }

    /// 生成并发布同事评估与 HR 评估
    async fn publish_with_peer_and_hr(&self) -> (Evaluation, Evaluation) {
        self.generate().await.unwrap();
        self.select_and_publish(true, true).await
    }

    /// 评估者为每个评分条目选择同一个选项
    async fn answer_all(&self, evaluation_id: i64, evaluator_id: i64, option_id: i64) {
        let detail = self
            .storage
            .get_evaluation_detail(evaluation_id)
            .await
            .unwrap()
            .unwrap();
        for rating in detail.ratings {
            self.storage
                .submit_answer(
                    evaluation_id,
                    evaluator_id,
                    SubmitAnswerRequest {
                        evaluation_rating_id: rating.id,
                        answer_option_id: option_id,
                    },
                )
                .await
                .unwrap();
        }
    }
}

#[tokio::test]
async fn test_generation_plans_peer_and_hr_evaluations() {
    let fx = setup().await;

    let response = fx
        .storage
        .generate_evaluations(fx.administration_id, vec![fx.developer_id], fx.hr_role_id)
        .await
        .unwrap();
    assert_eq!(response.administration.status, AdministrationStatus::Pending);
    assert_eq!(response.summary.results_created, 1);
    assert_eq!(response.summary.details_created, 2);
    assert_eq!(response.summary.evaluations_created, 1);
    assert_eq!(response.summary.hr_evaluations_created, 1);

    let (peer, hr) = fx.peer_and_hr().await;
    assert_eq!(peer.evaluee_id, fx.developer_id);
    assert_eq!(peer.percent_involvement, 80.0);
    assert_eq!(peer.eval_start_date, date(1, 10));
    assert_eq!(peer.eval_end_date, date(1, 20));
    assert_eq!(peer.status, EvaluationStatus::Draft);
    assert!(!peer.for_evaluation);

    assert_eq!(hr.project_id, None);
    assert_eq!(hr.percent_involvement, 100.0);
    assert_eq!(hr.eval_start_date, date(1, 1));
    assert_eq!(hr.eval_end_date, date(1, 31));

    let detail = fx
        .storage
        .get_result_detail(fx.result_id().await)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.result.status, ResultStatus::ForReview);
    assert_eq!(detail.details.len(), 2);
    assert!(detail.details.iter().all(|d| d.weight == 0.5));
}

#[tokio::test]
async fn test_regeneration_does_not_duplicate() {
    let fx = setup().await;
    fx.generate().await.unwrap();

    let again = fx
        .storage
        .generate_evaluations(
            fx.administration_id,
            vec![fx.developer_id, fx.developer_id],
            fx.hr_role_id,
        )
        .await
        .unwrap();
    assert_eq!(again.summary.results_created, 0);
    assert_eq!(again.summary.details_created, 0);
    assert_eq!(again.summary.evaluations_created, 0);
    assert_eq!(again.summary.hr_evaluations_created, 0);
    assert_eq!(fx.evaluations().await.len(), 2);
}

#[tokio::test]
async fn test_generation_input_errors() {
    let fx = setup().await;

    let empty = fx
        .storage
        .generate_evaluations(fx.administration_id, vec![], fx.hr_role_id)
        .await;
    assert!(matches!(empty, Err(BackofficeError::Validation(_))));

    let unknown = fx
        .storage
        .generate_evaluations(fx.administration_id, vec![9999], fx.hr_role_id)
        .await;
    assert!(matches!(unknown, Err(BackofficeError::NotFound(_))));

    // 失败的生成不留下任何数据
    assert!(fx.evaluations().await.is_empty());
}

#[tokio::test]
async fn test_submit_and_aggregate() {
    let fx = setup().await;
    let (peer, hr) = fx.publish_with_peer_only().await;

    let hr = fx.storage.get_evaluation(hr.id).await.unwrap().unwrap();
    assert_eq!(hr.status, EvaluationStatus::Excluded);

    let detail = fx
        .storage
        .get_evaluation_detail(peer.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.evaluation.status, EvaluationStatus::Open);
    assert_eq!(detail.ratings.len(), 2);
    assert_eq!(detail.answer_options.len(), 2);

    // 非评估者不能作答
    let denied = fx
        .storage
        .submit_answer(
            peer.id,
            fx.hr_id,
            SubmitAnswerRequest {
                evaluation_rating_id: detail.ratings[0].id,
                answer_option_id: fx.good_option_id,
            },
        )
        .await;
    assert!(matches!(denied, Err(BackofficeError::Authorization(_))));

    // 未作答完毕不能提交
    let incomplete = fx.storage.submit_evaluation(peer.id, fx.lead_id).await;
    assert!(matches!(incomplete, Err(BackofficeError::Validation(_))));

    for (rating, option_id) in detail
        .ratings
        .iter()
        .zip([fx.good_option_id, fx.excellent_option_id])
    {
        let saved = fx
            .storage
            .submit_answer(
                peer.id,
                fx.lead_id,
                SubmitAnswerRequest {
                    evaluation_rating_id: rating.id,
                    answer_option_id: option_id,
                },
            )
            .await
            .unwrap();
        assert_eq!(saved.score, Some(saved.rate.unwrap() * 50.0));
    }

    let submitted = fx
        .storage
        .submit_evaluation(peer.id, fx.lead_id)
        .await
        .unwrap();
    assert_eq!(submitted.status, EvaluationStatus::Submitted);
    assert_eq!(submitted.score, Some(4.5));

    let expected_weight = 10.0 / days_in_year_of(today()) as f64 * 80.0;
    let weight = submitted.weight.unwrap();
    assert!((weight - expected_weight).abs() < 1e-9);
    assert!((submitted.weighted_score.unwrap() - weight * 4.5).abs() < 1e-9);

    // 最后一份评估提交后结果自动汇总
    let result_id = fx.result_id().await;
    let detail = fx
        .storage
        .get_result_detail(result_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.result.status, ResultStatus::Completed);
    let score = detail.result.score.unwrap();
    assert!((score - 4.5).abs() < 1e-9);

    // 没有已提交评估的明细不参与结果得分
    let unscored: Vec<_> = detail.details.iter().filter(|d| d.score.is_none()).collect();
    assert_eq!(unscored.len(), 1);

    // 手动重新汇总结果不变
    let again = fx.storage.aggregate_result(result_id).await.unwrap();
    assert_eq!(again.status, ResultStatus::Completed);
    assert!((again.score.unwrap() - score).abs() < 1e-9);

    // 已提交的评估不能再次作答或提交
    let resubmit = fx.storage.submit_evaluation(peer.id, fx.lead_id).await;
    assert!(matches!(resubmit, Err(BackofficeError::InvalidState(_))));
}

#[tokio::test]
async fn test_state_guards() {
    let fx = setup().await;

    // Draft 周期不能发布
    let early = fx.storage.publish_administration(fx.administration_id).await;
    assert!(matches!(early, Err(BackofficeError::InvalidState(_))));

    let (peer, _) = fx.publish_with_peer_only().await;

    // 发布后不能再生成或选择评估
    assert!(matches!(
        fx.generate().await,
        Err(BackofficeError::InvalidState(_))
    ));
    let toggle = fx.storage.set_for_evaluation(peer.id, false).await;
    assert!(matches!(toggle, Err(BackofficeError::InvalidState(_))));

    // 仍有未完成评估时拒绝手动汇总
    let result_id = fx.result_id().await;
    let aggregate = fx.storage.aggregate_result(result_id).await;
    assert!(matches!(aggregate, Err(BackofficeError::InvalidState(_))));

    let closed = fx
        .storage
        .close_administration(fx.administration_id)
        .await
        .unwrap();
    assert_eq!(closed.status, AdministrationStatus::Closed);
    let cancel = fx.storage.cancel_administration(fx.administration_id).await;
    assert!(matches!(cancel, Err(BackofficeError::InvalidState(_))));
}

#[tokio::test]
async fn test_removal_approve_and_decline() {
    let fx = setup().await;
    let (peer, _) = fx.publish_with_peer_only().await;
    let result_id = fx.result_id().await;

    let removed = fx.storage.approve_evaluation(peer.id).await.unwrap();
    assert_eq!(removed.status, EvaluationStatus::Removed);

    // 最后一份未完成评估被移除，结果汇总为无得分
    let detail = fx
        .storage
        .get_result_detail(result_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.result.status, ResultStatus::Completed);
    assert_eq!(detail.result.score, None);

    let restored = fx.storage.decline_evaluation(peer.id).await.unwrap();
    assert_eq!(restored.status, EvaluationStatus::Ongoing);

    let detail = fx
        .storage
        .get_result_detail(result_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.result.status, ResultStatus::Ongoing);
    assert_eq!(detail.result.score, None);

    let evaluation = fx
        .storage
        .get_evaluation_detail(peer.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(evaluation.ratings.len(), 2);

    // 只有 Removed 状态可以驳回
    let twice = fx.storage.decline_evaluation(peer.id).await;
    assert!(matches!(twice, Err(BackofficeError::InvalidState(_))));
}

#[tokio::test]
async fn test_decline_clears_aggregated_score() {
    let fx = setup().await;
    let (peer, hr) = fx.publish_with_peer_and_hr().await;
    let result_id = fx.result_id().await;

    fx.answer_all(peer.id, fx.lead_id, fx.good_option_id).await;
    fx.storage
        .submit_evaluation(peer.id, fx.lead_id)
        .await
        .unwrap();

    // 移除最后一份未完成的 HR 评估后，结果按同事评估汇总
    fx.storage.approve_evaluation(hr.id).await.unwrap();
    let result = fx
        .storage
        .get_result_detail(result_id)
        .await
        .unwrap()
        .unwrap()
        .result;
    assert_eq!(result.status, ResultStatus::Completed);
    assert!((result.score.unwrap() - 4.0).abs() < 1e-9);

    let restored = fx.storage.decline_evaluation(hr.id).await.unwrap();
    assert_eq!(restored.status, EvaluationStatus::Ongoing);
    let result = fx
        .storage
        .get_result_detail(result_id)
        .await
        .unwrap()
        .unwrap()
        .result;
    assert_eq!(result.status, ResultStatus::Ongoing);
    assert_eq!(result.score, None);
}

#[tokio::test]
async fn test_submit_comment() {
    let fx = setup().await;
    fx.generate().await.unwrap();
    let (peer, _) = fx.peer_and_hr().await;

    // Draft 状态不能评论
    let draft = fx
        .storage
        .submit_comment(peer.id, fx.lead_id, "too early".to_string())
        .await;
    assert!(matches!(draft, Err(BackofficeError::InvalidState(_))));

    fx.select_and_publish(true, false).await;

    let denied = fx
        .storage
        .submit_comment(peer.id, fx.hr_id, "not mine".to_string())
        .await;
    assert!(matches!(denied, Err(BackofficeError::Authorization(_))));

    let commented = fx
        .storage
        .submit_comment(peer.id, fx.lead_id, "Solid delivery".to_string())
        .await
        .unwrap();
    assert_eq!(commented.status, EvaluationStatus::Ongoing);
    assert_eq!(commented.comments.as_deref(), Some("Solid delivery"));
    assert_eq!(commented.score, None);
    assert_eq!(commented.weight, None);

    // 评论不影响评分条目
    let detail = fx
        .storage
        .get_evaluation_detail(peer.id)
        .await
        .unwrap()
        .unwrap();
    assert!(detail.ratings.iter().all(|r| r.score.is_none()));

    // 进行中可以继续修改评语
    let edited = fx
        .storage
        .submit_comment(peer.id, fx.lead_id, "Solid delivery, good quality".to_string())
        .await
        .unwrap();
    assert_eq!(edited.status, EvaluationStatus::Ongoing);
    assert_eq!(
        edited.comments.as_deref(),
        Some("Solid delivery, good quality")
    );
}

#[tokio::test]
async fn test_submitted_evaluation_is_frozen() {
    let fx = setup().await;
    let (peer, _) = fx.publish_with_peer_only().await;
    fx.answer_all(peer.id, fx.lead_id, fx.good_option_id).await;
    fx.storage
        .submit_evaluation(peer.id, fx.lead_id)
        .await
        .unwrap();

    let comment = fx
        .storage
        .submit_comment(peer.id, fx.lead_id, "late".to_string())
        .await;
    assert!(matches!(comment, Err(BackofficeError::InvalidState(_))));

    let detail = fx
        .storage
        .get_evaluation_detail(peer.id)
        .await
        .unwrap()
        .unwrap();
    let answer = fx
        .storage
        .submit_answer(
            peer.id,
            fx.lead_id,
            SubmitAnswerRequest {
                evaluation_rating_id: detail.ratings[0].id,
                answer_option_id: fx.excellent_option_id,
            },
        )
        .await;
    assert!(matches!(answer, Err(BackofficeError::InvalidState(_))));

    let evaluation = fx.storage.get_evaluation(peer.id).await.unwrap().unwrap();
    assert_eq!(evaluation.status, EvaluationStatus::Submitted);
    assert_eq!(evaluation.comments, None);
    assert_eq!(evaluation.score, Some(4.0));
}

#[tokio::test]
async fn test_non_rater_cannot_submit_in_any_status() {
    let fx = setup().await;
    fx.generate().await.unwrap();
    let (peer, _) = fx.peer_and_hr().await;

    // 发布前（Draft）
    let draft = fx.storage.submit_evaluation(peer.id, fx.hr_id).await;
    assert!(matches!(draft, Err(BackofficeError::Authorization(_))));

    fx.select_and_publish(true, false).await;
    let open = fx.storage.submit_evaluation(peer.id, fx.developer_id).await;
    assert!(matches!(open, Err(BackofficeError::Authorization(_))));

    fx.answer_all(peer.id, fx.lead_id, fx.good_option_id).await;
    fx.storage
        .submit_evaluation(peer.id, fx.lead_id)
        .await
        .unwrap();
    let submitted = fx.storage.submit_evaluation(peer.id, fx.hr_id).await;
    assert!(matches!(submitted, Err(BackofficeError::Authorization(_))));
}

#[tokio::test]
async fn test_only_last_submission_aggregates() {
    let fx = setup().await;
    let (peer, hr) = fx.publish_with_peer_and_hr().await;
    let result_id = fx.result_id().await;

    fx.answer_all(peer.id, fx.lead_id, fx.good_option_id).await;
    let first = fx
        .storage
        .submit_evaluation(peer.id, fx.lead_id)
        .await
        .unwrap();
    assert_eq!(first.score, Some(4.0));

    // HR 评估仍未完成，结果保持未汇总
    let detail = fx
        .storage
        .get_result_detail(result_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.result.status, ResultStatus::Ongoing);
    assert_eq!(detail.result.score, None);

    fx.answer_all(hr.id, fx.hr_id, fx.excellent_option_id).await;
    let last = fx.storage.submit_evaluation(hr.id, fx.hr_id).await.unwrap();
    assert_eq!(last.score, Some(5.0));

    let detail = fx
        .storage
        .get_result_detail(result_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.result.status, ResultStatus::Completed);
    assert!((detail.result.score.unwrap() - 4.5).abs() < 1e-9);

    let mut details: Vec<(f64, f64, f64)> = detail
        .details
        .iter()
        .map(|d| (d.weight, d.score.unwrap(), d.weighted_score.unwrap()))
        .collect();
    details.sort_by(|a, b| a.1.total_cmp(&b.1));
    let expected = [(0.5, 4.0, 2.0), (0.5, 5.0, 2.5)];
    for (actual, expected) in details.iter().zip(expected) {
        assert!((actual.0 - expected.0).abs() < 1e-9);
        assert!((actual.1 - expected.1).abs() < 1e-9);
        assert!((actual.2 - expected.2).abs() < 1e-9);
    }
    assert_eq!(details.len(), 2);
}

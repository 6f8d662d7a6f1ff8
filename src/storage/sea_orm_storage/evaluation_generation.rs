//! 评估生成：为周期内的每个被评估者创建结果、结果明细与评估任务
//!
//! 整个过程在一个事务内完成；已存在的结果、明细与评估不会重复创建。

use super::SeaOrmStorage;
use super::evaluation_administrations::{find_administration, set_administration_status};
use super::users::role_pattern;
use crate::entity::prelude::*;
use crate::entity::{
    evaluation_result_details, evaluation_results, evaluation_templates, evaluations,
    project_members, users,
};
use crate::errors::{BackofficeError, Result};
use crate::models::{
    evaluation_administrations::{
        entities::AdministrationStatus,
        responses::{GenerateEvaluationsResponse, GenerationSummary},
    },
    evaluation_results::entities::ResultStatus,
    evaluations::entities::EvaluationStatus,
    users::entities::UserRole,
};
use crate::utils::date::date_to_ts;
use crate::utils::evaluation_plan::{DateWindow, HrInput, MembershipInput, plan_for_evaluee};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use std::collections::HashSet;
use tracing::{info, warn};

/// 被评估者所在项目的全部成员关系
async fn memberships_around<C: ConnectionTrait>(
    conn: &C,
    evaluee_id: i64,
) -> Result<Vec<MembershipInput>> {
    let project_ids: Vec<i64> = ProjectMembers::find()
        .select_only()
        .column(project_members::Column::ProjectId)
        .filter(project_members::Column::EmployeeId.eq(evaluee_id))
        .distinct()
        .into_tuple()
        .all(conn)
        .await
        .map_err(|e| BackofficeError::database_operation(format!("查询项目成员失败: {e}")))?;
    if project_ids.is_empty() {
        return Ok(Vec::new());
    }

    let members = ProjectMembers::find()
        .filter(project_members::Column::ProjectId.is_in(project_ids))
        .order_by_asc(project_members::Column::Id)
        .all(conn)
        .await
        .map_err(|e| BackofficeError::database_operation(format!("查询项目成员失败: {e}")))?;
    Ok(members.iter().map(|m| m.to_membership_input()).collect())
}

/// 获取或创建 (周期, 被评估者) 的结果，返回 (结果 ID, 是否新建)
async fn ensure_result<C: ConnectionTrait>(
    conn: &C,
    administration_id: i64,
    employee_id: i64,
    now: i64,
) -> Result<(i64, bool)> {
    let existing = EvaluationResults::find()
        .filter(evaluation_results::Column::EvaluationAdministrationId.eq(administration_id))
        .filter(evaluation_results::Column::EmployeeId.eq(employee_id))
        .one(conn)
        .await
        .map_err(|e| BackofficeError::database_operation(format!("查询评估结果失败: {e}")))?;
    if let Some(result) = existing {
        return Ok((result.id, false));
    }

    let created = EvaluationResultActiveModel {
        evaluation_administration_id: Set(administration_id),
        employee_id: Set(employee_id),
        score: Set(None),
        status: Set(ResultStatus::ForReview.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(|e| BackofficeError::database_operation(format!("创建评估结果失败: {e}")))?;
    Ok((created.id, true))
}

impl SeaOrmStorage {
    pub async fn generate_evaluations_impl(
        &self,
        administration_id: i64,
        employee_ids: Vec<i64>,
        hr_template_evaluee_role_id: i64,
    ) -> Result<GenerateEvaluationsResponse> {
        if employee_ids.is_empty() {
            return Err(BackofficeError::validation(
                "Must have at least 1 employee selected",
            ));
        }

        let txn = self.db.begin().await?;

        let administration = find_administration(&txn, administration_id).await?;
        let status = administration.parsed_status();
        if !status.can_generate() {
            return Err(BackofficeError::invalid_state(format!(
                "Cannot generate evaluations for an administration in {status} status"
            )));
        }

        // 去重并保持顺序
        let mut seen = HashSet::new();
        let employee_ids: Vec<i64> = employee_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();

        let known: HashSet<i64> = Users::find()
            .select_only()
            .column(users::Column::Id)
            .filter(users::Column::Id.is_in(employee_ids.clone()))
            .into_tuple::<i64>()
            .all(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询用户失败: {e}")))?
            .into_iter()
            .collect();
        if let Some(missing) = employee_ids.iter().find(|id| !known.contains(id)) {
            return Err(BackofficeError::not_found(format!(
                "Employee {missing} not found"
            )));
        }

        let active_templates = EvaluationTemplates::find()
            .filter(evaluation_templates::Column::IsActive.eq(true))
            .order_by_asc(evaluation_templates::Column::Id)
            .all(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询评估模板失败: {e}")))?;
        let templates: Vec<_> = active_templates
            .iter()
            .map(|t| t.to_template_input())
            .collect();

        let hr_template = templates
            .iter()
            .find(|t| t.evaluee_role_id == hr_template_evaluee_role_id);
        let hr_evaluator_ids: Vec<i64> = if hr_template.is_some() {
            Users::find()
                .select_only()
                .column(users::Column::Id)
                .filter(users::Column::Roles.contains(role_pattern(UserRole::HrEvaluator)))
                .order_by_asc(users::Column::Id)
                .into_tuple()
                .all(&txn)
                .await
                .map_err(|e| BackofficeError::database_operation(format!("查询 HR 评估者失败: {e}")))?
        } else {
            warn!(
                "未找到被评估角色为 {hr_template_evaluee_role_id} 的启用模板，跳过 HR 评估"
            );
            Vec::new()
        };

        let period: DateWindow = administration.period();
        let now = chrono::Utc::now().timestamp();
        let mut summary = GenerationSummary::default();

        for &employee_id in &employee_ids {
            let (result_id, created) =
                ensure_result(&txn, administration_id, employee_id, now).await?;
            if created {
                summary.results_created += 1;
            }

            let memberships = memberships_around(&txn, employee_id).await?;
            let plan = plan_for_evaluee(
                employee_id,
                period,
                &memberships,
                &templates,
                hr_template.map(|template| HrInput {
                    template,
                    evaluator_ids: &hr_evaluator_ids,
                }),
            );

            let existing_details: HashSet<i64> = EvaluationResultDetails::find()
                .filter(evaluation_result_details::Column::EvaluationResultId.eq(result_id))
                .all(&txn)
                .await
                .map_err(|e| BackofficeError::database_operation(format!("查询结果明细失败: {e}")))?
                .into_iter()
                .map(|d| d.evaluation_template_id)
                .collect();

            for detail in plan.details {
                if existing_details.contains(&detail.evaluation_template_id) {
                    continue;
                }
                EvaluationResultDetailActiveModel {
                    evaluation_result_id: Set(result_id),
                    evaluation_template_id: Set(detail.evaluation_template_id),
                    weight: Set(detail.weight),
                    score: Set(None),
                    weighted_score: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| BackofficeError::database_operation(format!("创建结果明细失败: {e}")))?;
                summary.details_created += 1;
            }

            let existing_evaluations: HashSet<(i64, i64)> = Evaluations::find()
                .filter(evaluations::Column::EvaluationResultId.eq(result_id))
                .all(&txn)
                .await
                .map_err(|e| BackofficeError::database_operation(format!("查询评估失败: {e}")))?
                .into_iter()
                .map(|e| (e.evaluation_template_id, e.evaluator_id))
                .collect();

            for planned in plan.evaluations {
                let key = (planned.evaluation_template_id, planned.evaluator_id);
                if existing_evaluations.contains(&key) {
                    continue;
                }
                EvaluationActiveModel {
                    evaluation_administration_id: Set(administration_id),
                    evaluation_result_id: Set(result_id),
                    evaluation_template_id: Set(planned.evaluation_template_id),
                    evaluator_id: Set(planned.evaluator_id),
                    evaluee_id: Set(employee_id),
                    project_id: Set(planned.project_id),
                    project_member_id: Set(planned.project_member_id),
                    for_evaluation: Set(false),
                    eval_start_date: Set(date_to_ts(planned.window.start)),
                    eval_end_date: Set(date_to_ts(planned.window.end)),
                    percent_involvement: Set(planned.percent_involvement),
                    comments: Set(None),
                    score: Set(None),
                    weight: Set(None),
                    weighted_score: Set(None),
                    status: Set(EvaluationStatus::Draft.to_string()),
                    submission_method: Set(None),
                    submitted_date: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| BackofficeError::database_operation(format!("创建评估失败: {e}")))?;
                if planned.is_hr {
                    summary.hr_evaluations_created += 1;
                } else {
                    summary.evaluations_created += 1;
                }
            }
        }

        let administration = if status == AdministrationStatus::Pending {
            administration
        } else {
            set_administration_status(&txn, administration, AdministrationStatus::Pending).await?
        };
        txn.commit().await?;

        info!(
            "评估周期 {administration_id} 生成完成: 结果 {}，明细 {}，评估 {}，HR 评估 {}",
            summary.results_created,
            summary.details_created,
            summary.evaluations_created,
            summary.hr_evaluations_created
        );

        Ok(GenerateEvaluationsResponse {
            administration: administration.into_administration(),
            summary,
        })
    }
}

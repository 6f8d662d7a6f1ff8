//! 评估任务：作答、评论、提交与管理员操作

use super::SeaOrmStorage;
use super::aggregation::finalize_if_done;
use super::evaluation_templates::find_contents;
use crate::entity::prelude::*;
use crate::entity::{answer_options, evaluation_ratings, evaluations};
use crate::errors::{BackofficeError, Result};
use crate::models::{
    Paginated,
    evaluation_administrations::entities::AdministrationStatus,
    evaluation_results::entities::ResultStatus,
    evaluations::{
        entities::{
            Evaluation, EvaluationRating, EvaluationStatus, SUBMISSION_METHOD_MANUAL,
        },
        requests::{EvaluationListQuery, SubmitAnswerRequest},
        responses::EvaluationDetailResponse,
    },
};
use crate::utils::date::{days_in_year_of, today, ts_to_date};
use crate::utils::scoring;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::collections::HashSet;
use tracing::info;

async fn find_evaluation<C: ConnectionTrait>(conn: &C, id: i64) -> Result<EvaluationModel> {
    Evaluations::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| BackofficeError::database_operation(format!("查询评估失败: {e}")))?
        .ok_or_else(|| BackofficeError::not_found(format!("Evaluation {id} not found")))
}

async fn administration_status<C: ConnectionTrait>(
    conn: &C,
    administration_id: i64,
) -> Result<AdministrationStatus> {
    EvaluationAdministrations::find_by_id(administration_id)
        .one(conn)
        .await
        .map_err(|e| BackofficeError::database_operation(format!("查询评估周期失败: {e}")))?
        .map(|m| m.parsed_status())
        .ok_or_else(|| {
            BackofficeError::not_found(format!(
                "Evaluation administration {administration_id} not found"
            ))
        })
}

/// 只有评估者本人可以操作
fn ensure_rater(evaluation: &EvaluationModel, actor_id: i64) -> Result<()> {
    if evaluation.evaluator_id != actor_id {
        return Err(BackofficeError::authorization(
            "Only the assigned evaluator can perform this action",
        ));
    }
    Ok(())
}

async fn find_ratings<C: ConnectionTrait>(
    conn: &C,
    evaluation_id: i64,
) -> Result<Vec<EvaluationRatingModel>> {
    EvaluationRatings::find()
        .filter(evaluation_ratings::Column::EvaluationId.eq(evaluation_id))
        .order_by_asc(evaluation_ratings::Column::Id)
        .all(conn)
        .await
        .map_err(|e| BackofficeError::database_operation(format!("查询评分条目失败: {e}")))
}

/// 为评估补齐缺失的评分条目（每个启用的评分项一条）
pub(super) async fn seed_missing_ratings<C: ConnectionTrait>(
    conn: &C,
    evaluation: &EvaluationModel,
    now: i64,
) -> Result<usize> {
    let existing: HashSet<i64> = find_ratings(conn, evaluation.id)
        .await?
        .into_iter()
        .map(|r| r.evaluation_template_content_id)
        .collect();

    let mut created = 0;
    for content in find_contents(conn, evaluation.evaluation_template_id, true).await? {
        if existing.contains(&content.id) {
            continue;
        }
        EvaluationRatingActiveModel {
            evaluation_administration_id: Set(evaluation.evaluation_administration_id),
            evaluation_id: Set(evaluation.id),
            evaluation_template_content_id: Set(content.id),
            answer_option_id: Set(None),
            percentage: Set(content.rate),
            rate: Set(None),
            score: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| BackofficeError::database_operation(format!("创建评分条目失败: {e}")))?;
        created += 1;
    }
    Ok(created)
}

async fn save_status<C: ConnectionTrait>(
    conn: &C,
    evaluation: EvaluationModel,
    status: EvaluationStatus,
) -> Result<EvaluationModel> {
    let mut model: EvaluationActiveModel = evaluation.into();
    model.status = Set(status.to_string());
    model.updated_at = Set(chrono::Utc::now().timestamp());
    model
        .update(conn)
        .await
        .map_err(|e| BackofficeError::database_operation(format!("更新评估状态失败: {e}")))
}

impl SeaOrmStorage {
    pub async fn list_evaluations_impl(
        &self,
        query: EvaluationListQuery,
    ) -> Result<Paginated<Evaluation>> {
        let mut select = Evaluations::find();

        if let Some(evaluator_id) = query.evaluator_id {
            select = select.filter(evaluations::Column::EvaluatorId.eq(evaluator_id));
        }
        if let Some(result_id) = query.evaluation_result_id {
            select = select.filter(evaluations::Column::EvaluationResultId.eq(result_id));
        }
        if let Some(administration_id) = query.evaluation_administration_id {
            select = select
                .filter(evaluations::Column::EvaluationAdministrationId.eq(administration_id));
        }
        if let Some(status) = query.status {
            select = select.filter(evaluations::Column::Status.eq(status.as_str()));
        }

        select = select
            .order_by_asc(evaluations::Column::EvalueeId)
            .order_by_asc(evaluations::Column::Id);

        self.fetch_paginated(select, query.page, query.size, "评估", |m| {
            m.into_evaluation()
        })
        .await
    }

    pub async fn get_evaluation_impl(&self, id: i64) -> Result<Option<Evaluation>> {
        let evaluation = Evaluations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询评估失败: {e}")))?;
        Ok(evaluation.map(|m| m.into_evaluation()))
    }

    /// 评估详情：评分条目、评分项与可选答案
    pub async fn get_evaluation_detail_impl(
        &self,
        id: i64,
    ) -> Result<Option<EvaluationDetailResponse>> {
        let Some(evaluation) = Evaluations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询评估失败: {e}")))?
        else {
            return Ok(None);
        };

        let ratings = find_ratings(&self.db, id).await?;
        let criteria = find_contents(&self.db, evaluation.evaluation_template_id, false).await?;

        let answer_options = match EvaluationTemplates::find_by_id(evaluation.evaluation_template_id)
            .one(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询评估模板失败: {e}")))?
        {
            Some(template) => self.list_answer_options_impl(template.answer_id).await?,
            None => Vec::new(),
        };

        Ok(Some(EvaluationDetailResponse {
            evaluation: evaluation.into_evaluation(),
            ratings: ratings.into_iter().map(|m| m.into_rating()).collect(),
            criteria: criteria.into_iter().map(|m| m.into_content()).collect(),
            answer_options,
        }))
    }

    /// 作答：设置选项、分值与得分，评估转为 Ongoing
    pub async fn submit_answer_impl(
        &self,
        evaluation_id: i64,
        actor_id: i64,
        req: SubmitAnswerRequest,
    ) -> Result<EvaluationRating> {
        let evaluation = find_evaluation(&self.db, evaluation_id).await?;
        ensure_rater(&evaluation, actor_id)?;

        // 与提交共用结果锁，锁内重新读取状态
        let _guard = self.lock_result(evaluation.evaluation_result_id).await;
        let txn = self.db.begin().await?;
        let evaluation = find_evaluation(&txn, evaluation_id).await?;
        let next = evaluation.parsed_status().answer()?;

        let rating = EvaluationRatings::find_by_id(req.evaluation_rating_id)
            .one(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询评分条目失败: {e}")))?
            .filter(|r| r.evaluation_id == evaluation_id)
            .ok_or_else(|| {
                BackofficeError::not_found(format!(
                    "Rating {} not found in evaluation {evaluation_id}",
                    req.evaluation_rating_id
                ))
            })?;

        let template = EvaluationTemplates::find_by_id(evaluation.evaluation_template_id)
            .one(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询评估模板失败: {e}")))?
            .ok_or_else(|| BackofficeError::not_found("Evaluation template not found"))?;

        let option = AnswerOptions::find()
            .filter(answer_options::Column::Id.eq(req.answer_option_id))
            .one(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询答案选项失败: {e}")))?
            .ok_or_else(|| {
                BackofficeError::not_found(format!(
                    "Answer option {} not found",
                    req.answer_option_id
                ))
            })?;
        if option.answer_id != template.answer_id {
            return Err(BackofficeError::validation(
                "Answer option does not belong to this template's answer scale",
            ));
        }

        let now = chrono::Utc::now().timestamp();
        let percentage = rating.percentage;
        let mut rating_model: EvaluationRatingActiveModel = rating.into();
        rating_model.answer_option_id = Set(Some(option.id));
        rating_model.rate = Set(Some(option.rate));
        rating_model.score = Set(Some(scoring::rating_score(option.rate, percentage)));
        rating_model.updated_at = Set(now);
        let rating = rating_model
            .update(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("更新评分条目失败: {e}")))?;

        save_status(&txn, evaluation, next).await?;
        txn.commit().await?;

        Ok(rating.into_rating())
    }

    /// 评论：只更新评语，不影响得分
    pub async fn submit_comment_impl(
        &self,
        evaluation_id: i64,
        actor_id: i64,
        comment: String,
    ) -> Result<Evaluation> {
        let evaluation = find_evaluation(&self.db, evaluation_id).await?;
        ensure_rater(&evaluation, actor_id)?;

        let _guard = self.lock_result(evaluation.evaluation_result_id).await;
        let txn = self.db.begin().await?;
        let evaluation = find_evaluation(&txn, evaluation_id).await?;
        let next = evaluation.parsed_status().answer()?;

        let mut model: EvaluationActiveModel = evaluation.into();
        model.comments = Set(Some(comment));
        model.status = Set(next.to_string());
        model.updated_at = Set(chrono::Utc::now().timestamp());
        let saved = model
            .update(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("更新评语失败: {e}")))?;
        txn.commit().await?;

        Ok(saved.into_evaluation())
    }

    /// 提交评估并在最后一份评估完成时汇总结果
    pub async fn submit_evaluation_impl(
        &self,
        evaluation_id: i64,
        actor_id: i64,
    ) -> Result<Evaluation> {
        let evaluation = find_evaluation(&self.db, evaluation_id).await?;
        // 先校验评估者，非评估者不论状态一律 403
        ensure_rater(&evaluation, actor_id)?;

        let _guard = self.lock_result(evaluation.evaluation_result_id).await;

        let txn = self.db.begin().await?;
        let evaluation = find_evaluation(&txn, evaluation_id).await?;
        let status = evaluation.parsed_status();
        if !status.accepts_answers() {
            return Err(BackofficeError::invalid_state(format!(
                "Evaluation cannot be submitted in {status} status"
            )));
        }

        let ratings = find_ratings(&txn, evaluation_id).await?;
        let score = scoring::evaluation_score(ratings.iter().map(|r| (r.score, r.percentage)))?;
        let weight = scoring::evaluation_weight(
            ts_to_date(evaluation.eval_start_date),
            ts_to_date(evaluation.eval_end_date),
            evaluation.percent_involvement,
            days_in_year_of(today()),
        );

        let now = chrono::Utc::now().timestamp();
        let result_id = evaluation.evaluation_result_id;
        let mut model: EvaluationActiveModel = evaluation.into();
        model.score = Set(Some(score));
        model.weight = Set(Some(weight));
        model.weighted_score = Set(Some(weight * score));
        model.status = Set(EvaluationStatus::Submitted.to_string());
        model.submission_method = Set(Some(SUBMISSION_METHOD_MANUAL.to_string()));
        model.submitted_date = Set(Some(now));
        model.updated_at = Set(now);
        let saved = model
            .update(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("提交评估失败: {e}")))?;

        if finalize_if_done(&txn, result_id).await? {
            info!("评估结果 {result_id} 的全部评估已完成，已汇总");
        }
        txn.commit().await?;

        Ok(saved.into_evaluation())
    }

    /// 切换 for_evaluation，仅限待发布的周期
    pub async fn set_for_evaluation_impl(
        &self,
        evaluation_id: i64,
        for_evaluation: bool,
    ) -> Result<Evaluation> {
        let evaluation = find_evaluation(&self.db, evaluation_id).await?;
        let cycle = administration_status(&self.db, evaluation.evaluation_administration_id).await?;
        if cycle != AdministrationStatus::Pending {
            return Err(BackofficeError::invalid_state(format!(
                "Evaluations can only be selected while the administration is Pending (status: {cycle})"
            )));
        }
        let next = evaluation.parsed_status().toggle_for_evaluation(for_evaluation)?;

        let mut model: EvaluationActiveModel = evaluation.into();
        model.for_evaluation = Set(for_evaluation);
        model.status = Set(next.to_string());
        model.updated_at = Set(chrono::Utc::now().timestamp());
        let saved = model
            .update(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("更新评估失败: {e}")))?;

        Ok(saved.into_evaluation())
    }

    /// 批准移除：评估转为 Removed，可能触发汇总
    pub async fn approve_evaluation_impl(&self, evaluation_id: i64) -> Result<Evaluation> {
        let evaluation = find_evaluation(&self.db, evaluation_id).await?;
        let _guard = self.lock_result(evaluation.evaluation_result_id).await;

        let txn = self.db.begin().await?;
        let evaluation = find_evaluation(&txn, evaluation_id).await?;
        let next = evaluation.parsed_status().approve_removal()?;
        let result_id = evaluation.evaluation_result_id;
        let cycle = administration_status(&txn, evaluation.evaluation_administration_id).await?;

        let saved = save_status(&txn, evaluation, next).await?;
        if cycle == AdministrationStatus::Ongoing {
            finalize_if_done(&txn, result_id).await?;
        }
        txn.commit().await?;

        Ok(saved.into_evaluation())
    }

    /// 驳回移除：恢复为 Ongoing，补齐评分条目，结果回到 Ongoing
    pub async fn decline_evaluation_impl(&self, evaluation_id: i64) -> Result<Evaluation> {
        let evaluation = find_evaluation(&self.db, evaluation_id).await?;
        let _guard = self.lock_result(evaluation.evaluation_result_id).await;

        let txn = self.db.begin().await?;
        let evaluation = find_evaluation(&txn, evaluation_id).await?;
        let next = evaluation.parsed_status().decline_removal()?;
        let result_id = evaluation.evaluation_result_id;
        let now = chrono::Utc::now().timestamp();

        let saved = save_status(&txn, evaluation, next).await?;
        seed_missing_ratings(&txn, &saved, now).await?;

        if let Some(result) = EvaluationResults::find_by_id(result_id)
            .one(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询评估结果失败: {e}")))?
        {
            let mut model: EvaluationResultActiveModel = result.into();
            model.status = Set(ResultStatus::Ongoing.to_string());
            // 结果重新未完成，旧的汇总得分作废
            model.score = Set(None);
            model.updated_at = Set(now);
            model
                .update(&txn)
                .await
                .map_err(|e| BackofficeError::database_operation(format!("更新评估结果失败: {e}")))?;
        }
        txn.commit().await?;

        Ok(saved.into_evaluation())
    }

    /// 删除评估及其评分条目
    pub async fn delete_evaluation_impl(&self, evaluation_id: i64) -> Result<bool> {
        let Some(evaluation) = Evaluations::find_by_id(evaluation_id)
            .one(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询评估失败: {e}")))?
        else {
            return Ok(false);
        };

        let _guard = self.lock_result(evaluation.evaluation_result_id).await;

        let txn = self.db.begin().await?;
        EvaluationRatings::delete_many()
            .filter(evaluation_ratings::Column::EvaluationId.eq(evaluation_id))
            .exec(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("删除评分条目失败: {e}")))?;
        let deleted = Evaluations::delete_by_id(evaluation_id)
            .exec(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("删除评估失败: {e}")))?;

        let cycle = administration_status(&txn, evaluation.evaluation_administration_id).await?;
        if cycle == AdministrationStatus::Ongoing {
            finalize_if_done(&txn, evaluation.evaluation_result_id).await?;
        }
        txn.commit().await?;

        Ok(deleted.rows_affected > 0)
    }
}

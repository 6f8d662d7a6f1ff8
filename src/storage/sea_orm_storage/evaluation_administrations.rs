use super::SeaOrmStorage;
use super::aggregation::finalize_if_done;
use super::evaluations::seed_missing_ratings;
use crate::entity::prelude::*;
use crate::entity::{
    evaluation_administrations, evaluation_ratings, evaluation_result_details,
    evaluation_results, evaluations,
};
use crate::errors::{BackofficeError, Result};
use crate::models::{
    Paginated,
    evaluation_administrations::{
        entities::{AdministrationStatus, EvaluationAdministration},
        requests::{
            AdministrationListQuery, CreateAdministrationRequest, UpdateAdministrationRequest,
            check_window,
        },
    },
    evaluation_results::entities::ResultStatus,
    evaluations::entities::EvaluationStatus,
};
use crate::utils::date::{date_to_ts, ts_to_date};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::info;

pub(super) async fn find_administration<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<EvaluationAdministrationModel> {
    EvaluationAdministrations::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| BackofficeError::database_operation(format!("查询评估周期失败: {e}")))?
        .ok_or_else(|| BackofficeError::not_found(format!("Evaluation administration {id} not found")))
}

pub(super) async fn set_administration_status<C: ConnectionTrait>(
    conn: &C,
    administration: EvaluationAdministrationModel,
    status: AdministrationStatus,
) -> Result<EvaluationAdministrationModel> {
    let mut model: EvaluationAdministrationActiveModel = administration.into();
    model.status = Set(status.to_string());
    model.updated_at = Set(chrono::Utc::now().timestamp());
    model
        .update(conn)
        .await
        .map_err(|e| BackofficeError::database_operation(format!("更新评估周期状态失败: {e}")))
}

impl SeaOrmStorage {
    pub async fn list_administrations_impl(
        &self,
        query: AdministrationListQuery,
    ) -> Result<Paginated<EvaluationAdministration>> {
        let mut select = EvaluationAdministrations::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(evaluation_administrations::Column::Name.contains(&escaped));
        }
        if let Some(status) = query.status {
            select = select.filter(evaluation_administrations::Column::Status.eq(status.as_str()));
        }

        select = select.order_by_desc(evaluation_administrations::Column::CreatedAt);

        self.fetch_paginated(select, query.page, query.size, "评估周期", |m| {
            m.into_administration()
        })
        .await
    }

    pub async fn get_administration_impl(
        &self,
        id: i64,
    ) -> Result<Option<EvaluationAdministration>> {
        let row = EvaluationAdministrations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询评估周期失败: {e}")))?;
        Ok(row.map(|m| m.into_administration()))
    }

    pub async fn create_administration_impl(
        &self,
        created_by: i64,
        req: CreateAdministrationRequest,
    ) -> Result<EvaluationAdministration> {
        let now = chrono::Utc::now().timestamp();
        let model = EvaluationAdministrationActiveModel {
            name: Set(req.name.trim().to_string()),
            eval_period_start_date: Set(date_to_ts(req.eval_period_start_date)),
            eval_period_end_date: Set(date_to_ts(req.eval_period_end_date)),
            eval_schedule_start_date: Set(date_to_ts(req.eval_schedule_start_date)),
            eval_schedule_end_date: Set(date_to_ts(req.eval_schedule_end_date)),
            remarks: Set(req.remarks),
            status: Set(AdministrationStatus::Draft.to_string()),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("创建评估周期失败: {e}")))?;
        Ok(result.into_administration())
    }

    /// 更新周期，仅限 Draft/Pending
    pub async fn update_administration_impl(
        &self,
        id: i64,
        update: UpdateAdministrationRequest,
    ) -> Result<EvaluationAdministration> {
        let existing = find_administration(&self.db, id).await?;
        let status = existing.parsed_status();
        if !status.can_update() {
            return Err(BackofficeError::invalid_state(format!(
                "Cannot update an evaluation administration in {status} status"
            )));
        }

        let period_start = update
            .eval_period_start_date
            .unwrap_or_else(|| ts_to_date(existing.eval_period_start_date));
        let period_end = update
            .eval_period_end_date
            .unwrap_or_else(|| ts_to_date(existing.eval_period_end_date));
        let schedule_start = update
            .eval_schedule_start_date
            .unwrap_or_else(|| ts_to_date(existing.eval_schedule_start_date));
        let schedule_end = update
            .eval_schedule_end_date
            .unwrap_or_else(|| ts_to_date(existing.eval_schedule_end_date));
        check_window(period_start, period_end, "Evaluation period")?;
        check_window(schedule_start, schedule_end, "Evaluation schedule")?;

        let mut model: EvaluationAdministrationActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(remarks) = update.remarks {
            model.remarks = Set(Some(remarks));
        }
        model.eval_period_start_date = Set(date_to_ts(period_start));
        model.eval_period_end_date = Set(date_to_ts(period_end));
        model.eval_schedule_start_date = Set(date_to_ts(schedule_start));
        model.eval_schedule_end_date = Set(date_to_ts(schedule_end));
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("更新评估周期失败: {e}")))?;
        Ok(result.into_administration())
    }

    /// 删除周期及其结果、评估、评分，仅限 Draft/Cancelled
    pub async fn delete_administration_impl(&self, id: i64) -> Result<()> {
        let txn = self.db.begin().await?;
        let existing = find_administration(&txn, id).await?;
        let status = existing.parsed_status();
        if !status.can_delete() {
            return Err(BackofficeError::invalid_state(format!(
                "Cannot delete an evaluation administration in {status} status"
            )));
        }

        EvaluationRatings::delete_many()
            .filter(evaluation_ratings::Column::EvaluationAdministrationId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("删除评分条目失败: {e}")))?;
        Evaluations::delete_many()
            .filter(evaluations::Column::EvaluationAdministrationId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("删除评估失败: {e}")))?;

        let result_ids: Vec<i64> = EvaluationResults::find()
            .select_only()
            .column(evaluation_results::Column::Id)
            .filter(evaluation_results::Column::EvaluationAdministrationId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询评估结果失败: {e}")))?;
        if !result_ids.is_empty() {
            EvaluationResultDetails::delete_many()
                .filter(evaluation_result_details::Column::EvaluationResultId.is_in(result_ids))
                .exec(&txn)
                .await
                .map_err(|e| {
                    BackofficeError::database_operation(format!("删除结果明细失败: {e}"))
                })?;
        }
        EvaluationResults::delete_many()
            .filter(evaluation_results::Column::EvaluationAdministrationId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("删除评估结果失败: {e}")))?;
        EvaluationAdministrations::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("删除评估周期失败: {e}")))?;

        txn.commit().await?;
        Ok(())
    }

    /// 发布周期
    ///
    /// Pending 评估开放作答并生成评分条目，剩余 Draft 评估排除，结果转为 Ongoing。
    /// 没有任何待作答评估的结果直接汇总。
    pub async fn publish_administration_impl(&self, id: i64) -> Result<EvaluationAdministration> {
        let txn = self.db.begin().await?;
        let administration = find_administration(&txn, id).await?;
        let next = administration.parsed_status().publish()?;
        let now = chrono::Utc::now().timestamp();

        let pending = Evaluations::find()
            .filter(evaluations::Column::EvaluationAdministrationId.eq(id))
            .filter(evaluations::Column::Status.eq(EvaluationStatus::Pending.as_str()))
            .all(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询评估失败: {e}")))?;

        let opened = pending.len();
        for evaluation in pending {
            let mut model: EvaluationActiveModel = evaluation.into();
            model.status = Set(EvaluationStatus::Open.to_string());
            model.updated_at = Set(now);
            let evaluation = model
                .update(&txn)
                .await
                .map_err(|e| BackofficeError::database_operation(format!("开放评估失败: {e}")))?;
            seed_missing_ratings(&txn, &evaluation, now).await?;
        }

        Evaluations::update_many()
            .col_expr(
                evaluations::Column::Status,
                sea_orm::sea_query::Expr::value(EvaluationStatus::Excluded.as_str()),
            )
            .col_expr(evaluations::Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(evaluations::Column::EvaluationAdministrationId.eq(id))
            .filter(evaluations::Column::Status.eq(EvaluationStatus::Draft.as_str()))
            .exec(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("排除草稿评估失败: {e}")))?;

        let results = EvaluationResults::find()
            .filter(evaluation_results::Column::EvaluationAdministrationId.eq(id))
            .all(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询评估结果失败: {e}")))?;
        for result in results {
            let result_id = result.id;
            let mut model: EvaluationResultActiveModel = result.into();
            model.status = Set(ResultStatus::Ongoing.to_string());
            model.updated_at = Set(now);
            model
                .update(&txn)
                .await
                .map_err(|e| BackofficeError::database_operation(format!("更新评估结果失败: {e}")))?;
            finalize_if_done(&txn, result_id).await?;
        }

        let administration = set_administration_status(&txn, administration, next).await?;
        txn.commit().await?;

        info!("评估周期 {id} 已发布，开放评估 {opened} 份");
        Ok(administration.into_administration())
    }

    pub async fn close_administration_impl(&self, id: i64) -> Result<EvaluationAdministration> {
        let administration = find_administration(&self.db, id).await?;
        let next = administration.parsed_status().close()?;
        let saved = set_administration_status(&self.db, administration, next).await?;
        Ok(saved.into_administration())
    }

    pub async fn cancel_administration_impl(&self, id: i64) -> Result<EvaluationAdministration> {
        let administration = find_administration(&self.db, id).await?;
        let next = administration.parsed_status().cancel()?;
        let saved = set_administration_status(&self.db, administration, next).await?;
        Ok(saved.into_administration())
    }
}

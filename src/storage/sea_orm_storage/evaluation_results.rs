use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{evaluation_ratings, evaluation_result_details, evaluation_results, evaluations};
use crate::errors::{BackofficeError, Result};
use crate::models::{
    Paginated,
    evaluation_results::{
        entities::EvaluationResult, requests::ResultListQuery, responses::ResultDetailResponse,
    },
};
use sea_orm::{
    ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

impl SeaOrmStorage {
    /// 周期下的结果列表
    pub async fn list_results_impl(
        &self,
        administration_id: i64,
        query: ResultListQuery,
    ) -> Result<Paginated<EvaluationResult>> {
        let mut select = EvaluationResults::find()
            .filter(evaluation_results::Column::EvaluationAdministrationId.eq(administration_id));
        if let Some(status) = query.status {
            select = select.filter(evaluation_results::Column::Status.eq(status.as_str()));
        }
        select = select.order_by_asc(evaluation_results::Column::EmployeeId);

        self.fetch_paginated(select, query.page, query.size, "评估结果", |m| {
            m.into_result()
        })
        .await
    }

    pub async fn get_result_detail_impl(&self, id: i64) -> Result<Option<ResultDetailResponse>> {
        let Some(result) = EvaluationResults::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询评估结果失败: {e}")))?
        else {
            return Ok(None);
        };

        let details = EvaluationResultDetails::find()
            .filter(evaluation_result_details::Column::EvaluationResultId.eq(id))
            .order_by_asc(evaluation_result_details::Column::EvaluationTemplateId)
            .all(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询结果明细失败: {e}")))?;

        Ok(Some(ResultDetailResponse {
            result: result.into_result(),
            details: details.into_iter().map(|m| m.into_detail()).collect(),
        }))
    }

    /// 删除结果及其明细、评估与评分
    pub async fn delete_result_impl(&self, id: i64) -> Result<bool> {
        let _guard = self.lock_result(id).await;

        let txn = self.db.begin().await?;
        let evaluation_ids: Vec<i64> = Evaluations::find()
            .select_only()
            .column(evaluations::Column::Id)
            .filter(evaluations::Column::EvaluationResultId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询评估失败: {e}")))?;

        if !evaluation_ids.is_empty() {
            EvaluationRatings::delete_many()
                .filter(evaluation_ratings::Column::EvaluationId.is_in(evaluation_ids))
                .exec(&txn)
                .await
                .map_err(|e| {
                    BackofficeError::database_operation(format!("删除评分条目失败: {e}"))
                })?;
        }
        Evaluations::delete_many()
            .filter(evaluations::Column::EvaluationResultId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("删除评估失败: {e}")))?;
        EvaluationResultDetails::delete_many()
            .filter(evaluation_result_details::Column::EvaluationResultId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("删除结果明细失败: {e}")))?;
        let deleted = EvaluationResults::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("删除评估结果失败: {e}")))?;

        txn.commit().await?;
        Ok(deleted.rows_affected > 0)
    }
}

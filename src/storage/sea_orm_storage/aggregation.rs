//! 分数汇总：已提交评估 → 结果明细 → 最终结果

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{evaluation_result_details, evaluations};
use crate::errors::{BackofficeError, Result};
use crate::models::evaluation_results::entities::{EvaluationResult, ResultStatus};
use crate::models::evaluations::entities::EvaluationStatus;
use crate::utils::scoring;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::debug;

/// 结果下尚未结束的评估数量
pub(super) async fn count_outstanding<C: ConnectionTrait>(conn: &C, result_id: i64) -> Result<u64> {
    let outstanding: Vec<&str> = EvaluationStatus::OUTSTANDING
        .iter()
        .map(|s| s.as_str())
        .collect();
    Evaluations::find()
        .filter(evaluations::Column::EvaluationResultId.eq(result_id))
        .filter(evaluations::Column::Status.is_in(outstanding))
        .count(conn)
        .await
        .map_err(|e| BackofficeError::database_operation(format!("统计未完成评估失败: {e}")))
}

/// 重新计算结果的明细得分与最终得分，并标记为 Completed
pub(super) async fn aggregate_result_in<C: ConnectionTrait>(
    conn: &C,
    result_id: i64,
) -> Result<EvaluationResultModel> {
    let result = EvaluationResults::find_by_id(result_id)
        .one(conn)
        .await
        .map_err(|e| BackofficeError::database_operation(format!("查询评估结果失败: {e}")))?
        .ok_or_else(|| BackofficeError::not_found(format!("Evaluation result {result_id} not found")))?;

    let submitted = Evaluations::find()
        .filter(evaluations::Column::EvaluationResultId.eq(result_id))
        .filter(evaluations::Column::Status.eq(EvaluationStatus::Submitted.as_str()))
        .all(conn)
        .await
        .map_err(|e| BackofficeError::database_operation(format!("查询已提交评估失败: {e}")))?;

    let details = EvaluationResultDetails::find()
        .filter(evaluation_result_details::Column::EvaluationResultId.eq(result_id))
        .all(conn)
        .await
        .map_err(|e| BackofficeError::database_operation(format!("查询结果明细失败: {e}")))?;

    let now = chrono::Utc::now().timestamp();
    let mut scored_details = Vec::with_capacity(details.len());

    for detail in details {
        let (score, weighted_score) = scoring::detail_score(
            detail.weight,
            submitted
                .iter()
                .filter(|e| e.evaluation_template_id == detail.evaluation_template_id)
                .map(|e| (e.weighted_score.unwrap_or(0.0), e.weight.unwrap_or(0.0))),
        );
        scored_details.push((detail.weight, weighted_score));

        let mut model: EvaluationResultDetailActiveModel = detail.into();
        model.score = Set(score);
        model.weighted_score = Set(weighted_score);
        model.updated_at = Set(now);
        model
            .update(conn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("更新结果明细失败: {e}")))?;
    }

    let score = scoring::result_score(scored_details);
    debug!("评估结果 {result_id} 汇总完成，得分: {score:?}");

    let mut model: EvaluationResultActiveModel = result.into();
    model.score = Set(score);
    model.status = Set(ResultStatus::Completed.to_string());
    model.updated_at = Set(now);
    model
        .update(conn)
        .await
        .map_err(|e| BackofficeError::database_operation(format!("更新评估结果失败: {e}")))
}

/// 没有未完成评估时触发汇总，返回是否已汇总
pub(super) async fn finalize_if_done<C: ConnectionTrait>(conn: &C, result_id: i64) -> Result<bool> {
    if count_outstanding(conn, result_id).await? > 0 {
        return Ok(false);
    }
    aggregate_result_in(conn, result_id).await?;
    Ok(true)
}

impl SeaOrmStorage {
    /// 手动重新汇总（幂等），仍有未结束评估时拒绝
    pub async fn aggregate_result_impl(&self, result_id: i64) -> Result<EvaluationResult> {
        let _guard = self.lock_result(result_id).await;

        let txn = self.db.begin().await?;
        let outstanding = count_outstanding(&txn, result_id).await?;
        if outstanding > 0 {
            return Err(BackofficeError::invalid_state(format!(
                "Evaluation result {result_id} still has {outstanding} outstanding evaluations"
            )));
        }
        let result = aggregate_result_in(&txn, result_id).await?;
        txn.commit().await?;

        Ok(result.into_result())
    }
}

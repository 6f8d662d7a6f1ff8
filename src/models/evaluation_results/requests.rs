use serde::Deserialize;
use ts_rs::TS;

use super::entities::ResultStatus;
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation_result.ts")]
pub struct ResultListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<ResultStatus>,
}

#[derive(Debug, Clone)]
pub struct ResultListQuery {
    pub page: u64,
    pub size: u64,
    pub status: Option<ResultStatus>,
}

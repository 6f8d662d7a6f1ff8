//! 评估周期实体

use sea_orm::entity::prelude::*;

use crate::models::evaluation_administrations::entities::{
    AdministrationStatus, EvaluationAdministration,
};
use crate::utils::date::{ts_to_date, ts_to_datetime};
use crate::utils::evaluation_plan::DateWindow;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_administrations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub eval_period_start_date: i64,
    pub eval_period_end_date: i64,
    pub eval_schedule_start_date: i64,
    pub eval_schedule_end_date: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub status: String,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::evaluation_results::Entity")]
    EvaluationResults,
}

impl Related<super::evaluation_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvaluationResults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn parsed_status(&self) -> AdministrationStatus {
        self.status
            .parse()
            .unwrap_or(AdministrationStatus::Draft)
    }

    /// 评估期间
    pub fn period(&self) -> DateWindow {
        DateWindow::new(
            ts_to_date(self.eval_period_start_date),
            ts_to_date(self.eval_period_end_date),
        )
    }

    pub fn into_administration(self) -> EvaluationAdministration {
        let status = self.parsed_status();
        EvaluationAdministration {
            id: self.id,
            name: self.name,
            eval_period_start_date: ts_to_date(self.eval_period_start_date),
            eval_period_end_date: ts_to_date(self.eval_period_end_date),
            eval_schedule_start_date: ts_to_date(self.eval_schedule_start_date),
            eval_schedule_end_date: ts_to_date(self.eval_schedule_end_date),
            remarks: self.remarks,
            status,
            created_by: self.created_by,
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}

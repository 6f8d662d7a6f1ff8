//! 项目实体

use sea_orm::entity::prelude::*;

use crate::models::projects::entities::{Project, ProjectStatus};
use crate::utils::date::{ts_to_date, ts_to_datetime};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub client_name: Option<String>,
    pub status: String,
    pub start_date: i64,
    pub end_date: Option<i64>,
    pub remarks: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project_members::Entity")]
    ProjectMembers,
}

impl Related<super::project_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_project(self) -> Project {
        Project {
            id: self.id,
            name: self.name,
            client_name: self.client_name,
            status: self
                .status
                .parse::<ProjectStatus>()
                .unwrap_or(ProjectStatus::Active),
            start_date: ts_to_date(self.start_date),
            end_date: self.end_date.map(ts_to_date),
            remarks: self.remarks,
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}

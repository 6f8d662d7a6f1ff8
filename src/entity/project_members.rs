//! 项目成员实体

use sea_orm::entity::prelude::*;

use crate::models::projects::entities::ProjectMember;
use crate::utils::date::{ts_to_date, ts_to_datetime};
use crate::utils::evaluation_plan::{DateWindow, MembershipInput};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "project_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub project_id: i64,
    pub employee_id: i64,
    pub project_role_id: i64,
    pub start_date: i64,
    pub end_date: i64,
    pub allocation_rate: f64,
    pub remarks: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id",
        on_delete = "Cascade"
    )]
    Project,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::EmployeeId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Employee,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_project_member(self) -> ProjectMember {
        ProjectMember {
            id: self.id,
            project_id: self.project_id,
            employee_id: self.employee_id,
            project_role_id: self.project_role_id,
            start_date: ts_to_date(self.start_date),
            end_date: ts_to_date(self.end_date),
            allocation_rate: self.allocation_rate,
            remarks: self.remarks,
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }

    pub fn to_membership_input(&self) -> MembershipInput {
        MembershipInput {
            id: self.id,
            project_id: self.project_id,
            employee_id: self.employee_id,
            project_role_id: self.project_role_id,
            window: DateWindow::new(ts_to_date(self.start_date), ts_to_date(self.end_date)),
            allocation_rate: self.allocation_rate,
        }
    }
}

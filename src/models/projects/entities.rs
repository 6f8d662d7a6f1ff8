use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    /// 项目状态
    ProjectStatus, "项目状态", "../frontend/src/types/generated/project.ts" {
        Active => "active",
        Hold => "hold",
        Closed => "closed",
    }
}

// 项目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/project.ts")]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub client_name: Option<String>,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub remarks: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 项目成员（员工在某项目中的一段任职）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/project.ts")]
pub struct ProjectMember {
    pub id: i64,
    pub project_id: i64,
    pub employee_id: i64,
    pub project_role_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// 0-100
    pub allocation_rate: f64,
    pub remarks: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

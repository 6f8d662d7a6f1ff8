use serde::Serialize;
use ts_rs::TS;

use super::entities::{Project, ProjectMember};

// 项目详情（含成员）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/project.ts")]
pub struct ProjectDetailResponse {
    pub project: Project,
    pub members: Vec<ProjectMember>,
}

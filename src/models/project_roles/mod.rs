use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{BackofficeError, Result};

// 项目角色
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/project_role.ts")]
pub struct ProjectRole {
    pub id: i64,
    pub name: String,
    pub short_name: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/project_role.ts")]
pub struct CreateProjectRoleRequest {
    pub name: String,
    pub short_name: String,
}

impl CreateProjectRoleRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BackofficeError::validation("Name is required"));
        }
        if self.short_name.trim().is_empty() {
            return Err(BackofficeError::validation("Short name is required"));
        }
        Ok(())
    }
}

pub mod entities;
pub mod requests;
pub mod responses;

/// 项目列表每页条数
pub const PROJECTS_PER_PAGE: u64 = 10;

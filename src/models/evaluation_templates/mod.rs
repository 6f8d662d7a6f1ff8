pub mod entities;
pub mod requests;
pub mod responses;

/// 模板列表每页条数
pub const TEMPLATES_PER_PAGE: u64 = 20;

pub mod entities;
pub mod requests;
pub mod responses;

/// 评估列表每页条数
pub const EVALUATIONS_PER_PAGE: u64 = 20;

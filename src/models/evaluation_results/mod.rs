pub mod entities;
pub mod requests;
pub mod responses;

/// 结果列表每页条数
pub const RESULTS_PER_PAGE: u64 = 20;

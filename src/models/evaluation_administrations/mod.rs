pub mod entities;
pub mod requests;
pub mod responses;

/// 评估周期列表每页条数
pub const ADMINISTRATIONS_PER_PAGE: u64 = 20;

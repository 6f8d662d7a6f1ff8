pub mod entities;
pub mod requests;
pub mod responses;

/// 用户列表每页条数
pub const USERS_PER_PAGE: u64 = 40;

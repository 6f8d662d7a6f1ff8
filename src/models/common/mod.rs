pub mod pagination;
pub mod response;

pub use pagination::{PageInfo, Paginated, PaginationQuery};
pub use response::{ApiResponse, INTERNAL_ERROR_MESSAGE};

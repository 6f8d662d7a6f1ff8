pub mod date;
pub mod evaluation_plan;
pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod scoring;
pub mod sql;
pub mod validate;

pub use extractor::{SafeContentIdI64, SafeIDI64, SafeMemberIdI64, SafeOptionIdI64};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;

//! SeaORM 实体定义
//!
//! 与 models 中的业务实体分离：存储层用这些实体读写数据库，再通过 `into_xxx()` 转换。

pub mod prelude;

pub mod answer_options;
pub mod answers;
pub mod evaluation_administrations;
pub mod evaluation_ratings;
pub mod evaluation_result_details;
pub mod evaluation_results;
pub mod evaluation_template_contents;
pub mod evaluation_templates;
pub mod evaluations;
pub mod project_members;
pub mod project_roles;
pub mod projects;
pub mod users;

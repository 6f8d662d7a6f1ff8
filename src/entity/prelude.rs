//! 预导入模块

pub use super::answer_options::{
    ActiveModel as AnswerOptionActiveModel, Entity as AnswerOptions, Model as AnswerOptionModel,
};
pub use super::answers::{ActiveModel as AnswerActiveModel, Entity as Answers, Model as AnswerModel};
pub use super::evaluation_administrations::{
    ActiveModel as EvaluationAdministrationActiveModel, Entity as EvaluationAdministrations,
    Model as EvaluationAdministrationModel,
};
pub use super::evaluation_ratings::{
    ActiveModel as EvaluationRatingActiveModel, Entity as EvaluationRatings,
    Model as EvaluationRatingModel,
};
pub use super::evaluation_result_details::{
    ActiveModel as EvaluationResultDetailActiveModel, Entity as EvaluationResultDetails,
    Model as EvaluationResultDetailModel,
};
pub use super::evaluation_results::{
    ActiveModel as EvaluationResultActiveModel, Entity as EvaluationResults,
    Model as EvaluationResultModel,
};
pub use super::evaluation_template_contents::{
    ActiveModel as EvaluationTemplateContentActiveModel, Entity as EvaluationTemplateContents,
    Model as EvaluationTemplateContentModel,
};
pub use super::evaluation_templates::{
    ActiveModel as EvaluationTemplateActiveModel, Entity as EvaluationTemplates,
    Model as EvaluationTemplateModel,
};
pub use super::evaluations::{
    ActiveModel as EvaluationActiveModel, Entity as Evaluations, Model as EvaluationModel,
};
pub use super::project_members::{
    ActiveModel as ProjectMemberActiveModel, Entity as ProjectMembers, Model as ProjectMemberModel,
};
pub use super::project_roles::{
    ActiveModel as ProjectRoleActiveModel, Entity as ProjectRoles, Model as ProjectRoleModel,
};
pub use super::projects::{ActiveModel as ProjectActiveModel, Entity as Projects, Model as ProjectModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};

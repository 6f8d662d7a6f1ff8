use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_core_tables::{
    AnswerOptions, Answers, ProjectMembers, ProjectRoles, Projects, Users,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建评估模板表
        manager
            .create_table(
                Table::create()
                    .table(EvaluationTemplates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationTemplates::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EvaluationTemplates::Name).string().not_null())
                    .col(
                        ColumnDef::new(EvaluationTemplates::DisplayName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationTemplates::EvalueeRoleId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationTemplates::EvaluatorRoleId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EvaluationTemplates::Rate).double().not_null())
                    .col(
                        ColumnDef::new(EvaluationTemplates::AnswerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EvaluationTemplates::Description).text().null())
                    .col(
                        ColumnDef::new(EvaluationTemplates::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(EvaluationTemplates::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationTemplates::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationTemplates::Table, EvaluationTemplates::AnswerId)
                            .to(Answers::Table, Answers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                EvaluationTemplates::Table,
                                EvaluationTemplates::EvalueeRoleId,
                            )
                            .to(ProjectRoles::Table, ProjectRoles::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                EvaluationTemplates::Table,
                                EvaluationTemplates::EvaluatorRoleId,
                            )
                            .to(ProjectRoles::Table, ProjectRoles::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评估模板条目表
        manager
            .create_table(
                Table::create()
                    .table(EvaluationTemplateContents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationTemplateContents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EvaluationTemplateContents::EvaluationTemplateId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationTemplateContents::Name)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationTemplateContents::Description)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationTemplateContents::Rate)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationTemplateContents::SequenceNo)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(EvaluationTemplateContents::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                EvaluationTemplateContents::Table,
                                EvaluationTemplateContents::EvaluationTemplateId,
                            )
                            .to(EvaluationTemplates::Table, EvaluationTemplates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评估周期表
        manager
            .create_table(
                Table::create()
                    .table(EvaluationAdministrations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationAdministrations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EvaluationAdministrations::Name)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationAdministrations::EvalPeriodStartDate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationAdministrations::EvalPeriodEndDate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationAdministrations::EvalScheduleStartDate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationAdministrations::EvalScheduleEndDate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationAdministrations::Remarks)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationAdministrations::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationAdministrations::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationAdministrations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationAdministrations::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                EvaluationAdministrations::Table,
                                EvaluationAdministrations::CreatedBy,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评估结果表
        manager
            .create_table(
                Table::create()
                    .table(EvaluationResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationResults::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResults::EvaluationAdministrationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResults::EmployeeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EvaluationResults::Score).double().null())
                    .col(ColumnDef::new(EvaluationResults::Status).string().not_null())
                    .col(
                        ColumnDef::new(EvaluationResults::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResults::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                EvaluationResults::Table,
                                EvaluationResults::EvaluationAdministrationId,
                            )
                            .to(
                                EvaluationAdministrations::Table,
                                EvaluationAdministrations::Id,
                            )
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationResults::Table, EvaluationResults::EmployeeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评估结果明细表
        manager
            .create_table(
                Table::create()
                    .table(EvaluationResultDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationResultDetails::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResultDetails::EvaluationResultId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResultDetails::EvaluationTemplateId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResultDetails::Weight)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResultDetails::Score)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResultDetails::WeightedScore)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResultDetails::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResultDetails::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                EvaluationResultDetails::Table,
                                EvaluationResultDetails::EvaluationResultId,
                            )
                            .to(EvaluationResults::Table, EvaluationResults::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                EvaluationResultDetails::Table,
                                EvaluationResultDetails::EvaluationTemplateId,
                            )
                            .to(EvaluationTemplates::Table, EvaluationTemplates::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评估任务表
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::EvaluationAdministrationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::EvaluationResultId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::EvaluationTemplateId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::EvaluatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::EvalueeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evaluations::ProjectId).big_integer().null())
                    .col(
                        ColumnDef::new(Evaluations::ProjectMemberId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::ForEvaluation)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Evaluations::EvalStartDate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::EvalEndDate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::PercentInvolvement)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evaluations::Comments).text().null())
                    .col(ColumnDef::new(Evaluations::Score).double().null())
                    .col(ColumnDef::new(Evaluations::Weight).double().null())
                    .col(ColumnDef::new(Evaluations::WeightedScore).double().null())
                    .col(ColumnDef::new(Evaluations::Status).string().not_null())
                    .col(ColumnDef::new(Evaluations::SubmissionMethod).string().null())
                    .col(
                        ColumnDef::new(Evaluations::SubmittedDate)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::EvaluationResultId)
                            .to(EvaluationResults::Table, EvaluationResults::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::EvaluationTemplateId)
                            .to(EvaluationTemplates::Table, EvaluationTemplates::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::ProjectMemberId)
                            .to(ProjectMembers::Table, ProjectMembers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评分表
        manager
            .create_table(
                Table::create()
                    .table(EvaluationRatings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationRatings::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EvaluationRatings::EvaluationAdministrationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationRatings::EvaluationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationRatings::EvaluationTemplateContentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationRatings::AnswerOptionId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationRatings::Percentage)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EvaluationRatings::Rate).double().null())
                    .col(ColumnDef::new(EvaluationRatings::Score).double().null())
                    .col(
                        ColumnDef::new(EvaluationRatings::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationRatings::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationRatings::Table, EvaluationRatings::EvaluationId)
                            .to(Evaluations::Table, Evaluations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                EvaluationRatings::Table,
                                EvaluationRatings::EvaluationTemplateContentId,
                            )
                            .to(
                                EvaluationTemplateContents::Table,
                                EvaluationTemplateContents::Id,
                            )
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationRatings::Table, EvaluationRatings::AnswerOptionId)
                            .to(AnswerOptions::Table, AnswerOptions::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一约束：每个周期每位员工一条结果
        manager
            .create_index(
                Index::create()
                    .name("idx_evaluation_results_admin_employee")
                    .table(EvaluationResults::Table)
                    .col(EvaluationResults::EvaluationAdministrationId)
                    .col(EvaluationResults::EmployeeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 唯一约束：每个结果每个模板一条明细
        manager
            .create_index(
                Index::create()
                    .name("idx_evaluation_result_details_result_template")
                    .table(EvaluationResultDetails::Table)
                    .col(EvaluationResultDetails::EvaluationResultId)
                    .col(EvaluationResultDetails::EvaluationTemplateId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_evaluations_evaluator_id")
                    .table(Evaluations::Table)
                    .col(Evaluations::EvaluatorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_evaluations_result_id")
                    .table(Evaluations::Table)
                    .col(Evaluations::EvaluationResultId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_evaluation_ratings_evaluation_id")
                    .table(EvaluationRatings::Table)
                    .col(EvaluationRatings::EvaluationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EvaluationRatings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(EvaluationResultDetails::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(EvaluationResults::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(EvaluationAdministrations::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(EvaluationTemplateContents::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(EvaluationTemplates::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum EvaluationTemplates {
    #[sea_orm(iden = "evaluation_templates")]
    Table,
    Id,
    Name,
    DisplayName,
    EvalueeRoleId,
    EvaluatorRoleId,
    Rate,
    AnswerId,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EvaluationTemplateContents {
    #[sea_orm(iden = "evaluation_template_contents")]
    Table,
    Id,
    EvaluationTemplateId,
    Name,
    Description,
    Rate,
    SequenceNo,
    IsActive,
}

#[derive(DeriveIden)]
enum EvaluationAdministrations {
    #[sea_orm(iden = "evaluation_administrations")]
    Table,
    Id,
    Name,
    EvalPeriodStartDate,
    EvalPeriodEndDate,
    EvalScheduleStartDate,
    EvalScheduleEndDate,
    Remarks,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EvaluationResults {
    #[sea_orm(iden = "evaluation_results")]
    Table,
    Id,
    EvaluationAdministrationId,
    EmployeeId,
    Score,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EvaluationResultDetails {
    #[sea_orm(iden = "evaluation_result_details")]
    Table,
    Id,
    EvaluationResultId,
    EvaluationTemplateId,
    Weight,
    Score,
    WeightedScore,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Evaluations {
    #[sea_orm(iden = "evaluations")]
    Table,
    Id,
    EvaluationAdministrationId,
    EvaluationResultId,
    EvaluationTemplateId,
    EvaluatorId,
    EvalueeId,
    ProjectId,
    ProjectMemberId,
    ForEvaluation,
    EvalStartDate,
    EvalEndDate,
    PercentInvolvement,
    Comments,
    Score,
    Weight,
    WeightedScore,
    Status,
    SubmissionMethod,
    SubmittedDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EvaluationRatings {
    #[sea_orm(iden = "evaluation_ratings")]
    Table,
    Id,
    EvaluationAdministrationId,
    EvaluationId,
    EvaluationTemplateContentId,
    AnswerOptionId,
    Percentage,
    Rate,
    Score,
    CreatedAt,
    UpdatedAt,
}

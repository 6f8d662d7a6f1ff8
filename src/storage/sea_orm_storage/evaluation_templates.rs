use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{evaluation_template_contents, evaluation_templates, evaluations};
use crate::errors::{BackofficeError, Result};
use crate::models::{
    Paginated,
    evaluation_templates::{
        entities::{EvaluationTemplate, EvaluationTemplateContent},
        requests::{
            CreateTemplateContentRequest, CreateTemplateRequest, TemplateListQuery,
            UpdateTemplateRequest,
        },
        responses::TemplateDetailResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

fn content_model(template_id: i64, req: CreateTemplateContentRequest) -> EvaluationTemplateContentActiveModel {
    EvaluationTemplateContentActiveModel {
        evaluation_template_id: Set(template_id),
        name: Set(req.name.trim().to_string()),
        description: Set(req.description),
        rate: Set(req.rate),
        sequence_no: Set(req.sequence_no),
        is_active: Set(req.is_active),
        ..Default::default()
    }
}

/// 模板的评分项，按序号排列
pub(crate) async fn find_contents<C: ConnectionTrait>(
    conn: &C,
    template_id: i64,
    active_only: bool,
) -> Result<Vec<EvaluationTemplateContentModel>> {
    let mut select = EvaluationTemplateContents::find()
        .filter(evaluation_template_contents::Column::EvaluationTemplateId.eq(template_id));
    if active_only {
        select = select.filter(evaluation_template_contents::Column::IsActive.eq(true));
    }
    select
        .order_by_asc(evaluation_template_contents::Column::SequenceNo)
        .order_by_asc(evaluation_template_contents::Column::Id)
        .all(conn)
        .await
        .map_err(|e| BackofficeError::database_operation(format!("查询模板评分项失败: {e}")))
}

impl SeaOrmStorage {
    pub async fn list_templates_impl(
        &self,
        query: TemplateListQuery,
    ) -> Result<Paginated<EvaluationTemplate>> {
        let mut select = EvaluationTemplates::find();

        if let Some(role_id) = query.evaluee_role_id {
            select = select.filter(evaluation_templates::Column::EvalueeRoleId.eq(role_id));
        }
        if let Some(role_id) = query.evaluator_role_id {
            select = select.filter(evaluation_templates::Column::EvaluatorRoleId.eq(role_id));
        }
        if let Some(is_active) = query.is_active {
            select = select.filter(evaluation_templates::Column::IsActive.eq(is_active));
        }

        select = select.order_by_asc(evaluation_templates::Column::Id);

        self.fetch_paginated(select, query.page, query.size, "评估模板", |m| {
            m.into_template()
        })
        .await
    }

    pub async fn get_template_impl(&self, id: i64) -> Result<Option<TemplateDetailResponse>> {
        let Some(template) = EvaluationTemplates::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询评估模板失败: {e}")))?
        else {
            return Ok(None);
        };

        let contents = find_contents(&self.db, id, false).await?;
        Ok(Some(TemplateDetailResponse {
            template: template.into_template(),
            contents: contents.into_iter().map(|m| m.into_content()).collect(),
        }))
    }

    /// 创建模板及其评分项
    pub async fn create_template_impl(
        &self,
        req: CreateTemplateRequest,
    ) -> Result<TemplateDetailResponse> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let template = EvaluationTemplateActiveModel {
            name: Set(req.name.trim().to_string()),
            display_name: Set(req.display_name.trim().to_string()),
            evaluee_role_id: Set(req.evaluee_role_id),
            evaluator_role_id: Set(req.evaluator_role_id),
            rate: Set(req.rate),
            answer_id: Set(req.answer_id),
            description: Set(req.description),
            is_active: Set(req.is_active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| BackofficeError::database_operation(format!("创建评估模板失败: {e}")))?;

        let mut contents = Vec::with_capacity(req.contents.len());
        for content in req.contents {
            let saved = content_model(template.id, content)
                .insert(&txn)
                .await
                .map_err(|e| {
                    BackofficeError::database_operation(format!("创建模板评分项失败: {e}"))
                })?;
            contents.push(saved.into_content());
        }

        txn.commit().await?;

        Ok(TemplateDetailResponse {
            template: template.into_template(),
            contents,
        })
    }

    pub async fn update_template_impl(
        &self,
        id: i64,
        update: UpdateTemplateRequest,
    ) -> Result<Option<EvaluationTemplate>> {
        let Some(existing) = EvaluationTemplates::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询评估模板失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: EvaluationTemplateActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(display_name) = update.display_name {
            model.display_name = Set(display_name);
        }
        if let Some(role_id) = update.evaluee_role_id {
            model.evaluee_role_id = Set(role_id);
        }
        if let Some(role_id) = update.evaluator_role_id {
            model.evaluator_role_id = Set(role_id);
        }
        if let Some(rate) = update.rate {
            model.rate = Set(rate);
        }
        if let Some(answer_id) = update.answer_id {
            model.answer_id = Set(answer_id);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("更新评估模板失败: {e}")))?;
        Ok(Some(result.into_template()))
    }

    /// 删除模板；已被评估引用的模板不可删除
    pub async fn delete_template_impl(&self, id: i64) -> Result<bool> {
        let in_use = Evaluations::find()
            .filter(evaluations::Column::EvaluationTemplateId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询评估失败: {e}")))?;
        if in_use > 0 {
            return Err(BackofficeError::conflict(
                "Template is used by existing evaluations",
            ));
        }

        let txn = self.db.begin().await?;
        EvaluationTemplateContents::delete_many()
            .filter(evaluation_template_contents::Column::EvaluationTemplateId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("删除模板评分项失败: {e}")))?;
        let result = EvaluationTemplates::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("删除评估模板失败: {e}")))?;
        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn add_template_content_impl(
        &self,
        template_id: i64,
        req: CreateTemplateContentRequest,
    ) -> Result<EvaluationTemplateContent> {
        let saved = content_model(template_id, req)
            .insert(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("创建模板评分项失败: {e}")))?;
        Ok(saved.into_content())
    }

    pub async fn delete_template_content_impl(
        &self,
        template_id: i64,
        content_id: i64,
    ) -> Result<bool> {
        let result = EvaluationTemplateContents::delete_many()
            .filter(evaluation_template_contents::Column::Id.eq(content_id))
            .filter(evaluation_template_contents::Column::EvaluationTemplateId.eq(template_id))
            .exec(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("删除模板评分项失败: {e}")))?;
        Ok(result.rows_affected > 0)
    }
}

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{answer_options, answers};
use crate::errors::{BackofficeError, Result};
use crate::models::answers::{
    Answer, AnswerOption, CreateAnswerOptionRequest, CreateAnswerRequest,
    UpdateAnswerOptionRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn list_answers_impl(&self) -> Result<Vec<Answer>> {
        let rows = Answers::find()
            .order_by_asc(answers::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询答案量表失败: {e}")))?;
        Ok(rows.into_iter().map(|m| m.into_answer()).collect())
    }

    pub async fn get_answer_impl(&self, id: i64) -> Result<Option<Answer>> {
        let row = Answers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询答案量表失败: {e}")))?;
        Ok(row.map(|m| m.into_answer()))
    }

    pub async fn create_answer_impl(&self, req: CreateAnswerRequest) -> Result<Answer> {
        let model = AnswerActiveModel {
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("创建答案量表失败: {e}")))?;
        Ok(result.into_answer())
    }

    /// 量表下的选项，按序号排列
    pub async fn list_answer_options_impl(&self, answer_id: i64) -> Result<Vec<AnswerOption>> {
        let rows = AnswerOptions::find()
            .filter(answer_options::Column::AnswerId.eq(answer_id))
            .order_by_asc(answer_options::Column::SequenceNo)
            .order_by_asc(answer_options::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询答案选项失败: {e}")))?;
        Ok(rows.into_iter().map(|m| m.into_answer_option()).collect())
    }

    pub async fn get_answer_option_impl(&self, id: i64) -> Result<Option<AnswerOption>> {
        let row = AnswerOptions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询答案选项失败: {e}")))?;
        Ok(row.map(|m| m.into_answer_option()))
    }

    pub async fn create_answer_option_impl(
        &self,
        answer_id: i64,
        req: CreateAnswerOptionRequest,
    ) -> Result<AnswerOption> {
        let model = AnswerOptionActiveModel {
            answer_id: Set(answer_id),
            name: Set(req.name.trim().to_string()),
            display_name: Set(req.display_name.trim().to_string()),
            rate: Set(req.rate),
            sequence_no: Set(req.sequence_no),
            description: Set(req.description),
            ..Default::default()
        };
        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("创建答案选项失败: {e}")))?;
        Ok(result.into_answer_option())
    }

    pub async fn update_answer_option_impl(
        &self,
        id: i64,
        update: UpdateAnswerOptionRequest,
    ) -> Result<Option<AnswerOption>> {
        let Some(existing) = AnswerOptions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("查询答案选项失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: AnswerOptionActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(display_name) = update.display_name {
            model.display_name = Set(display_name);
        }
        if let Some(rate) = update.rate {
            model.rate = Set(rate);
        }
        if let Some(sequence_no) = update.sequence_no {
            model.sequence_no = Set(sequence_no);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("更新答案选项失败: {e}")))?;
        Ok(Some(result.into_answer_option()))
    }

    pub async fn delete_answer_option_impl(&self, id: i64) -> Result<bool> {
        let result = AnswerOptions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| BackofficeError::database_operation(format!("删除答案选项失败: {e}")))?;
        Ok(result.rows_affected > 0)
    }
}

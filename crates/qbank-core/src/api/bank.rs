//! Question banks, their chapters and their questions

use std::fmt::Display;

use serde_json::{json, Value};

use crate::api::segment;
use crate::client::LocalClient;
use crate::error::Result;
use crate::models::{BankCreate, BankUpdate, QuestionCreate, QuestionUpdate};
use crate::transport::RequestDescriptor;

#[derive(Debug, Clone)]
pub struct BankApi {
    client: LocalClient,
}

impl BankApi {
    pub fn new(client: LocalClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<Value> {
        self.client.call(RequestDescriptor::get("/banks")).await
    }

    pub async fn get(&self, id: impl Display) -> Result<Value> {
        self.client
            .call(RequestDescriptor::get(format!("/banks/{}", segment(id))))
            .await
    }

    pub async fn create(&self, bank: &BankCreate) -> Result<Value> {
        self.client.call(RequestDescriptor::post("/banks").json(bank)?).await
    }

    pub async fn update(&self, id: impl Display, changes: &BankUpdate) -> Result<Value> {
        let request = RequestDescriptor::put(format!("/banks/{}", segment(id))).json(changes)?;
        self.client.call(request).await
    }

    pub async fn delete(&self, id: impl Display) -> Result<Value> {
        self.client
            .call(RequestDescriptor::delete(format!("/banks/{}", segment(id))))
            .await
    }

    pub async fn get_chapters(&self, bank_id: impl Display) -> Result<Value> {
        self.client
            .call(RequestDescriptor::get(format!("/banks/{}/chapters", segment(bank_id))))
            .await
    }

    pub async fn add_chapter(&self, bank_id: impl Display, chapter: &str) -> Result<Value> {
        let request = RequestDescriptor::post(format!("/banks/{}/chapters", segment(bank_id)))
            .json(&json!({ "chapter": chapter }))?;
        self.client.call(request).await
    }

    /// Chapter names are free text and may contain `/`, spaces or non-ASCII
    /// characters; the name is encoded as a single segment.
    pub async fn delete_chapter(&self, bank_id: impl Display, chapter: &str) -> Result<Value> {
        let path = format!(
            "/banks/{}/chapters/{}",
            segment(bank_id),
            segment(chapter)
        );
        self.client.call(RequestDescriptor::delete(path)).await
    }

    pub async fn get_questions(&self, bank_id: impl Display) -> Result<Value> {
        self.client
            .call(RequestDescriptor::get(format!("/banks/{}/questions", segment(bank_id))))
            .await
    }

    pub async fn add_question(&self, bank_id: impl Display, question: &QuestionCreate) -> Result<Value> {
        let request = RequestDescriptor::post(format!("/banks/{}/questions", segment(bank_id)))
            .json(question)?;
        self.client.call(request).await
    }

    pub async fn update_question(
        &self,
        bank_id: impl Display,
        question_id: impl Display,
        changes: &QuestionUpdate,
    ) -> Result<Value> {
        let path = format!(
            "/banks/{}/questions/{}",
            segment(bank_id),
            segment(question_id)
        );
        self.client.call(RequestDescriptor::put(path).json(changes)?).await
    }

    pub async fn delete_question(&self, bank_id: impl Display, question_id: impl Display) -> Result<Value> {
        let path = format!(
            "/banks/{}/questions/{}",
            segment(bank_id),
            segment(question_id)
        );
        self.client.call(RequestDescriptor::delete(path)).await
    }

    pub async fn batch_add_questions(
        &self,
        bank_id: impl Display,
        questions: &[QuestionCreate],
    ) -> Result<Value> {
        let request =
            RequestDescriptor::post(format!("/banks/{}/questions/batch", segment(bank_id)))
                .json(&json!({ "questions": questions }))?;
        self.client.call(request).await
    }
}

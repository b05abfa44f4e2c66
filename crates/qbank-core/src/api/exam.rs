//! Exam sessions

use std::fmt::Display;

use serde_json::Value;

use crate::api::segment;
use crate::client::LocalClient;
use crate::error::Result;
use crate::models::AnswerSubmit;
use crate::transport::RequestDescriptor;

#[derive(Debug, Clone)]
pub struct ExamApi {
    client: LocalClient,
}

impl ExamApi {
    pub fn new(client: LocalClient) -> Self {
        Self { client }
    }

    /// Start an exam on a paper; the payload carries the new exam id
    pub async fn start(&self, paper_id: impl Display) -> Result<Value> {
        self.client
            .call(RequestDescriptor::post(format!("/exam/start/{}", segment(paper_id))))
            .await
    }

    pub async fn submit_answer(&self, exam_id: impl Display, answer: &AnswerSubmit) -> Result<Value> {
        let request =
            RequestDescriptor::post(format!("/exam/{}/answer", segment(exam_id))).json(answer)?;
        self.client.call(request).await
    }

    /// Finish the exam; the payload is the scored result
    pub async fn finish(&self, exam_id: impl Display) -> Result<Value> {
        self.client
            .call(RequestDescriptor::post(format!("/exam/{}/submit", segment(exam_id))))
            .await
    }

    pub async fn get_in_progress(&self) -> Result<Value> {
        self.client.call(RequestDescriptor::get("/exam/in-progress")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Answer;
    use crate::test_support::local_harness;
    use crate::transport::RequestBody;
    use serde_json::json;

    #[tokio::test]
    async fn test_start_and_finish_send_no_body() {
        let harness = local_harness();
        let api = ExamApi::new(harness.client.clone());

        api.start("p1").await.unwrap();
        api.finish("e1").await.unwrap();

        let requests = harness.transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].path, "/exam/start/p1");
        assert_eq!(requests[0].body, RequestBody::Empty);
        assert_eq!(requests[1].path, "/exam/e1/submit");
        assert_eq!(requests[1].body, RequestBody::Empty);
    }

    #[tokio::test]
    async fn test_submit_answer_body() {
        let harness = local_harness();
        let answer = AnswerSubmit {
            question_id: "q3".to_string(),
            answer: Answer::Flag(false),
        };

        ExamApi::new(harness.client.clone())
            .submit_answer("e1", &answer)
            .await
            .unwrap();

        let request = harness.transport.single_request();
        assert_eq!(request.path, "/exam/e1/answer");
        assert_eq!(
            request.body,
            RequestBody::Json(json!({"question_id": "q3", "answer": false}))
        );
    }
}

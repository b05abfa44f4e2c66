//! Request models for the local server and the marketplace
//!
//! Field names and defaults match what the servers accept. Optional fields on
//! update types are left out of the body when unset, so the server keeps the
//! stored value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kind of question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Single choice
    #[default]
    Single,
    /// Multiple choice
    Multiple,
    /// True/false
    Judge,
    /// Fill in the blank
    Fill,
}

/// An answer: option letters, free text, or a true/false verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Flag(bool),
    Choices(Vec<String>),
    Text(String),
}

impl Default for Answer {
    fn default() -> Self {
        Answer::Text(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BankCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BankUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCreate {
    #[serde(rename = "type", default)]
    pub kind: QuestionType,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: Answer,
    #[serde(default)]
    pub explanation: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_difficulty() -> u8 {
    3
}

impl QuestionCreate {
    pub fn new(kind: QuestionType, question: impl Into<String>) -> Self {
        Self {
            kind,
            question: question.into(),
            options: Vec::new(),
            answer: Answer::default(),
            explanation: String::new(),
            difficulty: default_difficulty(),
            tags: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestionUpdate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<QuestionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<Answer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Parameters for assembling a paper from one or more banks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperGenerateRequest {
    pub title: String,
    pub description: String,
    /// Minutes
    pub time_limit: u32,
    pub bank_ids: Vec<String>,
    pub single_count: u32,
    pub multiple_count: u32,
    pub judge_count: u32,
    pub fill_count: u32,
    pub min_difficulty: u8,
    pub max_difficulty: u8,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_rules: Option<BTreeMap<String, f64>>,
}

impl Default for PaperGenerateRequest {
    fn default() -> Self {
        Self {
            title: "新试卷".to_string(),
            description: String::new(),
            time_limit: 60,
            bank_ids: Vec::new(),
            single_count: 10,
            multiple_count: 5,
            judge_count: 5,
            fill_count: 0,
            min_difficulty: 1,
            max_difficulty: 5,
            tags: Vec::new(),
            score_rules: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmit {
    pub question_id: String,
    pub answer: Answer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiGenerateRequest {
    pub topic: String,
    #[serde(default = "default_generate_count")]
    pub count: u32,
    #[serde(default = "default_type_distribution")]
    pub type_distribution: String,
    #[serde(default = "default_min_difficulty")]
    pub difficulty_min: u8,
    #[serde(default = "default_max_difficulty")]
    pub difficulty_max: u8,
}

fn default_generate_count() -> u32 {
    5
}

fn default_type_distribution() -> String {
    "单选题为主，适当加入多选题和判断题".to_string()
}

fn default_min_difficulty() -> u8 {
    1
}

fn default_max_difficulty() -> u8 {
    5
}

impl AiGenerateRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            count: default_generate_count(),
            type_distribution: default_type_distribution(),
            difficulty_min: default_min_difficulty(),
            difficulty_max: default_max_difficulty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AiConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vision_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PathConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banks_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub papers_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites_file: Option<String>,
}

/// Which data sets an export or import covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSelection {
    pub include_banks: bool,
    pub include_papers: bool,
    pub include_results: bool,
    pub include_favorites: bool,
    pub include_ai_config: bool,
}

impl Default for DataSelection {
    fn default() -> Self {
        Self {
            include_banks: true,
            include_papers: true,
            include_results: true,
            include_favorites: true,
            include_ai_config: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub export_path: String,
    #[serde(flatten)]
    pub selection: DataSelection,
}

impl ExportRequest {
    pub fn new(export_path: impl Into<String>) -> Self {
        Self {
            export_path: export_path.into(),
            selection: DataSelection::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequest {
    pub import_path: String,
    #[serde(flatten)]
    pub selection: DataSelection,
}

impl ImportRequest {
    pub fn new(import_path: impl Into<String>) -> Self {
        Self {
            import_path: import_path.into(),
            selection: DataSelection::default(),
        }
    }
}

/// Candidate AI settings to test without saving them
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AiCheckParams {
    pub api_base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

impl AiCheckParams {
    pub fn to_query(&self) -> Vec<(String, String)> {
        [
            ("api_base_url", &self.api_base_url),
            ("api_key", &self.api_key),
            ("model", &self.model),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key.to_string(), v.clone())))
        .collect()
    }
}

/// Options for the native file picker
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectFileParams {
    pub title: Option<String>,
    /// Filter in `Label (*.ext)|*.ext` form
    pub filetypes: Option<String>,
}

impl SelectFileParams {
    pub fn to_query(&self) -> Vec<(String, String)> {
        [("title", &self.title), ("filetypes", &self.filetypes)]
            .into_iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| (key.to_string(), v.clone())))
            .collect()
    }
}

/// Free-form marketplace filters (category, subject, paging, sorting)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarketQuery {
    params: BTreeMap<String, String>,
}

impl MarketQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    pub fn category(self, category: impl ToString) -> Self {
        self.param("category", category)
    }

    pub fn subject(self, subject: impl ToString) -> Self {
        self.param("subject", subject)
    }

    pub fn page(self, page: u32) -> Self {
        self.param("page", page)
    }

    pub fn page_size(self, page_size: u32) -> Self {
        self.param("page_size", page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_question_create_shape() {
        let mut question = QuestionCreate::new(QuestionType::Multiple, "Which are prime?");
        question.options = vec!["2".into(), "4".into(), "5".into()];
        question.answer = Answer::Choices(vec!["A".into(), "C".into()]);

        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["type"], "multiple");
        assert_eq!(value["answer"], json!(["A", "C"]));
        assert_eq!(value["difficulty"], 3);
    }

    #[test]
    fn test_answer_untagged() {
        let flag: Answer = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(flag, Answer::Flag(true));
        let text: Answer = serde_json::from_value(json!("B")).unwrap();
        assert_eq!(text, Answer::Text("B".into()));
    }

    #[test]
    fn test_updates_skip_unset_fields() {
        let update = BankUpdate {
            name: Some("Physics".into()),
            ..BankUpdate::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"name": "Physics"}));
    }

    #[test]
    fn test_export_request_flattens_selection() {
        let mut request = ExportRequest::new("D:/backup");
        request.selection.include_ai_config = false;

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["export_path"], "D:/backup");
        assert_eq!(value["include_banks"], true);
        assert_eq!(value["include_ai_config"], false);
    }

    #[test]
    fn test_paper_defaults() {
        let request = PaperGenerateRequest::default();
        assert_eq!(request.time_limit, 60);
        assert_eq!(request.single_count + request.multiple_count + request.judge_count, 20);
        assert!(serde_json::to_value(&request).unwrap().get("score_rules").is_none());
    }

    #[test]
    fn test_query_helpers_omit_unset() {
        let params = AiCheckParams {
            model: Some("gpt-4o".into()),
            ..AiCheckParams::default()
        };
        assert_eq!(params.to_query(), vec![("model".to_string(), "gpt-4o".to_string())]);

        let query = MarketQuery::new().subject("math").category("exam");
        assert_eq!(
            query.to_query(),
            vec![
                ("category".to_string(), "exam".to_string()),
                ("subject".to_string(), "math".to_string()),
            ]
        );
    }
}

use serde::{Deserialize, Serialize};

/// Word positions judged relevant to a label, with one confidence score per
/// position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub index: Vec<i64>,
    pub scores: Vec<f64>,
}

impl Annotation {
    pub fn new(index: Vec<i64>, scores: Vec<f64>) -> Self {
        Self { index, scores }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty() && self.scores.is_empty()
    }

    pub fn is_aligned(&self) -> bool {
        self.index.len() == self.scores.len()
    }
}

/// How a single article's annotation attempt ended. Only `Annotated` carries
/// non-empty lists; every other outcome leaves the article with empty ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationOutcome {
    /// At least one of the two lists was found in the reply.
    Annotated,
    /// The reply matched neither list.
    NoMatch,
    /// A list was found but held a token that is not a number.
    Malformed,
    /// The request, the response envelope, or the record itself was unusable.
    Failed,
}

impl std::fmt::Display for AnnotationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AnnotationOutcome::Annotated => "annotated",
            AnnotationOutcome::NoMatch => "no_match",
            AnnotationOutcome::Malformed => "malformed",
            AnnotationOutcome::Failed => "failed",
        };
        f.write_str(name)
    }
}

// Chat-completion wire format

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: String,
}

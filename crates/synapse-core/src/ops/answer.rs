//! Canned assistant answers

use super::{OperationKind, ProgressReporter, SimulatedOperation};
use async_trait::async_trait;
use std::time::Duration;

/// Prompt sent to the assistant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRequest {
    pub prompt: String,
    /// Names of files the search engine matched, when the prompt came from a search
    pub supporting: Option<Vec<String>>,
}

impl AnswerRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            supporting: None,
        }
    }

    pub fn with_supporting(mut self, names: Vec<String>) -> Self {
        self.supporting = Some(names);
        self
    }
}

/// Produces a templated answer after a fixed delay. There is no retrieval.
#[derive(Debug, Clone)]
pub struct AssistantAnswer {
    delay: Duration,
}

impl AssistantAnswer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Build the answer body for a request
    pub fn compose(request: &AnswerRequest) -> String {
        let findings = match request.supporting.as_deref() {
            None => vec![
                "Found 3 related documents in your workspace".to_string(),
                "Key information extracted from Q4_Report.pdf and Budget_2024.xlsx".to_string(),
                "Cross-referenced data shows consistent patterns".to_string(),
            ],
            Some([]) => vec![
                "No files matched the search filters directly".to_string(),
                "Answering from general workspace context instead".to_string(),
            ],
            Some(names) => {
                let noun = if names.len() == 1 { "document" } else { "documents" };
                let shown: Vec<&str> = names.iter().take(3).map(String::as_str).collect();
                let mut lines = vec![
                    format!("Found {} related {} in your workspace", names.len(), noun),
                    format!("Key information extracted from {}", join_names(&shown)),
                ];
                if names.len() > 1 {
                    lines.push("Cross-referenced data shows consistent patterns".to_string());
                }
                lines
            }
        };

        let bullets: Vec<String> = findings.iter().map(|line| format!("• {}", line)).collect();
        format!(
            "I've analyzed your query: \"{}\". Based on the files in your workspace, I found relevant information across multiple documents. Let me synthesize the key insights for you.\n\nHere's what I discovered:\n{}\n\nWould you like me to dive deeper into any specific aspect?",
            request.prompt,
            bullets.join("\n")
        )
    }
}

fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [one] => one.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

#[async_trait]
impl SimulatedOperation for AssistantAnswer {
    type Input = AnswerRequest;
    type Output = String;

    fn kind(&self) -> OperationKind {
        OperationKind::AssistantAnswer
    }

    async fn run(&self, request: AnswerRequest, _progress: &ProgressReporter<String>) -> Result<String, String> {
        tokio::time::sleep(self.delay).await;
        Ok(Self::compose(&request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::start;
    use std::sync::Arc;

    #[test]
    fn test_canned_body_without_search_context() {
        let body = AssistantAnswer::compose(&AnswerRequest::new("what changed?"));
        assert!(body.starts_with("I've analyzed your query: \"what changed?\"."));
        assert!(body.contains("• Found 3 related documents in your workspace"));
        assert!(body.ends_with("Would you like me to dive deeper into any specific aspect?"));
    }

    #[test]
    fn test_body_lists_supporting_files() {
        let request = AnswerRequest::new("revenue").with_supporting(vec![
            "Q4_Report.pdf".to_string(),
            "Budget_2024.xlsx".to_string(),
        ]);
        let body = AssistantAnswer::compose(&request);
        assert!(body.contains("• Found 2 related documents in your workspace"));
        assert!(body.contains("• Key information extracted from Q4_Report.pdf and Budget_2024.xlsx"));
    }

    #[test]
    fn test_body_with_no_matches() {
        let request = AnswerRequest::new("zebra").with_supporting(vec![]);
        let body = AssistantAnswer::compose(&request);
        assert!(body.contains("• No files matched the search filters directly"));
    }

    #[test]
    fn test_join_names() {
        assert_eq!(join_names(&["a"]), "a");
        assert_eq!(join_names(&["a", "b", "c"]), "a, b and c");
    }

    #[tokio::test(start_paused = true)]
    async fn test_answer_arrives_after_delay() {
        let op = Arc::new(AssistantAnswer::new(Duration::from_millis(1500)));
        let started = tokio::time::Instant::now();
        let body = start(op, AnswerRequest::new("hello")).wait().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert!(body.contains("\"hello\""));
    }
}

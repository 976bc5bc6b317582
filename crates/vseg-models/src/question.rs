//! User questions submitted for AI segment finding.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One question row from the AI cut form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Question {
    /// Row identity; unrelated to the text, duplicates are allowed
    pub id: Uuid,
    pub text: String,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
        }
    }

    /// An empty row, as added by "Add Question".
    pub fn blank() -> Self {
        Self::new(String::new())
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Trimmed texts of all non-blank questions, in input order.
pub fn collect_question_texts(questions: &[Question]) -> Vec<String> {
    questions
        .iter()
        .filter(|q| !q.is_blank())
        .map(|q| q.text.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_rows_are_dropped() {
        let questions = vec![
            Question::new("  When was the Eiffel Tower built? "),
            Question::blank(),
            Question::new("\t\n"),
            Question::new("Who designed it?"),
        ];
        assert_eq!(
            collect_question_texts(&questions),
            vec!["When was the Eiffel Tower built?", "Who designed it?"]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let questions = vec![Question::new("Q"), Question::new("Q")];
        assert_ne!(questions[0].id, questions[1].id);
        assert_eq!(collect_question_texts(&questions).len(), 2);
    }
}

use async_trait::async_trait;

use super::{GenerateError, TextGenerator};
use crate::nlp::{intent, sentiment};
use crate::types::{IntentLabel, SentimentLabel};

/// Offline backend that answers from a fixed table keyed by the intent of the
/// prompt's last `User:` line. Deterministic, so it is the default backend
/// and a stand-in for a real model in tests and demos.
#[derive(Debug, Default)]
pub struct CannedGenerator;

impl CannedGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    fn name(&self) -> &str {
        "canned"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let message = last_user_line(prompt).unwrap_or(prompt);
        let intent = intent::recognize(message).label;
        let mut reply = String::new();
        if sentiment::analyze(message).label == SentimentLabel::Negative {
            reply.push_str("I understand your frustration. ");
        }
        reply.push_str(response_for(intent));
        Ok(reply)
    }
}

/// Text after the final `User: ` marker in a prompt.
fn last_user_line(prompt: &str) -> Option<&str> {
    prompt
        .lines()
        .rev()
        .find_map(|line| line.strip_prefix("User: "))
}

fn response_for(intent: IntentLabel) -> &'static str {
    match intent {
        IntentLabel::Greeting => "Hello! How can I help you today?",
        IntentLabel::Farewell => "Goodbye! Have a great day!",
        IntentLabel::Question => "That's a great question! Let me help with that.",
        IntentLabel::Help => "I'm here to help! What do you need?",
        IntentLabel::Booking => "I can help you with that booking.",
        IntentLabel::Complaint => "I'm sorry about this issue. Let me help fix it.",
        IntentLabel::Thanks => "You're welcome! Happy to help!",
        IntentLabel::Denial => "No problem! Anything else I can do?",
        IntentLabel::Information | IntentLabel::Confirmation | IntentLabel::General => {
            "I understand. How can I assist you?"
        }
    }
}

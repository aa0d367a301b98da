use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of intents produced by the weighted classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentLabel {
    Greeting,
    Farewell,
    Question,
    Help,
    Booking,
    Complaint,
    Thanks,
    Information,
    Confirmation,
    Denial,
    General,
}

impl IntentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentLabel::Greeting => "greeting",
            IntentLabel::Farewell => "farewell",
            IntentLabel::Question => "question",
            IntentLabel::Help => "help",
            IntentLabel::Booking => "booking",
            IntentLabel::Complaint => "complaint",
            IntentLabel::Thanks => "thanks",
            IntentLabel::Information => "information",
            IntentLabel::Confirmation => "confirmation",
            IntentLabel::Denial => "denial",
            IntentLabel::General => "general",
        }
    }
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best intent for a message. `confidence` is always in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    pub label: IntentLabel,
    pub confidence: f32,
}

/// Labels of the presence-based classifier, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickIntent {
    Greeting,
    Question,
    Gratitude,
    HelpRequest,
    Explanation,
    Statement,
}

impl QuickIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuickIntent::Greeting => "greeting",
            QuickIntent::Question => "question",
            QuickIntent::Gratitude => "gratitude",
            QuickIntent::HelpRequest => "help_request",
            QuickIntent::Explanation => "explanation",
            QuickIntent::Statement => "statement",
        }
    }
}

impl fmt::Display for QuickIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polarity of a message. `score` is the signed keyword count difference
/// (positive hits minus negative hits); `label` follows its sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub score: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Email,
    Url,
    Phone,
    Date,
    Time,
    Money,
    Number,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Email => "EMAIL",
            EntityKind::Url => "URL",
            EntityKind::Phone => "PHONE",
            EntityKind::Date => "DATE",
            EntityKind::Time => "TIME",
            EntityKind::Money => "MONEY",
            EntityKind::Number => "NUMBER",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A span of the input recognised by one of the extraction patterns.
/// Offsets are byte offsets into the original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub start: usize,
    pub end: usize,
}

/// Everything the classifiers say about one raw message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub intent: IntentResult,
    pub quick_intent: QuickIntent,
    pub sentiment: SentimentResult,
    pub entities: Vec<Entity>,
}

/// Which stage of the response pipeline produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    NameAssertion,
    NameRecall,
    FactAssertion,
    PreferenceAssertion,
    FactRecall,
    KnowledgeBase,
    CannedRule,
    Fallback,
}

impl ReplySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplySource::NameAssertion => "name_assertion",
            ReplySource::NameRecall => "name_recall",
            ReplySource::FactAssertion => "fact_assertion",
            ReplySource::PreferenceAssertion => "preference_assertion",
            ReplySource::FactRecall => "fact_recall",
            ReplySource::KnowledgeBase => "knowledge_base",
            ReplySource::CannedRule => "canned_rule",
            ReplySource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for ReplySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of handling one chat message.
///
/// Wire format:
/// `{"reply": "...", "intent": "greeting", "sentiment": "neutral", "entities": [...], "latency_ms": 3, ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub intent: IntentLabel,
    pub intent_confidence: f32,
    pub quick_intent: QuickIntent,
    pub sentiment: SentimentLabel,
    pub sentiment_score: f32,
    pub entities: Vec<Entity>,
    pub source: ReplySource,
    pub latency_ms: u64,
}

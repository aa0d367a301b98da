use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who produced a memory entry. `System` entries are annotations, not turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Bot,
    System,
}

impl Role {
    /// Capitalised role name used when rendering history into a prompt.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Bot => "Bot",
            Role::System => "System",
        }
    }
}

/// Stored user preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    ShortAnswers,
}

impl Preference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preference::ShortAnswers => "short_answers",
        }
    }
}

/// Content of a memory entry: a conversation turn or a structured annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryContent {
    Text { text: String },
    Name { name: String },
    Fact { prefix: String, value: String },
    Preference { preference: Preference },
}

impl EntryContent {
    /// Whether this content is a structured annotation rather than a turn.
    pub fn is_annotation(&self) -> bool {
        !matches!(self, EntryContent::Text { .. })
    }
}

/// Renders annotations in their tagged form (`name:Ada`, `fact:i like tea`,
/// `pref:short_answers`) and turns as their plain text.
impl fmt::Display for EntryContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryContent::Text { text } => f.write_str(text),
            EntryContent::Name { name } => write!(f, "name:{name}"),
            EntryContent::Fact { prefix, value } => write!(f, "fact:{prefix}{value}"),
            EntryContent::Preference { preference } => write!(f, "pref:{}", preference.as_str()),
        }
    }
}

/// One append-only element of a session's memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub role: Role,
    pub content: EntryContent,
    pub recorded_at: DateTime<Utc>,
}

impl MemoryEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, EntryContent::Text { text: text.into() })
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Role::Bot, EntryContent::Text { text: text.into() })
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::new(Role::System, EntryContent::Name { name: name.into() })
    }

    pub fn fact(prefix: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            Role::System,
            EntryContent::Fact {
                prefix: prefix.into(),
                value: value.into(),
            },
        )
    }

    pub fn preference(preference: Preference) -> Self {
        Self::new(Role::System, EntryContent::Preference { preference })
    }

    fn new(role: Role, content: EntryContent) -> Self {
        Self {
            role,
            content,
            recorded_at: Utc::now(),
        }
    }

    /// Render as a `Role: content` prompt line.
    pub fn prompt_line(&self) -> String {
        format!("{}: {}", self.role.display_name(), self.content)
    }
}

// Recall scans walk the history from newest to oldest so the latest
// annotation wins.

/// Most recently recorded name, if any.
pub fn recall_name(history: &[MemoryEntry]) -> Option<&str> {
    history.iter().rev().find_map(|entry| match &entry.content {
        EntryContent::Name { name } => Some(name.as_str()),
        _ => None,
    })
}

/// All recorded facts rendered as `<prefix><value>`, newest first.
pub fn recall_facts(history: &[MemoryEntry]) -> Vec<String> {
    history
        .iter()
        .rev()
        .filter_map(|entry| match &entry.content {
            EntryContent::Fact { prefix, value } => Some(format!("{prefix}{value}")),
            _ => None,
        })
        .collect()
}

/// Whether `preference` was ever recorded for this history.
pub fn has_preference(history: &[MemoryEntry], preference: Preference) -> bool {
    history.iter().rev().any(|entry| {
        matches!(entry.content, EntryContent::Preference { preference: p } if p == preference)
    })
}

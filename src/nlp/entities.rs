use regex::Regex;
use std::sync::LazyLock;

use crate::types::{Entity, EntityKind};

/// Extraction patterns in evaluation order. Every pattern runs over the whole
/// text; overlapping matches from different patterns are all reported.
static PATTERNS: LazyLock<Vec<(EntityKind, Regex)>> = LazyLock::new(|| {
    [
        // Email
        (
            EntityKind::Email,
            r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b",
        ),
        // URL
        (
            EntityKind::Url,
            r"https?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\\(),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+",
        ),
        // Phone: 123-456-7890, (123) 456-7890, +44 20 7946 0958
        (EntityKind::Phone, r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b"),
        (EntityKind::Phone, r"\(\d{3}\)\s*\d{3}[-.]?\d{4}\b"),
        (EntityKind::Phone, r"\+\d{1,3}\s*\d{1,4}\s*\d{1,4}\s*\d{1,9}\b"),
        // Dates: relative words, numeric, weekdays, month + day
        (EntityKind::Date, r"(?i)\b(?:today|tomorrow|yesterday)\b"),
        (EntityKind::Date, r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b"),
        (
            EntityKind::Date,
            r"(?i)\b(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
        ),
        (
            EntityKind::Date,
            r"(?i)\b(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2}(?:st|nd|rd|th)?\b",
        ),
        // Times: clock format, day parts
        (EntityKind::Time, r"(?i)\b\d{1,2}:\d{2}\s*(?:am|pm)?\b"),
        (EntityKind::Time, r"(?i)\b(?:morning|afternoon|evening|night)\b"),
        // Money: currency symbol or unit word
        (EntityKind::Money, r"\$\d+(?:,\d{3})*(?:\.\d{2})?"),
        (
            EntityKind::Money,
            r"(?i)\b\d+\s*(?:dollars?|usd|eur|rupees?|inr)\b",
        ),
        // Generic numbers, one entity per match
        (EntityKind::Number, r"\b\d+\b"),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("entity pattern is valid")))
    .collect()
});

/// Extract entities from a message.
///
/// Order is pattern order first, then left-to-right match order within the
/// text. Duplicates across patterns are kept. Never fails; empty input
/// yields an empty list.
pub fn extract(text: &str) -> Vec<Entity> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut entities = Vec::new();
    for (kind, pattern) in PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            entities.push(Entity {
                text: m.as_str().to_string(),
                kind: *kind,
                start: m.start(),
                end: m.end(),
            });
        }
    }
    entities
}

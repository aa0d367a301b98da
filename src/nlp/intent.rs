use crate::types::{IntentLabel, IntentResult, QuickIntent};

/// Confidence reported when no intent keyword matches.
pub const DEFAULT_CONFIDENCE: f32 = 0.5;

/// One entry of the weighted intent catalogue.
struct IntentPattern {
    label: IntentLabel,
    keywords: &'static [&'static str],
    weight: f32,
}

/// Catalogue order is the tie-break order: the first intent to reach the
/// maximum score wins.
const CATALOGUE: &[IntentPattern] = &[
    IntentPattern {
        label: IntentLabel::Greeting,
        keywords: &[
            "hello",
            "hi",
            "hey",
            "good morning",
            "good afternoon",
            "good evening",
            "greetings",
            "howdy",
            "hiya",
        ],
        weight: 1.0,
    },
    IntentPattern {
        label: IntentLabel::Farewell,
        keywords: &[
            "bye",
            "goodbye",
            "see you",
            "later",
            "farewell",
            "take care",
            "catch you later",
            "bye bye",
        ],
        weight: 1.0,
    },
    IntentPattern {
        label: IntentLabel::Question,
        keywords: &[
            "what",
            "when",
            "where",
            "who",
            "why",
            "how",
            "which",
            "can you",
            "could you",
            "would you",
            "?",
        ],
        weight: 0.8,
    },
    IntentPattern {
        label: IntentLabel::Help,
        keywords: &[
            "help",
            "assist",
            "support",
            "guide",
            "instructions",
            "how to",
            "need help",
            "can you help",
        ],
        weight: 1.0,
    },
    IntentPattern {
        label: IntentLabel::Booking,
        keywords: &[
            "book",
            "reserve",
            "appointment",
            "schedule",
            "meeting",
            "reservation",
            "booking",
        ],
        weight: 1.0,
    },
    IntentPattern {
        label: IntentLabel::Complaint,
        keywords: &[
            "complaint",
            "issue",
            "problem",
            "not working",
            "broken",
            "error",
            "wrong",
            "bad",
            "terrible",
            "awful",
        ],
        weight: 0.9,
    },
    IntentPattern {
        label: IntentLabel::Thanks,
        keywords: &[
            "thank",
            "thanks",
            "appreciate",
            "grateful",
            "thx",
            "thank you",
            "thanks a lot",
        ],
        weight: 1.0,
    },
    IntentPattern {
        label: IntentLabel::Information,
        keywords: &[
            "tell me",
            "show me",
            "explain",
            "describe",
            "information",
            "details",
            "about",
            "what is",
        ],
        weight: 0.7,
    },
    IntentPattern {
        label: IntentLabel::Confirmation,
        keywords: &[
            "yes",
            "yeah",
            "sure",
            "okay",
            "ok",
            "alright",
            "correct",
            "right",
            "definitely",
            "absolutely",
        ],
        weight: 0.9,
    },
    IntentPattern {
        label: IntentLabel::Denial,
        keywords: &[
            "no",
            "nope",
            "not",
            "never",
            "incorrect",
            "wrong",
            "negative",
            "nah",
        ],
        weight: 0.9,
    },
];

/// Weighted keyword classifier.
///
/// score(intent) = (distinct keywords found as substrings / keyword count) * weight.
/// Returns the highest scoring intent with `confidence = min(score, 1.0)`, or
/// `general` at [`DEFAULT_CONFIDENCE`] when nothing matches.
pub fn recognize(text: &str) -> IntentResult {
    let lower = text.to_lowercase();
    let mut best: Option<(IntentLabel, f32)> = None;

    for pattern in CATALOGUE {
        let hits = pattern
            .keywords
            .iter()
            .filter(|kw| lower.contains(*kw))
            .count();
        if hits == 0 {
            continue;
        }
        let score = hits as f32 / pattern.keywords.len() as f32 * pattern.weight;
        // Strict comparison keeps the earliest catalogue entry on ties.
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((pattern.label, score));
        }
    }

    match best {
        Some((label, score)) => IntentResult {
            label,
            confidence: score.min(1.0),
        },
        None => IntentResult {
            label: IntentLabel::General,
            confidence: DEFAULT_CONFIDENCE,
        },
    }
}

const QUICK_GREETING: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "greetings",
    "good morning",
    "good evening",
];
const QUICK_QUESTION: &[&str] = &["what", "how", "why", "when", "where", "who", "which"];
const QUICK_GRATITUDE: &[&str] = &["thank", "thanks", "appreciate", "grateful"];
const QUICK_HELP: &[&str] = &["help", "assist", "support", "need"];
const QUICK_EXPLANATION: &[&str] = &["explain", "tell me", "describe", "define"];

/// Presence-based classifier with fixed precedence:
/// greeting > question > gratitude > help_request > explanation > statement.
pub fn classify_quick(text: &str) -> QuickIntent {
    let lower = text.to_lowercase();
    let any = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if any(QUICK_GREETING) {
        QuickIntent::Greeting
    } else if text.contains('?') || any(QUICK_QUESTION) {
        QuickIntent::Question
    } else if any(QUICK_GRATITUDE) {
        QuickIntent::Gratitude
    } else if any(QUICK_HELP) {
        QuickIntent::HelpRequest
    } else if any(QUICK_EXPLANATION) {
        QuickIntent::Explanation
    } else {
        QuickIntent::Statement
    }
}

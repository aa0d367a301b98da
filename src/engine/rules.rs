use super::knowledge;
use crate::config::RuleOrder;
use crate::memory::entry::{self, MemoryEntry, Preference};
use crate::types::ReplySource;

/// Self-disclosure prefixes, matched in order against the start of a message.
pub const FACT_PREFIXES: &[&str] = &[
    "i like ",
    "i love ",
    "i am learning ",
    "i'm learning ",
    "i prefer ",
    "i want ",
    "my goal is ",
    "i am a ",
    "i'm a ",
];

const NAME_PREFIX: &str = "my name is";
const SHORT_ANSWERS_PREFIX: &str = "i prefer short";
const NAME_QUERIES: &[&str] = &["what is my name", "do you know my name"];
const FACT_QUERY: &str = "what do you know about me";

pub const NAME_UNKNOWN_REPLY: &str =
    "I don't know your name yet. You can tell me by saying 'My name is ...'.";
pub const NAME_MISSING_REPLY: &str = "I didn't catch your name. Try 'My name is ...'.";
pub const FACT_ACK_REPLY: &str = "Got it 👍 I'll remember that.";
pub const PREFERENCE_ACK_REPLY: &str = "Got it 👍 I'll keep explanations short.";
pub const NO_FACTS_REPLY: &str = "I don't have any personal details about you yet.";
pub const FACTS_HEADER: &str = "Here's what I remember about you:";

/// Outcome of running the rule pipeline over one message.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// A rule answered. `record` is the annotation it wants appended.
    Reply {
        source: ReplySource,
        text: String,
        record: Option<MemoryEntry>,
    },
    /// No rule matched; the caller should ask the fallback generator.
    Fallback,
}

impl Decision {
    fn reply(source: ReplySource, text: impl Into<String>) -> Self {
        Decision::Reply {
            source,
            text: text.into(),
            record: None,
        }
    }

    fn reply_and_record(source: ReplySource, text: impl Into<String>, record: MemoryEntry) -> Self {
        Decision::Reply {
            source,
            text: text.into(),
            record: Some(record),
        }
    }
}

/// The message once trimmed, alongside its case-folded form.
struct Utterance<'a> {
    original: &'a str,
    lower: String,
}

type Rule = fn(&Utterance<'_>, &[MemoryEntry]) -> Option<Decision>;

const FACTS_FIRST: &[Rule] = &[
    name_assertion,
    name_recall,
    fact_assertion,
    preference_assertion,
    fact_recall,
    knowledge_lookup,
    canned_reply,
];

const PREFERENCE_FIRST: &[Rule] = &[
    name_assertion,
    name_recall,
    preference_assertion,
    fact_assertion,
    fact_recall,
    knowledge_lookup,
    canned_reply,
];

/// Run the ordered rule pipeline. The first rule that matches decides the
/// reply; `history` is the session's memory before this message.
pub fn select(message: &str, history: &[MemoryEntry], order: RuleOrder) -> Decision {
    let original = message.trim();
    let utterance = Utterance {
        original,
        lower: original.to_lowercase(),
    };

    let rules = match order {
        RuleOrder::FactsFirst => FACTS_FIRST,
        RuleOrder::PreferenceFirst => PREFERENCE_FIRST,
    };

    rules
        .iter()
        .find_map(|rule| rule(&utterance, history))
        .unwrap_or(Decision::Fallback)
}

fn name_assertion(u: &Utterance<'_>, _history: &[MemoryEntry]) -> Option<Decision> {
    let rest = strip_prefix_ci(u.original, NAME_PREFIX)?;
    let name = title_case(rest.trim());
    if name.is_empty() {
        return Some(Decision::reply(ReplySource::NameAssertion, NAME_MISSING_REPLY));
    }
    Some(Decision::reply_and_record(
        ReplySource::NameAssertion,
        format!("Nice to meet you, {name}! I'll remember your name 😊"),
        MemoryEntry::name(name),
    ))
}

fn name_recall(u: &Utterance<'_>, history: &[MemoryEntry]) -> Option<Decision> {
    if !NAME_QUERIES.iter().any(|q| u.lower.contains(q)) {
        return None;
    }
    let text = match entry::recall_name(history) {
        Some(name) => format!("Your name is {name}! 😊"),
        None => NAME_UNKNOWN_REPLY.to_string(),
    };
    Some(Decision::reply(ReplySource::NameRecall, text))
}

fn fact_assertion(u: &Utterance<'_>, _history: &[MemoryEntry]) -> Option<Decision> {
    FACT_PREFIXES.iter().find_map(|prefix| {
        let value = strip_prefix_ci(u.original, prefix)?.trim();
        Some(Decision::reply_and_record(
            ReplySource::FactAssertion,
            FACT_ACK_REPLY,
            MemoryEntry::fact(*prefix, value),
        ))
    })
}

fn preference_assertion(u: &Utterance<'_>, _history: &[MemoryEntry]) -> Option<Decision> {
    strip_prefix_ci(u.original, SHORT_ANSWERS_PREFIX)?;
    Some(Decision::reply_and_record(
        ReplySource::PreferenceAssertion,
        PREFERENCE_ACK_REPLY,
        MemoryEntry::preference(Preference::ShortAnswers),
    ))
}

fn fact_recall(u: &Utterance<'_>, history: &[MemoryEntry]) -> Option<Decision> {
    if !u.lower.contains(FACT_QUERY) {
        return None;
    }
    let facts = entry::recall_facts(history);
    let text = if facts.is_empty() {
        NO_FACTS_REPLY.to_string()
    } else {
        format!("{FACTS_HEADER}\n- {}", facts.join("\n- "))
    };
    Some(Decision::reply(ReplySource::FactRecall, text))
}

fn knowledge_lookup(u: &Utterance<'_>, history: &[MemoryEntry]) -> Option<Decision> {
    let (_, answer) = knowledge::lookup(&u.lower)?;
    let text = if entry::has_preference(history, Preference::ShortAnswers) {
        knowledge::short_form(answer)
    } else {
        answer
    };
    Some(Decision::reply(ReplySource::KnowledgeBase, text))
}

fn canned_reply(u: &Utterance<'_>, _history: &[MemoryEntry]) -> Option<Decision> {
    let any = |words: &[&str]| words.iter().any(|w| u.lower.contains(w));

    let text = if any(knowledge::GREETING_WORDS) {
        knowledge::GREETING_REPLY
    } else if any(knowledge::THANKS_WORDS) {
        knowledge::THANKS_REPLY
    } else if any(knowledge::HELP_WORDS) {
        knowledge::HELP_REPLY
    } else if any(knowledge::CAPABILITY_PHRASES) {
        knowledge::CAPABILITIES_REPLY
    } else {
        return None;
    };
    Some(Decision::reply(ReplySource::CannedRule, text))
}

/// Strip an ASCII `prefix` from the start of `text`, ignoring case.
fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

/// Upper-case the first letter of every run of letters, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

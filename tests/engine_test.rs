use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use parley::config::{EngineConfig, RuleOrder};
use parley::engine::knowledge::{self, KNOWLEDGE_BASE};
use parley::engine::prompt::PREAMBLE;
use parley::engine::rules::{FACT_ACK_REPLY, NAME_UNKNOWN_REPLY, NO_FACTS_REPLY, PREFERENCE_ACK_REPLY};
use parley::engine::ConversationEngine;
use parley::generator::{DIAGNOSTIC_PREFIX, FallbackGenerator, GenerateError, TextGenerator};
use parley::memory::{EntryContent, Preference, SessionMemory};
use parley::types::{EntityKind, IntentLabel, ReplySource, SentimentLabel};

/// Records every prompt and answers with a numbered reply.
#[derive(Default)]
struct RecordingGenerator {
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    fn name(&self) -> &str {
        "recording"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(prompt.to_string());
        Ok(format!("generated reply {}", prompts.len()))
    }
}

struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        Err(GenerateError::Backend("model crashed".into()))
    }
}

struct SlowGenerator;

#[async_trait]
impl TextGenerator for SlowGenerator {
    fn name(&self) -> &str {
        "slow"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok("too late".into())
    }
}

fn engine_with(backend: Arc<dyn TextGenerator>, config: EngineConfig) -> ConversationEngine {
    ConversationEngine::new(
        Arc::new(SessionMemory::new()),
        FallbackGenerator::new(backend, Duration::from_secs(5)),
        config,
    )
}

fn recording_engine() -> (ConversationEngine, Arc<RecordingGenerator>) {
    let recorder = Arc::new(RecordingGenerator::default());
    let engine = engine_with(recorder.clone(), EngineConfig::default());
    (engine, recorder)
}

fn ml_answer() -> &'static str {
    KNOWLEDGE_BASE
        .iter()
        .find(|(topic, _)| *topic == "machine learning")
        .map(|(_, answer)| *answer)
        .unwrap()
}

// =============================================================
// Memory rules
// =============================================================

#[tokio::test]
async fn name_is_remembered_within_session() {
    let (engine, _) = recording_engine();

    let ack = engine.handle_message("s1", "my name is Ada").await;
    assert_eq!(ack.source, ReplySource::NameAssertion);
    assert!(ack.reply.contains("Ada"));

    let recall = engine.handle_message("s1", "what is my name").await;
    assert_eq!(recall.source, ReplySource::NameRecall);
    assert!(recall.reply.contains("Ada"), "reply: {}", recall.reply);
}

#[tokio::test]
async fn name_recall_in_fresh_session_says_unknown() {
    let (engine, recorder) = recording_engine();

    let reply = engine.handle_message("fresh", "Do you know my name?").await;
    assert_eq!(reply.reply, NAME_UNKNOWN_REPLY);
    assert!(recorder.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn names_do_not_leak_across_sessions() {
    let (engine, _) = recording_engine();
    engine.handle_message("a", "my name is Ada").await;

    let reply = engine.handle_message("b", "what is my name").await;
    assert_eq!(reply.reply, NAME_UNKNOWN_REPLY);
}

#[tokio::test]
async fn latest_name_wins() {
    let (engine, _) = recording_engine();
    engine.handle_message("s", "my name is Ada").await;
    engine.handle_message("s", "my name is grace hopper").await;

    let reply = engine.handle_message("s", "what is my name").await;
    assert!(reply.reply.contains("Grace Hopper"), "reply: {}", reply.reply);
    assert!(!reply.reply.contains("Ada"));
}

#[tokio::test]
async fn facts_are_recalled() {
    let (engine, _) = recording_engine();

    let ack = engine.handle_message("s", "I like hiking").await;
    assert_eq!(ack.reply, FACT_ACK_REPLY);
    assert_eq!(ack.source, ReplySource::FactAssertion);
    engine.handle_message("s", "My goal is to run a marathon").await;

    let recall = engine.handle_message("s", "What do you know about me?").await;
    assert_eq!(recall.source, ReplySource::FactRecall);
    assert!(recall.reply.contains("i like hiking"), "reply: {}", recall.reply);
    // newest first
    let goal = recall.reply.find("my goal is to run a marathon").unwrap();
    let hiking = recall.reply.find("i like hiking").unwrap();
    assert!(goal < hiking);
}

#[tokio::test]
async fn fact_recall_without_facts() {
    let (engine, _) = recording_engine();
    let reply = engine.handle_message("s", "what do you know about me").await;
    assert_eq!(reply.reply, NO_FACTS_REPLY);
}

#[tokio::test]
async fn annotations_land_in_history_between_turns() {
    let (engine, _) = recording_engine();
    engine.handle_message("s", "I love jazz").await;

    let history = engine.memory().history("s").await;
    let rendered: Vec<String> = history.iter().map(|e| e.prompt_line()).collect();
    assert_eq!(
        rendered,
        vec![
            "User: I love jazz".to_string(),
            "System: fact:i love jazz".to_string(),
            format!("Bot: {FACT_ACK_REPLY}"),
        ]
    );
}

// =============================================================
// Preference ordering
// =============================================================

#[tokio::test]
async fn prefer_short_is_stored_as_fact_by_default() {
    let (engine, _) = recording_engine();

    let ack = engine.handle_message("s", "I prefer short answers").await;
    assert_eq!(ack.reply, FACT_ACK_REPLY);

    let history = engine.memory().history("s").await;
    assert!(history.iter().any(|e| e.content
        == EntryContent::Fact {
            prefix: "i prefer ".into(),
            value: "short answers".into()
        }));

    // Knowledge answers stay long because no preference was recorded.
    let reply = engine.handle_message("s", "what is machine learning").await;
    assert_eq!(reply.reply, ml_answer());
}

#[tokio::test]
async fn preference_first_order_enables_short_answers() {
    let config = EngineConfig {
        rule_order: RuleOrder::PreferenceFirst,
        ..EngineConfig::default()
    };
    let engine = engine_with(Arc::new(RecordingGenerator::default()), config);

    let ack = engine.handle_message("s", "I prefer short answers").await;
    assert_eq!(ack.reply, PREFERENCE_ACK_REPLY);
    assert_eq!(ack.source, ReplySource::PreferenceAssertion);

    let history = engine.memory().history("s").await;
    assert!(history.iter().any(|e| e.content
        == EntryContent::Preference {
            preference: Preference::ShortAnswers
        }));

    let reply = engine.handle_message("s", "what is machine learning").await;
    assert_eq!(reply.reply, knowledge::short_form(ml_answer()));
    assert!(!reply.reply.contains('\n'));
}

#[tokio::test]
async fn preference_first_still_stores_other_preferences_as_facts() {
    let config = EngineConfig {
        rule_order: RuleOrder::PreferenceFirst,
        ..EngineConfig::default()
    };
    let engine = engine_with(Arc::new(RecordingGenerator::default()), config);

    let ack = engine.handle_message("s", "I prefer tea over coffee").await;
    assert_eq!(ack.source, ReplySource::FactAssertion);
}

// =============================================================
// Knowledge base and canned rules
// =============================================================

#[tokio::test]
async fn knowledge_answer_is_exact_and_idempotent() {
    let (engine, recorder) = recording_engine();

    let first = engine.handle_message("s", "Tell me about Machine Learning").await;
    let second = engine.handle_message("s", "Tell me about Machine Learning").await;
    assert_eq!(first.source, ReplySource::KnowledgeBase);
    assert_eq!(first.reply, ml_answer());
    assert_eq!(second.reply, ml_answer());
    assert!(recorder.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn canned_rules_in_order() {
    let (engine, _) = recording_engine();

    let greeting = engine.handle_message("s", "hello").await;
    assert_eq!(greeting.reply, knowledge::GREETING_REPLY);

    let thanks = engine.handle_message("s", "thanks!").await;
    assert_eq!(thanks.reply, knowledge::THANKS_REPLY);

    let help = engine.handle_message("s", "can you assist me").await;
    assert_eq!(help.reply, knowledge::HELP_REPLY);

    let caps = engine.handle_message("s", "what can you do").await;
    assert_eq!(caps.reply, knowledge::CAPABILITIES_REPLY);
    assert_eq!(caps.source, ReplySource::CannedRule);
}

// =============================================================
// Fallback generation
// =============================================================

#[tokio::test]
async fn fallback_prompts_grow_by_previous_turn() {
    let (engine, recorder) = recording_engine();

    let first = engine.handle_message("s", "Tell me a story").await;
    let second = engine.handle_message("s", "Tell me a story").await;
    assert_eq!(first.source, ReplySource::Fallback);
    assert_eq!(first.reply, "generated reply 1");
    assert_eq!(second.reply, "generated reply 2");

    let prompts = recorder.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);
    assert_eq!(
        prompts[0],
        format!("{PREAMBLE}\n\nConversation so far:\n\nUser: Tell me a story\nAssistant:\n")
    );
    assert_eq!(
        prompts[1],
        format!(
            "{PREAMBLE}\n\nConversation so far:\nUser: Tell me a story\nBot: generated reply 1\n\nUser: Tell me a story\nAssistant:\n"
        )
    );
}

#[tokio::test]
async fn fallback_prompt_uses_history_window() {
    let config = EngineConfig {
        history_window: 1,
        ..EngineConfig::default()
    };
    let recorder = Arc::new(RecordingGenerator::default());
    let engine = engine_with(recorder.clone(), config);

    engine.handle_message("s", "my name is Ada").await;
    engine.handle_message("s", "Tell me a story").await;

    let prompts = recorder.prompts.lock().unwrap();
    // Only the bot acknowledgement fits in a window of one.
    assert!(!prompts[0].contains("User: my name is Ada"));
    assert!(!prompts[0].contains("System: name:Ada"));
    assert!(prompts[0].contains("Bot: Nice to meet you, Ada!"));
}

#[tokio::test]
async fn generator_failure_becomes_diagnostic_reply() {
    let engine = engine_with(Arc::new(FailingGenerator), EngineConfig::default());

    let reply = engine.handle_message("s", "Tell me a story").await;
    assert_eq!(reply.source, ReplySource::Fallback);
    assert!(reply.reply.starts_with(DIAGNOSTIC_PREFIX));
    assert!(reply.reply.contains("model crashed"));
}

#[tokio::test]
async fn generator_timeout_becomes_diagnostic_reply() {
    let engine = ConversationEngine::new(
        Arc::new(SessionMemory::new()),
        FallbackGenerator::new(Arc::new(SlowGenerator), Duration::from_millis(50)),
        EngineConfig::default(),
    );

    let reply = engine.handle_message("s", "Tell me a story").await;
    assert!(reply.reply.starts_with(DIAGNOSTIC_PREFIX));
    assert!(reply.reply.contains("timed out"));

    // The diagnostic is recorded as the bot turn like any other reply.
    let history = engine.memory().history("s").await;
    assert_eq!(history.last().unwrap().content.to_string(), reply.reply);
}

// =============================================================
// Classifications ride along with every reply
// =============================================================

#[tokio::test]
async fn classifiers_run_even_when_rules_short_circuit() {
    let (engine, _) = recording_engine();

    let reply = engine
        .handle_message("s", "I love meeting people, email me at a@b.com")
        .await;
    assert_eq!(reply.source, ReplySource::FactAssertion);
    assert_eq!(reply.sentiment, SentimentLabel::Positive);
    assert_eq!(reply.intent, IntentLabel::Booking);
    assert!(reply
        .entities
        .iter()
        .any(|e| e.kind == EntityKind::Email && e.text == "a@b.com"));
}

#[tokio::test]
async fn any_input_yields_well_formed_reply() {
    let (engine, _) = recording_engine();

    for message in ["", "   ", "?!", "ÜñÍçødé ✓", "my name is", "12345"] {
        let reply = engine.handle_message("s", message).await;
        assert!(!reply.reply.is_empty(), "empty reply for {message:?}");
        assert!(!reply.intent.as_str().is_empty());
        assert!(!reply.sentiment.as_str().is_empty());
    }
}

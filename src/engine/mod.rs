pub mod knowledge;
pub mod prompt;
pub mod rules;

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::{EngineConfig, ParleyConfig};
use crate::generator::{self, FallbackGenerator};
use crate::memory::{MemoryEntry, SessionMemory};
use crate::nlp;
use crate::types::{ChatReply, ReplySource};
use rules::Decision;

/// The conversation core: classifiers, session memory, the rule pipeline
/// and the fallback generator behind one `handle_message` call.
///
/// Per message:
/// 1. Classify the raw message (intent, quick intent, sentiment, entities)
/// 2. Snapshot the session history, then record the user turn
/// 3. Run the rules against the snapshot; record any annotation they produce
/// 4. If no rule answered, prompt the fallback generator with recent history
/// 5. Record the bot turn and return the reply with the classifications
pub struct ConversationEngine {
    memory: Arc<SessionMemory>,
    fallback: FallbackGenerator,
    config: EngineConfig,
}

impl ConversationEngine {
    pub fn new(memory: Arc<SessionMemory>, fallback: FallbackGenerator, config: EngineConfig) -> Self {
        Self {
            memory,
            fallback,
            config,
        }
    }

    /// Build an engine with a fresh memory store and the configured backend.
    pub fn from_config(config: &ParleyConfig) -> Self {
        Self::new(
            Arc::new(SessionMemory::new()),
            generator::from_config(&config.generator),
            config.engine.clone(),
        )
    }

    pub fn memory(&self) -> &Arc<SessionMemory> {
        &self.memory
    }

    pub fn backend_name(&self) -> &str {
        self.fallback.backend_name()
    }

    /// Handle one message for a session. Never fails: generator problems
    /// come back as diagnostic reply text.
    pub async fn handle_message(&self, session_id: &str, message: &str) -> ChatReply {
        let started = Instant::now();
        let analysis = nlp::analyze(message);

        let history = self.memory.history(session_id).await;
        self.memory
            .append(session_id, MemoryEntry::user(message))
            .await;

        let (source, reply) = match rules::select(message, &history, self.config.rule_order) {
            Decision::Reply {
                source,
                text,
                record,
            } => {
                if let Some(entry) = record {
                    debug!(session_id, annotation = %entry.content, "recording annotation");
                    self.memory.append(session_id, entry).await;
                }
                (source, text)
            }
            Decision::Fallback => {
                let prompt = prompt::build(&history, message, self.config.history_window);
                (ReplySource::Fallback, self.fallback.generate(&prompt).await)
            }
        };

        self.memory
            .append(session_id, MemoryEntry::bot(reply.clone()))
            .await;

        let latency_ms = started.elapsed().as_millis() as u64;
        info!(
            session_id,
            %source,
            intent = %analysis.intent.label,
            sentiment = %analysis.sentiment.label,
            entities = analysis.entities.len(),
            latency_ms,
            "handled message"
        );

        ChatReply {
            reply,
            intent: analysis.intent.label,
            intent_confidence: analysis.intent.confidence,
            quick_intent: analysis.quick_intent,
            sentiment: analysis.sentiment.label,
            sentiment_score: analysis.sentiment.score,
            entities: analysis.entities,
            source,
            latency_ms,
        }
    }
}

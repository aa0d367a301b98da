pub mod entities;
pub mod intent;
pub mod sentiment;

use crate::types::Analysis;

/// Run every classifier over a raw message.
///
/// All three are stateless and total: any input, including the empty
/// string, produces a well-formed result.
pub fn analyze(text: &str) -> Analysis {
    Analysis {
        intent: intent::recognize(text),
        quick_intent: intent::classify_quick(text),
        sentiment: sentiment::analyze(text),
        entities: entities::extract(text),
    }
}

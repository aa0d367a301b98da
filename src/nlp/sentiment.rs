use crate::types::{SentimentLabel, SentimentResult};

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "happy",
    "love",
    "thanks",
    "thank you",
    "awesome",
    "amazing",
    "wonderful",
    "fantastic",
    "perfect",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "hate",
    "sad",
    "angry",
    "worst",
    "horrible",
    "poor",
    "disappointed",
    "frustrating",
];

/// Lexicon-based polarity.
///
/// Each lexicon entry counts once if it occurs anywhere in the case-folded
/// text (substring containment, so "badge" counts as "bad"). The label comes
/// from comparing the two counts and the score is their difference, so a
/// positive score always means a positive label.
pub fn analyze(text: &str) -> SentimentResult {
    let lower = text.to_lowercase();
    let positive = count_hits(&lower, POSITIVE_WORDS);
    let negative = count_hits(&lower, NEGATIVE_WORDS);

    let label = match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => SentimentLabel::Positive,
        std::cmp::Ordering::Less => SentimentLabel::Negative,
        std::cmp::Ordering::Equal => SentimentLabel::Neutral,
    };

    SentimentResult {
        label,
        score: positive as f32 - negative as f32,
    }
}

fn count_hits(lower: &str, lexicon: &[&str]) -> usize {
    lexicon.iter().filter(|word| lower.contains(*word)).count()
}

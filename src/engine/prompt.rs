use crate::memory::MemoryEntry;

pub const PREAMBLE: &str =
    "You are a helpful, conversational AI assistant.\nAnswer clearly and naturally.";

/// Build the fallback prompt from the last `window` history entries and the
/// new message.
pub fn build(history: &[MemoryEntry], message: &str, window: usize) -> String {
    let start = history.len().saturating_sub(window);
    let conversation: String = history[start..]
        .iter()
        .map(|entry| format!("{}\n", entry.prompt_line()))
        .collect();

    format!("{PREAMBLE}\n\nConversation so far:\n{conversation}\nUser: {message}\nAssistant:\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_still_frames_the_message() {
        let prompt = build(&[], "hello", 6);
        assert_eq!(
            prompt,
            format!("{PREAMBLE}\n\nConversation so far:\n\nUser: hello\nAssistant:\n")
        );
    }

    #[test]
    fn only_the_window_is_rendered() {
        let history: Vec<MemoryEntry> = (0..10)
            .map(|i| MemoryEntry::user(format!("turn {i}")))
            .collect();
        let prompt = build(&history, "next", 6);
        assert!(!prompt.contains("turn 3\n"));
        assert!(prompt.contains("User: turn 4\n"));
        assert!(prompt.contains("User: turn 9\n"));
    }

    #[test]
    fn zero_window_renders_no_history() {
        let history = vec![MemoryEntry::name("Ada")];
        assert!(!build(&history, "x", 0).contains("name:Ada"));
    }
}

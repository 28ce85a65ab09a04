//! Helper utility functions for CLI commands

use wellsoulix_storage::Message;

/// Safely truncate a string to a maximum number of characters (not bytes).
/// This avoids panics when slicing multi-byte UTF-8 characters.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Show only the first 8 characters of a secret
pub fn mask_secret(s: &str) -> String {
    format!("{}***", s.chars().take(8).collect::<String>())
}

/// Heavy horizontal rule under section titles
pub fn rule(width: usize) -> String {
    "\u{2550}".repeat(width)
}

/// One transcript line, prefixed with the speaker
pub fn format_message(message: &Message) -> String {
    let speaker = match message.mode {
        Some(mode) => format!("{} {mode}", mode.config().emoji),
        None => "You".to_string(),
    };
    match &message.attachment {
        Some(attachment) => format!(
            "{speaker}: {} [{}: {}]",
            message.text,
            attachment.kind(),
            truncate_str(&attachment.label(), 40)
        ),
        None => format!("{speaker}: {}", message.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellsoulix_storage::{Attachment, Mode};

    #[test]
    fn test_truncate_str_short() {
        assert_eq!(truncate_str("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_str_exact() {
        assert_eq!(truncate_str("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_str_long() {
        assert_eq!(truncate_str("hello world", 5), "hello...");
    }

    #[test]
    fn test_truncate_str_unicode() {
        assert_eq!(truncate_str("\u{4f60}\u{597d}\u{4e16}\u{754c}", 2), "\u{4f60}\u{597d}...");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("AIzaSyExampleKey"), "AIzaSyEx***");
        assert_eq!(mask_secret("abc"), "abc***");
    }

    #[test]
    fn test_format_user_message_with_link() {
        let message = Message::user(
            "read this",
            Some(Attachment::Link {
                url: "https://example.com".to_string(),
            }),
        );
        assert_eq!(format_message(&message), "You: read this [link: example.com]");
    }

    #[test]
    fn test_format_model_message() {
        let message = Message::model("[Mode: Calm] Breathe in.", Mode::Calm);
        assert_eq!(
            format_message(&message),
            "\u{1f33f} Calm: [Mode: Calm] Breathe in."
        );
    }
}

use deunicode::deunicode;

use super::types::{ChatMessage, Role};

const DISPLAY_NAME_MAX_CHARS: usize = 30;

/// Display name for a conversation: the first user message, truncated.
/// Empty when no user message exists yet.
pub fn display_name_from_messages(messages: &[ChatMessage]) -> String {
    for message in messages {
        if message.role == Role::User {
            return message.content.chars().take(DISPLAY_NAME_MAX_CHARS).collect();
        }
    }
    String::new()
}

/// Filesystem-safe slug for a display name.
///
/// Transliterates to an ASCII approximation, keeps only `[A-Za-z0-9_]`,
/// and lowercases. Deterministic: the same display name always maps to the
/// same slug, so two conversations that normalize identically share one
/// record on disk and the later save wins.
pub fn slug_from_display_name(display_name: &str) -> String {
    deunicode(display_name)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_uses_first_user_message() {
        let messages = vec![
            ChatMessage::user("How do I cook rice?"),
            ChatMessage::assistant("Start by rinsing it."),
            ChatMessage::user("And beans?"),
        ];
        assert_eq!(display_name_from_messages(&messages), "How do I cook rice?");
    }

    #[test]
    fn test_display_name_truncates_to_thirty_chars() {
        let prompt = "a".repeat(50);
        let messages = vec![ChatMessage::user(prompt)];
        assert_eq!(display_name_from_messages(&messages), "a".repeat(30));
    }

    #[test]
    fn test_display_name_counts_chars_not_bytes() {
        let prompt = "é".repeat(40);
        let messages = vec![ChatMessage::user(prompt)];
        assert_eq!(display_name_from_messages(&messages).chars().count(), 30);
    }

    #[test]
    fn test_display_name_empty_without_user_message() {
        assert_eq!(display_name_from_messages(&[]), "");
        let messages = vec![ChatMessage::assistant("Hello!")];
        assert_eq!(display_name_from_messages(&messages), "");
    }

    #[test]
    fn test_slug_strips_diacritics_and_punctuation() {
        assert_eq!(slug_from_display_name("Olá, como vai você?"), "olacomovaivoce");
        assert_eq!(slug_from_display_name("Hello"), "hello");
    }

    #[test]
    fn test_slug_keeps_underscores() {
        assert_eq!(slug_from_display_name("my_file name"), "my_filename");
    }

    #[test]
    fn test_slug_is_deterministic() {
        let input = "Déjà vu: the 2nd time!";
        assert_eq!(slug_from_display_name(input), slug_from_display_name(input));
        assert_eq!(slug_from_display_name(input), "dejavuthe2ndtime");
    }
}

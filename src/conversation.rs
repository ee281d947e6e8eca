//! The extractor's per-conversation output.
//!
//! A [`RawConversation`] is what survives extraction of one JSON object or
//! one raw-text block: a title, optional epoch timestamps and the message
//! texts that passed the length/prefix filter. It carries no classification;
//! see [`ConversationRecord`](crate::ConversationRecord) for the finished
//! output row.
//!
//! # Example
//!
//! ```
//! use chatsift::RawConversation;
//!
//! let conv = RawConversation::new("Quarterly planning")
//!     .with_create_time(1700000000.0)
//!     .with_message("Let's outline the roadmap for next quarter together");
//!
//! assert_eq!(conv.title(), "Quarterly planning");
//! assert_eq!(conv.message_count(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// One conversation as recovered from the source text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawConversation {
    /// Title exactly as found (still escaped in the raw-text dialect).
    pub title: String,

    /// Creation time in epoch seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub create_time: Option<f64>,

    /// Last update time in epoch seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub update_time: Option<f64>,

    /// Decoded message texts, in order of appearance.
    #[serde(default)]
    pub messages: Vec<String>,
}

impl RawConversation {
    /// Creates a conversation with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_create_time(mut self, ts: f64) -> Self {
        self.create_time = Some(ts);
        self
    }

    #[must_use]
    pub fn with_update_time(mut self, ts: f64) -> Self {
        self.update_time = Some(ts);
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    #[must_use]
    pub fn with_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.messages.extend(messages.into_iter().map(Into::into));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let conv = RawConversation::new("Title")
            .with_create_time(1.5)
            .with_update_time(2.5)
            .with_messages(["first message", "second message"]);
        assert_eq!(conv.create_time, Some(1.5));
        assert_eq!(conv.update_time, Some(2.5));
        assert_eq!(conv.messages(), ["first message", "second message"]);
    }

    #[test]
    fn test_serde_skips_missing_timestamps() {
        let conv = RawConversation::new("Title");
        let json = serde_json::to_string(&conv).unwrap();
        assert!(!json.contains("create_time"));
        let parsed: RawConversation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, conv);
    }
}

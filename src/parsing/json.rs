//! JSON dialect: a well-formed export, either an array of conversation
//! objects or a single object.
//!
//! Each conversation object looks like this:
//!
//! ```json
//! {
//!   "title": "Archive and asset management",
//!   "create_time": 1761376400.31522,
//!   "update_time": 1761376527.686519,
//!   "mapping": {
//!     "client-created-root": {"id": "client-created-root", "message": null, "parent": null, "children": ["a"]},
//!     "a": {"id": "a", "parent": "client-created-root", "children": [],
//!           "message": {"content": {"content_type": "text", "parts": ["I need help organizing my drive"]}}}
//!   }
//! }
//! ```
//!
//! Message text comes from a flat `messages` array when it holds any text,
//! otherwise from the `mapping` tree, walked from the root along `children`.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::warn;

use crate::RawConversation;
use crate::config::ExtractorConfig;
use crate::error::{ChatsiftError, Result};
use crate::extractor::{ConversationParser, Dialect, Extraction};

/// Parser for the JSON dialects.
pub struct JsonParser {
    config: ExtractorConfig,
    dialect: Dialect,
}

impl JsonParser {
    /// Parser for a top-level array of conversations.
    pub fn array(config: ExtractorConfig) -> Self {
        Self {
            config,
            dialect: Dialect::JsonArray,
        }
    }

    /// Parser for a single top-level conversation object.
    pub fn object(config: ExtractorConfig) -> Self {
        Self {
            config,
            dialect: Dialect::JsonObject,
        }
    }
}

impl ConversationParser for JsonParser {
    fn name(&self) -> &'static str {
        match self.dialect {
            Dialect::JsonObject => "JSON object",
            _ => "JSON array",
        }
    }

    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn parse_str(&self, content: &str) -> Result<Extraction> {
        let values = match self.dialect {
            Dialect::JsonObject => {
                let value: Value = serde_json::from_str(content)
                    .map_err(|e| ChatsiftError::json_parse(self.name(), e, None))?;
                vec![value]
            }
            _ => serde_json::from_str::<Vec<Value>>(content)
                .map_err(|e| ChatsiftError::json_parse(self.name(), e, None))?,
        };

        let mut extraction = Extraction::new(self.dialect);
        for (i, value) in values.iter().enumerate() {
            match conversation_from_value(value, &self.config) {
                Some(conversation) => extraction.conversations.push(conversation),
                None => {
                    warn!(index = i + 1, "skipping non-object conversation entry");
                    extraction.skipped_blocks += 1;
                }
            }
        }

        Ok(extraction)
    }
}

/// Builds a conversation from one JSON value.
///
/// Returns `None` if the value is not an object. A missing title becomes an
/// empty title; the record builder drops it later.
pub fn conversation_from_value(value: &Value, config: &ExtractorConfig) -> Option<RawConversation> {
    let obj = value.as_object()?;

    let title = obj
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let flat: Vec<String> = obj
        .get("messages")
        .and_then(Value::as_array)
        .map(|items| items.iter().flat_map(message_texts).collect())
        .unwrap_or_default();

    // An empty flat array still leaves the mapping tree to try
    let messages = if flat.is_empty() {
        obj.get("mapping")
            .and_then(Value::as_object)
            .map(walk_mapping)
            .unwrap_or_default()
    } else {
        flat
    };

    Some(RawConversation {
        title,
        create_time: obj.get("create_time").and_then(Value::as_f64),
        update_time: obj.get("update_time").and_then(Value::as_f64),
        messages: messages.into_iter().filter(|m| config.accepts(m)).collect(),
    })
}

/// Text of one entry of a flat `messages` array.
///
/// Accepts a bare string, `{"content": "..."}`, `{"text": "..."}` or
/// `{"content": {"parts": [...]}}`.
fn message_texts(item: &Value) -> Vec<String> {
    match item {
        Value::String(s) => vec![s.clone()],
        Value::Object(obj) => {
            if let Some(text) = obj.get("content").and_then(Value::as_str) {
                vec![text.to_string()]
            } else if let Some(text) = obj.get("text").and_then(Value::as_str) {
                vec![text.to_string()]
            } else {
                obj.get("content").map(parts_texts).unwrap_or_default()
            }
        }
        _ => Vec::new(),
    }
}

/// String entries of `content.parts`. Non-string parts (images, tool
/// payloads) are skipped.
fn parts_texts(content: &Value) -> Vec<String> {
    content
        .get("parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(Value::as_str)
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Walks the conversation tree depth-first from every root, following
/// `children` in order. Each node is visited at most once.
fn walk_mapping(mapping: &Map<String, Value>) -> Vec<String> {
    let is_root = |node: &Value| match node.get("parent") {
        None | Some(Value::Null) => true,
        Some(Value::String(parent)) => !mapping.contains_key(parent),
        Some(_) => true,
    };

    let mut stack: Vec<&str> = mapping
        .iter()
        .filter(|(_, node)| is_root(node))
        .map(|(id, _)| id.as_str())
        .rev()
        .collect();

    let mut visited = HashSet::new();
    let mut texts = Vec::new();

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(node) = mapping.get(id) else {
            continue;
        };

        if let Some(content) = node.get("message").and_then(|m| m.get("content")) {
            texts.extend(parts_texts(content));
        }

        if let Some(children) = node.get("children").and_then(Value::as_array) {
            stack.extend(children.iter().rev().filter_map(Value::as_str));
        }
    }

    texts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_messages_array() {
        let value = json!({
            "title": "Flat export",
            "create_time": 1700000000,
            "messages": [
                "A plain string message that is long enough",
                {"content": "An object message with content text"},
                {"text": "An object message with a text field"},
                {"content": {"parts": ["A message nested in content parts"]}},
                42
            ]
        });
        let conv = conversation_from_value(&value, &ExtractorConfig::default()).unwrap();
        assert_eq!(conv.title, "Flat export");
        assert_eq!(conv.create_time, Some(1700000000.0));
        assert_eq!(conv.update_time, None);
        assert_eq!(conv.messages.len(), 4);
    }

    #[test]
    fn test_mapping_tree_order() {
        let value = json!({
            "title": "Tree",
            "mapping": {
                "b-node": {"parent": "root", "children": ["c-node"],
                    "message": {"content": {"parts": ["Second message in the conversation"]}}},
                "root": {"parent": null, "children": ["a-node"], "message": null},
                "a-node": {"parent": "root", "children": ["b-node"],
                    "message": {"content": {"parts": ["First message in the conversation"]}}},
                "c-node": {"parent": "b-node", "children": [],
                    "message": {"content": {"parts": [{"image": true}, "Third message in the conversation"]}}}
            }
        });
        let conv = conversation_from_value(&value, &ExtractorConfig::default()).unwrap();
        assert_eq!(
            conv.messages,
            vec![
                "First message in the conversation",
                "Second message in the conversation",
                "Third message in the conversation",
            ]
        );
    }

    #[test]
    fn test_empty_messages_array_falls_back_to_mapping() {
        let value = json!({
            "title": "Both shapes",
            "messages": [],
            "mapping": {
                "root": {"parent": null, "children": [],
                    "message": {"content": {"parts": ["Recovered from the mapping tree instead"]}}}
            }
        });
        let conv = conversation_from_value(&value, &ExtractorConfig::default()).unwrap();
        assert_eq!(conv.messages, vec!["Recovered from the mapping tree instead"]);
    }

    #[test]
    fn test_flat_messages_win_over_mapping() {
        let value = json!({
            "title": "Both shapes",
            "messages": ["The flat array text is the one that is kept"],
            "mapping": {
                "root": {"parent": null, "children": [],
                    "message": {"content": {"parts": ["Mapping text that is ignored here"]}}}
            }
        });
        let conv = conversation_from_value(&value, &ExtractorConfig::default()).unwrap();
        assert_eq!(conv.messages, vec!["The flat array text is the one that is kept"]);
    }

    #[test]
    fn test_mapping_cycle_terminates() {
        let value = json!({
            "title": "Loop",
            "mapping": {
                "root": {"parent": null, "children": ["x"]},
                "x": {"parent": "root", "children": ["root"],
                    "message": {"content": {"parts": ["Only once even though it loops"]}}}
            }
        });
        let conv = conversation_from_value(&value, &ExtractorConfig::default()).unwrap();
        assert_eq!(conv.messages.len(), 1);
    }

    #[test]
    fn test_null_timestamps_and_missing_title() {
        let value = json!({"create_time": null, "update_time": "soon"});
        let conv = conversation_from_value(&value, &ExtractorConfig::default()).unwrap();
        assert_eq!(conv.title, "");
        assert_eq!(conv.create_time, None);
        assert_eq!(conv.update_time, None);
    }

    #[test]
    fn test_filters_short_and_system_messages() {
        let value = json!({
            "title": "Filtered",
            "messages": ["short", "You are ChatGPT, a large language model", "This one is long enough to keep"]
        });
        let conv = conversation_from_value(&value, &ExtractorConfig::default()).unwrap();
        assert_eq!(conv.messages, vec!["This one is long enough to keep"]);
    }

    #[test]
    fn test_non_object_is_none() {
        assert!(conversation_from_value(&json!("string"), &ExtractorConfig::default()).is_none());
    }

    #[test]
    fn test_array_parser_counts_skipped_entries() {
        let parser = JsonParser::array(ExtractorConfig::default());
        let extraction = parser
            .parse_str(r#"[{"title": "A"}, 7, {"title": "B"}]"#)
            .unwrap();
        assert_eq!(extraction.conversations.len(), 2);
        assert_eq!(extraction.skipped_blocks, 1);
    }

    #[test]
    fn test_invalid_json_is_file_error() {
        let parser = JsonParser::array(ExtractorConfig::default());
        let err = parser.parse_str(r#"[{"title": "A""#).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("JSON array"));
    }

    #[test]
    fn test_object_parser() {
        let parser = JsonParser::object(ExtractorConfig::default());
        let extraction = parser.parse_str(r#"{"title": "Solo"}"#).unwrap();
        assert_eq!(extraction.dialect, Dialect::JsonObject);
        assert_eq!(extraction.conversations[0].title, "Solo");
    }
}

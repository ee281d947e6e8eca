//! Description derivation.
//!
//! The description is assembled from up to three phrases joined by `". "`:
//!
//! 1. a topic phrase from the first matching [`TopicRule`], or failing that
//!    a `Discussion of ...` phrase built from "how to" / "create" / "build"
//!    fragments of the first three messages;
//! 2. `Created: ...` listing up to three deliverables;
//! 3. `Using: ...` listing up to three tools.
//!
//! A result shorter than 50 characters is replaced by the first long
//! message, if there is one.

use std::sync::LazyLock;

use regex::Regex;

use super::Classifier;
use super::rules::{contains_all, contains_any};
use crate::config::TopicRule;

/// Longest description ever returned, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 300;

const MIN_DESCRIPTION_CHARS: usize = 50;
const LONG_MESSAGE_CHARS: usize = 100;
const SNIPPET_CHARS: usize = 200;
const KEY_PHRASE_CHARS: usize = 30;
const MAX_LISTED: usize = 3;

static HOW_TO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)how to ([^.!?]+)").expect("how-to regex"));

static CREATE_OR_BUILD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:create|build)\s+(?:a\s+)?([^.!?]+)").expect("create/build regex")
});

impl Classifier {
    /// Derives the description for a conversation.
    ///
    /// Never longer than [`MAX_DESCRIPTION_CHARS`] characters.
    pub fn describe(&self, title: &str, messages: &[String]) -> String {
        let text = topic_text(title, messages);
        let mut parts = Vec::new();

        match find_topic(&self.taxonomy.topic_rules, &text) {
            Some(phrase) => parts.push(phrase.to_string()),
            None => {
                let phrases = key_phrases(messages);
                if !phrases.is_empty() {
                    let listed: Vec<&str> = phrases.iter().take(MAX_LISTED).map(String::as_str).collect();
                    parts.push(format!("Discussion of {}", listed.join(", ")));
                }
            }
        }

        let deliverables = self.matching_names(&self.deliverables, &text);
        if !deliverables.is_empty() {
            parts.push(format!("Created: {}", deliverables.join(", ")));
        }

        let tools = self.matching_names(&self.tools, &text);
        if !tools.is_empty() {
            parts.push(format!("Using: {}", tools.join(", ")));
        }

        let mut description = parts.join(". ");

        if description.chars().count() < MIN_DESCRIPTION_CHARS {
            if let Some(long) = messages
                .iter()
                .find(|m| m.chars().count() > LONG_MESSAGE_CHARS)
            {
                description = format!("{}...", truncate_chars(long, SNIPPET_CHARS));
            }
        }

        truncate_chars(&description, MAX_DESCRIPTION_CHARS).to_string()
    }

    fn matching_names<'a>(&'a self, patterns: &'a [super::CompiledPattern], text: &str) -> Vec<&'a str> {
        patterns
            .iter()
            .filter(|p| p.regex.is_match(text))
            .map(|p| p.name.as_str())
            .take(MAX_LISTED)
            .collect()
    }
}

/// Lowercase title plus the first two and last two messages.
///
/// With four messages or fewer every message is used once.
fn topic_text(title: &str, messages: &[String]) -> String {
    let mut text = title.to_lowercase();

    let picked: Vec<&String> = if messages.len() <= 4 {
        messages.iter().collect()
    } else {
        messages[..2].iter().chain(&messages[messages.len() - 2..]).collect()
    };

    for message in picked {
        text.push(' ');
        text.push_str(&message.to_lowercase());
    }
    text
}

fn find_topic<'a>(rules: &'a [TopicRule], text: &str) -> Option<&'a str> {
    rules
        .iter()
        .find(|rule| {
            (rule.any.is_empty() || contains_any(text, &rule.any)) && contains_all(text, &rule.all)
        })
        .map(|rule| rule.phrase.as_str())
}

/// Fragments following "how to" or "create"/"build" in the first three
/// messages, each capped at 30 characters.
fn key_phrases(messages: &[String]) -> Vec<String> {
    let mut phrases = Vec::new();

    for message in messages.iter().take(3) {
        for pattern in [&*HOW_TO, &*CREATE_OR_BUILD] {
            if let Some(m) = pattern.captures(message).and_then(|caps| caps.get(1)) {
                phrases.push(truncate_chars(m.as_str(), KEY_PHRASE_CHARS).to_string());
            }
        }
    }
    phrases
}

/// The first `max` characters of `s`.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

//! Rule-based conversation classifier.
//!
//! A [`Classifier`] is built once from an immutable [`Taxonomy`] and then
//! maps a conversation's title and messages to a [`Classification`]:
//!
//! - a description of at most 300 characters ([`Classifier::describe`])
//! - one to three categories from the taxonomy ([`Classifier::categorize`])
//! - one to five tags ([`Classifier::tag`])
//! - a relevance score in `[0.1, 1.0]` ([`Classifier::score`])
//!
//! Every step is deterministic. Keyword tables are ordered, and order
//! decides ties and which entries survive truncation.
//!
//! # Example
//!
//! ```rust
//! use chatsift::classifier::Classifier;
//! use chatsift::config::Taxonomy;
//!
//! let classifier = Classifier::new(Taxonomy::default())?;
//! let result = classifier.classify(
//!     "Welcome email sequence",
//!     &["Draft a five-part email sequence for new subscribers".to_string()],
//! );
//!
//! assert!(result.categories.contains(&"Copywriting - Emails".to_string()));
//! assert!(result.tags.contains(&"Email Sequence".to_string()));
//! # Ok::<(), chatsift::ChatsiftError>(())
//! ```

mod description;
mod labels;
mod relevance;
pub mod rules;

pub use description::{MAX_DESCRIPTION_CHARS, truncate_chars};
pub use relevance::{MAX_SCORE, MIN_SCORE};

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::config::{NamedPattern, Taxonomy};
use crate::error::{ChatsiftError, Result};

/// Everything the classifier derives for one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub description: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub relevance_score: f64,
}

/// A [`NamedPattern`] with its regex compiled.
#[derive(Debug, Clone)]
struct CompiledPattern {
    name: String,
    regex: Regex,
}

impl CompiledPattern {
    fn compile(pattern: &NamedPattern) -> Result<Self> {
        let regex = RegexBuilder::new(&pattern.pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                ChatsiftError::invalid_config(format!(
                    "bad pattern for '{}': {}",
                    pattern.name, e
                ))
            })?;
        Ok(Self {
            name: pattern.name.clone(),
            regex,
        })
    }
}

/// Heuristic classifier over a fixed taxonomy.
#[derive(Debug, Clone)]
pub struct Classifier {
    taxonomy: Taxonomy,
    deliverables: Vec<CompiledPattern>,
    tools: Vec<CompiledPattern>,
}

impl Classifier {
    /// Validates `taxonomy` and compiles its patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsiftError::InvalidConfig`] if the taxonomy fails
    /// validation or a deliverable/tool pattern is not a valid regex.
    pub fn new(taxonomy: Taxonomy) -> Result<Self> {
        taxonomy.validate()?;

        let deliverables = taxonomy
            .deliverables
            .iter()
            .map(CompiledPattern::compile)
            .collect::<Result<Vec<_>>>()?;
        let tools = taxonomy
            .tools
            .iter()
            .map(CompiledPattern::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            taxonomy,
            deliverables,
            tools,
        })
    }

    /// The taxonomy this classifier was built from.
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Runs every step for one conversation.
    pub fn classify(&self, title: &str, messages: &[String]) -> Classification {
        let description = self.describe(title, messages);
        let categories = self.categorize(title, &description, messages);
        let tags = self.tag(title, &description, messages);
        let relevance_score = self.score(&categories, &tags, messages.len());

        Classification {
            description,
            categories,
            tags,
            relevance_score,
        }
    }
}

impl Default for Classifier {
    /// A classifier over the built-in taxonomy.
    fn default() -> Self {
        Self::new(Taxonomy::default()).expect("built-in taxonomy is valid")
    }
}

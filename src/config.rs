//! Configuration types for extraction, classification and output.
//!
//! This module provides clean configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ExtractorConfig`] - message filtering and pass semantics
//! - [`Taxonomy`] - the closed category vocabulary and every keyword table
//!   the classifier uses
//! - [`RecordConfig`] - constant record metadata (creator, type, url base)
//! - [`OutputConfig`] - CSV chunking and report settings
//!
//! # Example
//!
//! ```rust
//! use chatsift::config::{ExtractorConfig, OutputConfig, Taxonomy};
//!
//! let extractor = ExtractorConfig::new().with_min_message_chars(30);
//! let output = OutputConfig::new().with_prefix("archive").with_chunk_size(250);
//! let taxonomy = Taxonomy::default();
//! assert!(taxonomy.validate().is_ok());
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChatsiftError, Result};

/// Configuration for the extractor.
///
/// # Example
///
/// ```rust
/// use chatsift::config::ExtractorConfig;
///
/// let config = ExtractorConfig::new()
///     .with_fallback_passes(true)
///     .with_system_prompt_prefix("System:");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// A message is kept only if its decoded length (in characters) exceeds this (default: 20)
    pub min_message_chars: usize,

    /// Messages starting with this prefix are treated as leaked system prompts (default: "You are")
    pub system_prompt_prefix: String,

    /// Only run the `value`/`content` passes when the `parts` pass found nothing (default: false)
    pub fallback_passes: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_message_chars: 20,
            system_prompt_prefix: "You are".to_string(),
            fallback_passes: false,
        }
    }
}

impl ExtractorConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum message length (exclusive).
    #[must_use]
    pub fn with_min_message_chars(mut self, chars: usize) -> Self {
        self.min_message_chars = chars;
        self
    }

    /// Sets the system-prompt prefix used to discard messages.
    #[must_use]
    pub fn with_system_prompt_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.system_prompt_prefix = prefix.into();
        self
    }

    /// Switches between accumulate-all and fallback-only pass semantics.
    #[must_use]
    pub fn with_fallback_passes(mut self, enabled: bool) -> Self {
        self.fallback_passes = enabled;
        self
    }

    /// Returns `true` if a decoded message should be kept.
    pub fn accepts(&self, message: &str) -> bool {
        message.chars().count() > self.min_message_chars
            && !message.starts_with(&self.system_prompt_prefix)
    }
}

/// A labelled keyword set with a weight.
///
/// Category rules score `weight` per keyword found; tag rules and fallback
/// rules fire when any keyword is found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    /// The label emitted when the rule matches
    pub label: String,
    /// Lowercase substrings to look for
    pub keywords: Vec<String>,
    /// Points per keyword hit
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl KeywordRule {
    /// Creates a rule with weight 1.
    pub fn new(label: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            label: label.into(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            weight: 1,
        }
    }

    /// Sets the weight of this rule.
    #[must_use]
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }
}

/// A description phrase chosen when the conversation text mentions any of
/// `any` (ignored when empty) and all of `all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRule {
    /// The canned phrase
    pub phrase: String,
    /// At least one of these must be present
    #[serde(default)]
    pub any: Vec<String>,
    /// Every one of these must be present
    #[serde(default)]
    pub all: Vec<String>,
}

impl TopicRule {
    fn any_of(phrase: &str, keywords: &[&str]) -> Self {
        Self {
            phrase: phrase.to_string(),
            any: keywords.iter().map(|k| (*k).to_string()).collect(),
            all: Vec::new(),
        }
    }

    fn all_of(phrase: &str, keywords: &[&str]) -> Self {
        Self {
            phrase: phrase.to_string(),
            any: Vec::new(),
            all: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }
}

/// A display name paired with a regular expression, used for the
/// "Created:" and "Using:" description phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPattern {
    /// Name listed in the description
    pub name: String,
    /// Case-insensitive regex
    pub pattern: String,
}

impl NamedPattern {
    fn new(name: &str, pattern: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
        }
    }
}

/// A named group of tag keywords. Every keyword found is added as a tag in
/// title case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagGroup {
    pub name: String,
    pub keywords: Vec<String>,
}

impl TagGroup {
    fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }
}

/// The closed category vocabulary and the keyword tables of the classifier.
///
/// Built once at startup and passed into
/// [`Classifier::new`](crate::classifier::Classifier::new). Tables are
/// ordered; order breaks score ties and decides which entries survive
/// truncation.
///
/// # Example
///
/// ```rust
/// use chatsift::config::Taxonomy;
///
/// let taxonomy = Taxonomy::from_json_str(r#"{
///     "categories": ["General Chat", "Finance"],
///     "category_rules": [{"label": "Finance", "keywords": ["invoice", "budget"]}],
///     "category_fallbacks": []
/// }"#)?;
/// assert_eq!(taxonomy.category_rules.len(), 1);
/// assert_eq!(taxonomy.default_category, "General Chat");
/// # Ok::<(), chatsift::ChatsiftError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Taxonomy {
    /// Every label a conversation may be classified into
    pub categories: Vec<String>,
    /// Scored category rules
    pub category_rules: Vec<KeywordRule>,
    /// First-match rules used when no category rule scored
    pub category_fallbacks: Vec<KeywordRule>,
    /// Label used when nothing else matches
    pub default_category: String,
    /// Maximum number of categories per conversation
    pub max_categories: usize,
    /// Description topic rules, first match wins
    pub topic_rules: Vec<TopicRule>,
    /// Deliverables listed after "Created:"
    pub deliverables: Vec<NamedPattern>,
    /// Tools listed after "Using:"
    pub tools: Vec<NamedPattern>,
    /// Keyword groups whose matches become tags
    pub tag_groups: Vec<TagGroup>,
    /// Keyword sets mapped to a fixed tag
    pub tag_rules: Vec<KeywordRule>,
    /// Tag used when nothing else matches
    pub default_tag: String,
    /// Maximum number of tags per conversation
    pub max_tags: usize,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|c| (*c).to_string()).collect(),
            category_rules: vec![
                KeywordRule::new(
                    "Project – Get The Receipts (GTR)",
                    &["valentina", "sage", "receipts", "gtr", "ofm", "quiz funnel", "personality test", "archetype"],
                ),
                KeywordRule::new(
                    "Project – TNT Media",
                    &["emma", "tnt", "tom clayson", "media buying", "acquisition", "creative strategy"],
                ),
                KeywordRule::new(
                    "Project – PaleoHacks / David Sinick",
                    &["paleohacks", "david sinick", "health funnel", "vsl", "keto", "paleo", "supplement"],
                ),
                KeywordRule::new(
                    "AI Bot Configurations",
                    &["system prompt", "personality", "voice", "tone", "character", "persona", "chatbot", "assistant config"],
                ),
                KeywordRule::new(
                    "Job - Copywriting",
                    &["portfolio", "writing sample", "application", "cover letter", "resume", "job posting", "interview prep"],
                ),
                KeywordRule::new(
                    "Job - AI Consultant",
                    &["ai consulting", "ai strategy", "implementation", "ai advisor"],
                ),
                KeywordRule::new(
                    "Health - Therapy",
                    &["trauma", "healing", "therapy", "emotional", "anxiety", "depression", "coping", "mental health", "processing"],
                ),
                KeywordRule::new(
                    "Prompt Engineering",
                    &["prompt", "few-shot", "zero-shot", "chain of thought", "system message", "instruction", "template"],
                ),
                KeywordRule::new(
                    "Copywriting - Emails",
                    &["email sequence", "subject line", "email campaign", "newsletter", "broadcast", "autoresponder"],
                ),
                KeywordRule::new(
                    "Copywriting - Sales Page",
                    &["sales page", "long form", "sales letter", "checkout", "order form", "guarantee", "testimonial"],
                ),
                KeywordRule::new(
                    "Business Strategy",
                    &["strategy", "planning", "roadmap", "framework", "analysis", "competitive", "positioning"],
                ),
                KeywordRule::new(
                    "Customer Research",
                    &["customer research", "avatar", "persona", "survey", "interview", "voice of customer", "market research"],
                ),
                KeywordRule::new(
                    "Google Drive",
                    &["google drive", "asset management", "shared drive", "drive folder"],
                ),
            ],
            category_fallbacks: vec![
                KeywordRule::new("Prompt Engineering", &["prompt", "template", "system"]),
                KeywordRule::new("Copywriting - Emails", &["email", "sequence", "newsletter"]),
                KeywordRule::new("Business Strategy", &["strategy", "planning", "framework"]),
                KeywordRule::new("Customer Research", &["research", "customer", "avatar"]),
            ],
            default_category: "General Chat".to_string(),
            max_categories: 3,
            topic_rules: vec![
                TopicRule::any_of("AI persona development for GTR quiz funnel", &["valentina", "sage"]),
                TopicRule::any_of("TNT Media brand and acquisition strategy", &["emma", "tnt"]),
                TopicRule::any_of("Job application materials and portfolio development", &["resume", "portfolio"]),
                TopicRule::any_of("Prompt engineering and template development", &["prompt"]),
                TopicRule::all_of("Building searchable asset management system", &["archive", "asset"]),
                TopicRule::all_of("Email sequence copywriting and optimization", &["email", "sequence"]),
                TopicRule::any_of("Landing/sales page copy and conversion optimization", &["landing", "sales page"]),
                TopicRule::any_of("Market and customer research analysis", &["research"]),
                TopicRule::any_of("Strategic planning and framework development", &["strategy"]),
            ],
            deliverables: vec![
                NamedPattern::new("email sequence", r"email\s+sequence"),
                NamedPattern::new("landing page", r"landing\s+page"),
                NamedPattern::new("sales page", r"sales\s+page"),
                NamedPattern::new("VSL script", r"vsl\s+script"),
                NamedPattern::new("ad copy", r"ad\s+copy"),
                NamedPattern::new("headline", r"headline"),
                NamedPattern::new("hook", r"hook"),
                NamedPattern::new("framework", r"framework"),
                NamedPattern::new("template", r"template"),
            ],
            tools: vec![
                NamedPattern::new("Claude", r"claude"),
                NamedPattern::new("ChatGPT", r"chatgpt|gpt"),
                NamedPattern::new("n8n", r"n8n"),
                NamedPattern::new("Cursor", r"cursor"),
                NamedPattern::new("Zapier", r"zapier"),
                NamedPattern::new("Airtable", r"airtable"),
            ],
            tag_groups: vec![
                TagGroup::new(
                    "tools",
                    &["claude", "gpt", "chatgpt", "n8n", "cursor", "zapier", "make", "airtable", "notion", "figma", "canva", "google drive"],
                ),
                TagGroup::new(
                    "deliverables",
                    &["email sequence", "landing page", "sales page", "vsl script", "ad copy", "headline", "hook", "lead magnet", "webinar", "funnel", "template", "framework"],
                ),
                TagGroup::new(
                    "techniques",
                    &["aida", "pas", "fab", "storytelling", "urgency", "scarcity", "social proof", "authority", "reciprocity"],
                ),
                TagGroup::new(
                    "clients",
                    &["valentina", "sage", "emma", "tom", "david sinick", "pauline", "stefan georgi", "luka mills"],
                ),
                TagGroup::new(
                    "work_types",
                    &["research", "strategy", "copywriting", "automation", "analysis", "optimization", "testing", "implementation"],
                ),
            ],
            tag_rules: vec![
                KeywordRule::new("GTR", &["gtr", "receipts"]),
                KeywordRule::new("TNT", &["tnt"]),
                KeywordRule::new("PaleoHacks", &["paleohacks"]),
                KeywordRule::new("Framework", &["framework"]),
                KeywordRule::new("Template", &["template"]),
                KeywordRule::new("Automation", &["automation", "n8n"]),
                KeywordRule::new("Analysis", &["analysis", "audit"]),
                KeywordRule::new("Email Sequence", &["email sequence"]),
                KeywordRule::new("Landing Page", &["landing page"]),
                KeywordRule::new("Sales Page", &["sales page"]),
                KeywordRule::new("VSL", &["vsl"]),
            ],
            default_tag: "General".to_string(),
            max_tags: 5,
        }
    }
}

const DEFAULT_CATEGORIES: &[&str] = &[
    "AI Bot Configurations",
    "Ad Copy Frameworks",
    "Business Strategy",
    "Client Management",
    "Company Culture",
    "Content Strategy",
    "Copywriting Frameworks",
    "Copywriting - Emails",
    "Copywriting - Landing Page",
    "Copywriting - Sales Page",
    "Copywriting - Website",
    "Copywriting - Ads",
    "Copywriting - Funnels",
    "Copywriting Prompts",
    "Customer Research",
    "Email & Newsletters",
    "Finance",
    "GEO SEO Frameworks",
    "General Chat",
    "General Frameworks",
    "Generated Data",
    "Google Drive",
    "HR",
    "Health - Therapy",
    "Health - [Focus]",
    "Idea Research & New Projects",
    "Job - AI Consultant",
    "Job - Copywriting",
    "Job - Strategy",
    "Job - UX Writing",
    "Landing Pages",
    "Legal",
    "Market Research",
    "Marketing",
    "Miscellaneous AI Research",
    "Newsletters",
    "Project Management",
    "Project – AI Valentina",
    "Project – Copy Accelerator (CA)",
    "Project – Emma Brand",
    "Project – GEO SEO AI",
    "Project – Get The Receipts (GTR)",
    "Project – PaleoHacks / David Sinick",
    "Project – Pauline Longdon",
    "Project – TNT Media",
    "Prompt Engineering",
    "Sales Page Systems",
    "Training & Resources",
    "VSL Frameworks",
    "Voice & Tone Systems",
];

impl Taxonomy {
    /// Loads a taxonomy from a JSON string. Missing fields take their
    /// built-in defaults. The result is validated.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let taxonomy: Taxonomy = serde_json::from_str(json)?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Loads a taxonomy from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Checks that every label the classifier can emit as a category
    /// belongs to the vocabulary and that the limits are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_categories == 0 || self.max_tags == 0 {
            return Err(ChatsiftError::invalid_config(
                "max_categories and max_tags must be at least 1",
            ));
        }
        if self.default_tag.trim().is_empty() {
            return Err(ChatsiftError::invalid_config("default_tag must not be empty"));
        }

        let emitted = self
            .category_rules
            .iter()
            .chain(&self.category_fallbacks)
            .map(|rule| rule.label.as_str())
            .chain(std::iter::once(self.default_category.as_str()));

        for label in emitted {
            if !self.categories.iter().any(|c| c == label) {
                return Err(ChatsiftError::invalid_config(format!(
                    "category '{}' is not part of the taxonomy vocabulary",
                    label
                )));
            }
        }
        Ok(())
    }
}

/// Constant metadata stamped onto every record.
///
/// # Example
///
/// ```rust
/// use chatsift::config::RecordConfig;
///
/// let config = RecordConfig::new().with_creator("Research Team");
/// assert_eq!(config.kind, "chatgpt");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordConfig {
    /// Value of the `creator` column
    pub creator: String,
    /// Value of the `type` column
    pub kind: String,
    /// Prefix of the `url` column; the title digest is appended
    pub url_base: String,
    /// Titles that mark a conversation as unnamed; such records are dropped
    pub placeholder_titles: Vec<String>,
    /// Cleaned titles are capped at this many characters
    pub max_title_chars: usize,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            creator: "chatsift".to_string(),
            kind: "chatgpt".to_string(),
            url_base: "https://chat.openai.com/c/".to_string(),
            placeholder_titles: vec!["New conversation".to_string()],
            max_title_chars: 100,
        }
    }
}

impl RecordConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    #[must_use]
    pub fn with_url_base(mut self, url_base: impl Into<String>) -> Self {
        self.url_base = url_base.into();
        self
    }
}

/// Configuration for the output files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Prefix for every output file name (may include a directory)
    pub prefix: String,
    /// Maximum rows per CSV chunk (default: 500)
    pub chunk_size: usize,
    /// Also write a single `<prefix>_merged.csv`
    pub merge: bool,
    /// Write `<prefix>_report.json`
    pub report: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: "gemini_ready".to_string(),
            chunk_size: 500,
            merge: false,
            report: true,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the chunk size. Zero is treated as one.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    #[must_use]
    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    #[must_use]
    pub fn with_report(mut self, report: bool) -> Self {
        self.report = report;
        self
    }

    /// File name of the 1-based chunk `index`.
    pub fn chunk_path(&self, index: usize) -> String {
        format!("{}_chunk_{:03}.csv", self.prefix, index)
    }

    /// File name of the merged CSV.
    pub fn merged_path(&self) -> String {
        format!("{}_merged.csv", self.prefix)
    }

    /// File name of the JSON report.
    pub fn report_path(&self) -> String {
        format!("{}_report.json", self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_defaults() {
        let config = ExtractorConfig::default();
        assert_eq!(config.min_message_chars, 20);
        assert_eq!(config.system_prompt_prefix, "You are");
        assert!(!config.fallback_passes);
    }

    #[test]
    fn test_extractor_accepts() {
        let config = ExtractorConfig::new();
        assert!(config.accepts("This message is comfortably long"));
        assert!(!config.accepts("exactly twenty chars"));
        assert!(config.accepts("exactly twenty one ch"));
        assert!(!config.accepts("You are a helpful assistant that writes copy"));
    }

    #[test]
    fn test_accepts_counts_characters_not_bytes() {
        let config = ExtractorConfig::new();
        // 11 two-byte characters: 22 bytes but only 11 chars
        assert!(!config.accepts("ééééééééééé"));
    }

    #[test]
    fn test_default_taxonomy_is_valid() {
        assert!(Taxonomy::default().validate().is_ok());
    }

    #[test]
    fn test_taxonomy_rejects_unknown_label() {
        let mut taxonomy = Taxonomy::default();
        taxonomy
            .category_rules
            .push(KeywordRule::new("Underwater Basket Weaving", &["basket"]));
        let err = taxonomy.validate().unwrap_err();
        assert!(err.to_string().contains("Underwater Basket Weaving"));
    }

    #[test]
    fn test_taxonomy_rejects_zero_limits() {
        let mut taxonomy = Taxonomy::default();
        taxonomy.max_tags = 0;
        assert!(taxonomy.validate().is_err());
    }

    #[test]
    fn test_taxonomy_from_json_partial() {
        let taxonomy = Taxonomy::from_json_str(
            r#"{"max_tags": 2, "tag_rules": [{"label": "Budget", "keywords": ["budget"]}]}"#,
        )
        .unwrap();
        assert_eq!(taxonomy.max_tags, 2);
        assert_eq!(taxonomy.tag_rules.len(), 1);
        assert_eq!(taxonomy.tag_rules[0].weight, 1);
        // untouched fields keep the built-in tables
        assert_eq!(taxonomy.category_rules, Taxonomy::default().category_rules);
    }

    #[test]
    fn test_taxonomy_from_invalid_json() {
        let err = Taxonomy::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ChatsiftError::Json(_)));
    }

    #[test]
    fn test_output_paths() {
        let config = OutputConfig::new().with_prefix("out/archive");
        assert_eq!(config.chunk_path(1), "out/archive_chunk_001.csv");
        assert_eq!(config.chunk_path(12), "out/archive_chunk_012.csv");
        assert_eq!(config.merged_path(), "out/archive_merged.csv");
        assert_eq!(config.report_path(), "out/archive_report.json");
    }

    #[test]
    fn test_chunk_size_never_zero() {
        assert_eq!(OutputConfig::new().with_chunk_size(0).chunk_size, 1);
    }

    #[test]
    fn test_record_config_builder() {
        let config = RecordConfig::new()
            .with_creator("Ops")
            .with_kind("claude")
            .with_url_base("https://example.com/c/");
        assert_eq!(config.creator, "Ops");
        assert_eq!(config.kind, "claude");
        assert_eq!(config.url_base, "https://example.com/c/");
        assert_eq!(config.placeholder_titles, vec!["New conversation"]);
    }
}

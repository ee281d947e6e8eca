//! Category and tag derivation.

use super::Classifier;
use super::rules::{all_matches, first_match, push_unique, score_rules, title_case};

impl Classifier {
    /// Picks up to `max_categories` labels for a conversation.
    ///
    /// Scored rules are ranked by hit count (ties keep table order). When
    /// nothing scores, the first matching fallback rule decides, and the
    /// default category covers the rest. Never empty.
    pub fn categorize(&self, title: &str, description: &str, messages: &[String]) -> Vec<String> {
        let text = labeling_text(title, description, messages, 5);
        let taxonomy = &self.taxonomy;

        let scored = score_rules(&taxonomy.category_rules, &text);
        if !scored.is_empty() {
            let mut categories = Vec::new();
            for (label, _) in scored {
                push_unique(&mut categories, label);
                if categories.len() == taxonomy.max_categories {
                    break;
                }
            }
            return categories;
        }

        let fallback = first_match(&taxonomy.category_fallbacks, &text)
            .unwrap_or(taxonomy.default_category.as_str());
        vec![fallback.to_string()]
    }

    /// Derives up to `max_tags` tags for a conversation.
    ///
    /// Tag-group keywords come first (title-cased, in table order), then the
    /// fixed tag rules. Duplicates are dropped, first occurrence kept. Never
    /// empty.
    pub fn tag(&self, title: &str, description: &str, messages: &[String]) -> Vec<String> {
        let text = labeling_text(title, description, messages, 3);
        let taxonomy = &self.taxonomy;
        let mut tags = Vec::new();

        for group in &taxonomy.tag_groups {
            for keyword in &group.keywords {
                if text.contains(keyword.as_str()) {
                    push_unique(&mut tags, &title_case(keyword));
                }
            }
        }

        for label in all_matches(&taxonomy.tag_rules, &text) {
            push_unique(&mut tags, label);
        }

        tags.truncate(taxonomy.max_tags);
        if tags.is_empty() {
            tags.push(taxonomy.default_tag.clone());
        }
        tags
    }
}

/// Lowercase `title description m1 m2 ...` over the first `take` messages.
fn labeling_text(title: &str, description: &str, messages: &[String], take: usize) -> String {
    let mut text = format!("{title} {description}");
    for message in messages.iter().take(take) {
        text.push(' ');
        text.push_str(message);
    }
    text.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KeywordRule, Taxonomy};

    fn classifier() -> Classifier {
        Classifier::new(Taxonomy::default()).unwrap()
    }

    fn msgs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_categories_ranked_by_hits() {
        let cats = classifier().categorize(
            "Sales page rewrite",
            "",
            &msgs(&["Add a guarantee and a testimonial block above the order form"]),
        );
        assert_eq!(cats[0], "Copywriting - Sales Page");
    }

    #[test]
    fn test_categories_capped_at_three() {
        let cats = classifier().categorize(
            "GTR quiz funnel",
            "",
            &msgs(&[
                "Valentina needs an email sequence, a sales page, a strategy roadmap and a prompt",
            ]),
        );
        assert_eq!(cats.len(), 3);
        assert_eq!(cats[0], "Project – Get The Receipts (GTR)");
    }

    #[test]
    fn test_fallback_chain() {
        let c = classifier();
        assert_eq!(c.categorize("System check", "", &[]), vec!["Prompt Engineering"]);
        assert_eq!(c.categorize("Weekly email", "", &[]), vec!["Copywriting - Emails"]);
        assert_eq!(c.categorize("Customer call notes", "", &[]), vec!["Customer Research"]);
        assert_eq!(c.categorize("Weekend hiking", "", &[]), vec!["General Chat"]);
    }

    #[test]
    fn test_messages_beyond_fifth_ignored_for_categories() {
        let mut messages = msgs(&["nothing relevant in these lines at all"; 5]);
        messages.push("paleohacks keto supplement vsl".to_string());
        assert_eq!(classifier().categorize("Hiking", "", &messages), vec!["General Chat"]);
    }

    #[test]
    fn test_tags_archive_example() {
        let c = classifier();
        let title = "Archive and asset management";
        let messages = msgs(&[
            "I need help organizing my Google Drive archive for asset management of all my copywriting work",
            "Let's build a template library so every asset management folder follows the same naming",
        ]);
        let description = c.describe(title, &messages);
        let tags = c.tag(title, &description, &messages);
        assert_eq!(tags, vec!["Google Drive", "Template", "Copywriting"]);
    }

    #[test]
    fn test_tags_fixed_rules_and_cap() {
        let tags = classifier().tag(
            "GTR receipts",
            "",
            &msgs(&["Claude and n8n automation for the landing page framework and the template"]),
        );
        assert_eq!(tags.len(), 5);
        assert_eq!(tags[0], "Claude");
        assert_eq!(tags[1], "N8N");
        assert!(!tags.iter().any(|t| t == "GTR"));
    }

    #[test]
    fn test_tags_default() {
        assert_eq!(classifier().tag("Weekend hiking", "", &[]), vec!["General"]);
    }

    #[test]
    fn test_tags_no_duplicates() {
        let tags = classifier().tag("framework", "", &[]);
        assert_eq!(tags, vec!["Framework"]);
    }

    #[test]
    fn test_custom_taxonomy() {
        let taxonomy = Taxonomy {
            categories: vec!["Finance".into(), "Other".into()],
            category_rules: vec![KeywordRule::new("Finance", &["invoice"])],
            category_fallbacks: Vec::new(),
            default_category: "Other".into(),
            ..Taxonomy::default()
        };
        let c = Classifier::new(taxonomy).unwrap();
        assert_eq!(c.categorize("Invoice chasing", "", &[]), vec!["Finance"]);
        assert_eq!(c.categorize("Nothing", "", &[]), vec!["Other"]);
    }
}

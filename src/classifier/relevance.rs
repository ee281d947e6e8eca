//! Relevance scoring.

use super::Classifier;

pub const MIN_SCORE: f64 = 0.1;
pub const MAX_SCORE: f64 = 1.0;

const BASE_SCORE: f64 = 0.5;
const BUILDING_BLOCK_TAGS: &[&str] = &["Framework", "Template", "System"];
const DELIVERABLE_TAGS: &[&str] = &["Email Sequence", "Landing Page", "Sales Page"];

impl Classifier {
    /// Scores a classified conversation, rounded to two decimals and
    /// clamped to `[0.1, 1.0]`.
    pub fn score(&self, categories: &[String], tags: &[String], message_count: usize) -> f64 {
        let has_tag = |wanted: &[&str]| tags.iter().any(|t| wanted.contains(&t.as_str()));

        let mut score = BASE_SCORE;

        if categories.iter().any(|c| c.contains("Project")) {
            score += 0.2;
        }
        if has_tag(BUILDING_BLOCK_TAGS) {
            score += 0.15;
        }
        if has_tag(DELIVERABLE_TAGS) {
            score += 0.15;
        }
        if message_count > 10 {
            score += 0.1;
        }
        if categories.iter().any(|c| c == "Business Strategy") || has_tag(&["Analysis"]) {
            score += 0.1;
        }
        if categories.len() == 1 && categories[0] == self.taxonomy.default_category {
            score -= 0.2;
        }
        if message_count < 3 {
            score -= 0.1;
        }

        // Two decimals, the precision the CSV and report buckets use
        let score = (score * 100.0).round() / 100.0;
        score.clamp(MIN_SCORE, MAX_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Taxonomy;

    fn classifier() -> Classifier {
        Classifier::new(Taxonomy::default()).unwrap()
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_general_chat_penalties() {
        let score = classifier().score(&labels(&["General Chat"]), &labels(&["General"]), 1);
        assert!(approx(score, 0.2));
    }

    #[test]
    fn test_neutral_conversation() {
        let score = classifier().score(&labels(&["Finance"]), &labels(&["General"]), 5);
        assert!(approx(score, 0.5));
    }

    #[test]
    fn test_clamped_to_max() {
        let score = classifier().score(
            &labels(&["Project – TNT Media", "Business Strategy"]),
            &labels(&["Template", "Landing Page", "Analysis"]),
            25,
        );
        assert!(approx(score, MAX_SCORE));
    }

    #[test]
    fn test_general_chat_with_other_categories_not_penalised() {
        let score = classifier().score(&labels(&["General Chat", "Finance"]), &labels(&["General"]), 5);
        assert!(approx(score, 0.5));
    }

    #[test]
    fn test_boosts_add_up() {
        let score = classifier().score(&labels(&["Prompt Engineering"]), &labels(&["Framework"]), 11);
        assert!(approx(score, 0.75));
    }

    #[test]
    fn test_project_with_many_messages_reaches_high() {
        let score = classifier().score(&labels(&["Project – TNT Media"]), &labels(&["TNT"]), 11);
        assert_eq!(score, 0.8);

        let score = classifier().score(&labels(&["Project – TNT Media"]), &labels(&["Analysis"]), 5);
        assert_eq!(score, 0.8);
    }
}

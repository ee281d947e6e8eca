//! Generic keyword-table helpers shared by the classifier steps.

use crate::config::KeywordRule;

/// Scores every rule against lowercase `text`.
///
/// A rule scores `weight` for each of its keywords found as a substring.
/// Rules scoring zero are dropped; the rest are sorted by score descending.
/// The sort is stable, so ties keep table order.
pub fn score_rules<'a>(rules: &'a [KeywordRule], text: &str) -> Vec<(&'a str, u32)> {
    let mut scored: Vec<(&str, u32)> = rules
        .iter()
        .filter_map(|rule| {
            let hits = rule
                .keywords
                .iter()
                .filter(|kw| text.contains(kw.as_str()))
                .count();
            let score = u32::try_from(hits).unwrap_or(u32::MAX).saturating_mul(rule.weight);
            (score > 0).then_some((rule.label.as_str(), score))
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
}

/// Label of the first rule with any keyword in `text`.
pub fn first_match<'a>(rules: &'a [KeywordRule], text: &str) -> Option<&'a str> {
    rules
        .iter()
        .find(|rule| contains_any(text, &rule.keywords))
        .map(|rule| rule.label.as_str())
}

/// Every rule label with any keyword in `text`, in table order.
pub fn all_matches<'a>(rules: &'a [KeywordRule], text: &'a str) -> impl Iterator<Item = &'a str> {
    rules
        .iter()
        .filter(move |rule| contains_any(text, &rule.keywords))
        .map(|rule| rule.label.as_str())
}

pub fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|kw| text.contains(kw.as_str()))
}

pub fn contains_all(text: &str, keywords: &[String]) -> bool {
    keywords.iter().all(|kw| text.contains(kw.as_str()))
}

/// Title-cases a keyword: a letter is uppercased when it follows a
/// non-letter (or starts the string), lowercased otherwise.
///
/// `"google drive"` becomes `"Google Drive"`, `"n8n"` becomes `"N8N"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;

    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }
    out
}

/// Pushes `item` unless it is already present.
pub(crate) fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}

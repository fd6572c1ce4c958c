//! Keyword matching
//!
//! A rule matches an event when the rule's type equals the event type and
//! the event value case-insensitively contains one of the rule's keywords.

use crate::config::{TriggerRule, TriggerType};

/// Check whether any keyword is a case-insensitive substring of `value`
///
/// Blank keywords never match anything.
pub fn keyword_match(keywords: &[String], value: &str) -> bool {
    let value = value.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| !keyword.trim().is_empty())
        .any(|keyword| value.contains(&keyword.to_lowercase()))
}

/// Find the first rule in `rules` that matches the given event
///
/// First-match-wins: later rules in the same action are not consulted once
/// one matches, so their probabilities never stack.
pub fn first_matching_rule<'a>(
    rules: &'a [TriggerRule],
    trigger_type: TriggerType,
    value: &str,
) -> Option<&'a TriggerRule> {
    rules
        .iter()
        .filter(|rule| rule.trigger_type == trigger_type)
        .find(|rule| keyword_match(&rule.keywords, value))
}

//! Declarative request-body validation
//!
//! Each endpoint's expected shape is a plain slice of [`FieldRule`]s, and
//! [`check`] evaluates a JSON body against it, returning every violation
//! rather than stopping at the first. Fields not named by a rule are
//! ignored. All validation runs before any store access.

use crate::core::Violation;
use serde_json::Value;

/// Maximum accepted username length, in characters
pub const MAX_USERNAME_LEN: usize = 15;

/// Constraints on one required string field of a request body
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Field name looked up in the body object
    pub name: &'static str,
    /// Maximum length in characters, if any
    pub max_len: Option<usize>,
}

/// Shape of a sign-up body: `{username, avatar}`
pub const SIGN_UP_RULES: &[FieldRule] = &[
    FieldRule {
        name: "username",
        max_len: Some(MAX_USERNAME_LEN),
    },
    FieldRule {
        name: "avatar",
        max_len: None,
    },
];

/// Shape of a tweet body: `{username, tweet}`; used by create and update
pub const TWEET_RULES: &[FieldRule] = &[
    FieldRule {
        name: "username",
        max_len: None,
    },
    FieldRule {
        name: "tweet",
        max_len: None,
    },
];

/// Evaluate `body` against `rules`, collecting every violation.
///
/// Every ruled field is required, must be a string, and must be non-empty;
/// a `max_len` rule additionally bounds its character count.
pub fn check(rules: &[FieldRule], body: &Value) -> Vec<Violation> {
    let mut violations = Vec::new();

    for rule in rules {
        let value = match body.get(rule.name) {
            Some(value) => value,
            None => {
                violations.push(Violation::new(rule.name, "is required"));
                continue;
            }
        };

        let text = match value.as_str() {
            Some(text) => text,
            None => {
                violations.push(Violation::new(rule.name, "must be a string"));
                continue;
            }
        };

        if text.is_empty() {
            violations.push(Violation::new(rule.name, "must not be empty"));
            continue;
        }

        if let Some(max_len) = rule.max_len {
            if text.chars().count() > max_len {
                violations.push(Violation::new(
                    rule.name,
                    format!("must be at most {} characters", max_len),
                ));
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_sign_up_body_passes() {
        let body = json!({"username": "ana", "avatar": "a.png"});
        assert!(check(SIGN_UP_RULES, &body).is_empty());
    }

    #[test]
    fn username_at_limit_passes_over_limit_fails() {
        let body = json!({"username": "a".repeat(15), "avatar": "a.png"});
        assert!(check(SIGN_UP_RULES, &body).is_empty());

        let body = json!({"username": "a".repeat(16), "avatar": "a.png"});
        let violations = check(SIGN_UP_RULES, &body);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "username");
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let violations = check(SIGN_UP_RULES, &json!({}));
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "username");
        assert_eq!(violations[1].field, "avatar");
    }

    #[test]
    fn non_string_field_is_reported() {
        let body = json!({"username": 42, "avatar": "a.png"});
        let violations = check(SIGN_UP_RULES, &body);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "must be a string");
    }

    #[test]
    fn empty_string_is_reported() {
        let body = json!({"username": "", "tweet": "hi"});
        let violations = check(TWEET_RULES, &body);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "must not be empty");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let body = json!({"username": "ana", "tweet": "hi", "extra": true});
        assert!(check(TWEET_RULES, &body).is_empty());
    }

    #[test]
    fn tweet_text_has_no_length_limit() {
        let body = json!({"username": "ana", "tweet": "x".repeat(10_000)});
        assert!(check(TWEET_RULES, &body).is_empty());
    }

    #[test]
    fn length_limit_counts_characters_not_bytes() {
        // 15 multibyte characters is still within the limit
        let body = json!({"username": "ñ".repeat(15), "avatar": "a.png"});
        assert!(check(SIGN_UP_RULES, &body).is_empty());
    }
}

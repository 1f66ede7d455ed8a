//! Declarative form validation: a rule set per field, checked by a pure
//! function against the current form values. Screens re-run validation on
//! every field change and block submission while any error remains.

use regex::Regex;

use crate::models::FieldError;

pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
// Regional mobile numbers: optional +20/0 prefix, then 1[0125] and 8 digits.
pub const PHONE_PATTERN: &str = r"^(?:\+20|0)?1[0125][-\s]?[0-9]{4}[-\s]?[0-9]{4}$";
pub const DOB_PATTERN: &str = r"^\d{2}-\d{2}-\d{4}$";

const PASSWORD_SPECIALS: &str = "@$!%*?&";

pub enum Rule {
    Required { message: &'static str },
    MinLen { min: usize, message: &'static str },
    MaxLen { max: usize, message: &'static str },
    Matches { pattern: &'static str, message: &'static str },
    /// Full password policy: length plus lower/upper/digit/special classes,
    /// drawn from the allowed alphabet only.
    Password { message: &'static str },
    OneOf { allowed: &'static [&'static str], message: &'static str },
}

impl Rule {
    fn check(&self, value: &str) -> Option<&'static str> {
        match self {
            Rule::Required { message } => value.is_empty().then_some(*message),
            Rule::MinLen { min, message } => (value.chars().count() < *min).then_some(*message),
            Rule::MaxLen { max, message } => (value.chars().count() > *max).then_some(*message),
            Rule::Matches { pattern, message } => {
                let regex = Regex::new(pattern).unwrap();
                (!regex.is_match(value)).then_some(*message)
            }
            Rule::Password { message } => (!password_ok(value)).then_some(*message),
            Rule::OneOf { allowed, message } => (!allowed.contains(&value)).then_some(*message),
        }
    }
}

pub struct FieldRule {
    pub field: &'static str,
    pub rules: &'static [Rule],
}

/// Field lookup for a form struct; unknown fields read as empty.
pub trait FormRecord {
    fn value(&self, field: &str) -> &str;
}

/// Check every field against its rules; at most one error per field (the
/// first failing rule wins).
pub fn validate(record: &dyn FormRecord, rules: &[FieldRule]) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for field_rule in rules {
        let value = record.value(field_rule.field);
        for rule in field_rule.rules {
            if let Some(message) = rule.check(value) {
                errors.push(FieldError {
                    field: field_rule.field,
                    message: message.to_string(),
                });
                break;
            }
        }
    }

    errors
}

fn password_ok(value: &str) -> bool {
    value.len() >= 8
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c))
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

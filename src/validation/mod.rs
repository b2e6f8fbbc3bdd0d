//! Declarative form validation.
//!
//! Every form type declares an ordered list of [`FieldRule`]s. Each rule is a
//! chain of checks on the trimmed field value; the first failing check of a
//! field produces that field's error and the remaining checks of the field are
//! skipped. All fields are always evaluated.

mod rules;

pub use rules::*;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

use crate::db::{AccountStore, StoreError};

lazy_static! {
    /// Something@something.tld, no whitespace
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();

    /// Letters and digits only, used for classification names
    static ref ALPHANUMERIC_REGEX: Regex = Regex::new(r"^[A-Za-z0-9]+$").unwrap();
}

/// Read access to submitted form fields by name.
pub trait FormInput {
    fn value(&self, field: &str) -> Option<&str>;
}

impl FormInput for HashMap<String, String> {
    fn value(&self, field: &str) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered field errors. Empty means the submission passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn all(&self) -> &[FieldError] {
        &self.errors
    }

    /// Message recorded for `field`, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has(&self, field: &str) -> bool {
        self.message_for(field).is_some()
    }

    /// Ok(()) if no errors, or Err(self) otherwise
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[derive(Debug, Clone)]
enum Check {
    Required,
    MinLength(usize),
    Email,
    AlphaNumeric,
    Integer { min: Option<i64>, max: Option<i64> },
    Number { min: Option<f64> },
    StrongPassword,
    HasDigit,
    HasUppercase,
    HasLowercase,
    HasSymbol,
    /// No stored account may use this email, except `current` when it is
    /// the email of the account being edited.
    EmailAvailable { current: Option<String> },
}

impl Check {
    async fn passes(&self, value: &str, accounts: &dyn AccountStore) -> Result<bool, StoreError> {
        let ok = match self {
            Check::Required => !value.is_empty(),
            Check::MinLength(min) => value.chars().count() >= *min,
            Check::Email => EMAIL_REGEX.is_match(value),
            Check::AlphaNumeric => ALPHANUMERIC_REGEX.is_match(value),
            Check::Integer { min, max } => match value.parse::<i64>() {
                Ok(n) => min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m),
                Err(_) => false,
            },
            Check::Number { min } => match value.parse::<f64>() {
                Ok(n) if n.is_finite() => min.map_or(true, |m| n >= m),
                _ => false,
            },
            Check::StrongPassword => is_strong_password(value),
            Check::HasDigit => value.chars().any(|c| c.is_ascii_digit()),
            Check::HasUppercase => value.chars().any(|c| c.is_uppercase()),
            Check::HasLowercase => value.chars().any(|c| c.is_lowercase()),
            Check::HasSymbol => value.chars().any(is_symbol),
            Check::EmailAvailable { current } => {
                let unchanged = current
                    .as_deref()
                    .map_or(false, |c| c.eq_ignore_ascii_case(value));
                unchanged || !accounts.email_exists(&value.to_lowercase()).await?
            }
        };
        Ok(ok)
    }
}

/// Letters and digits of any script are never symbols.
fn is_symbol(c: char) -> bool {
    !c.is_alphanumeric()
}

/// At least 12 characters with a lowercase, an uppercase, a digit and a symbol.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 12
        && password.chars().any(|c| c.is_lowercase())
        && password.chars().any(|c| c.is_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(is_symbol)
}

/// Check chain for one field, built in evaluation order.
#[derive(Debug, Clone)]
pub struct FieldRule {
    field: &'static str,
    checks: Vec<(Check, &'static str)>,
}

impl FieldRule {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            checks: Vec::new(),
        }
    }

    fn check(mut self, check: Check, message: &'static str) -> Self {
        self.checks.push((check, message));
        self
    }

    pub fn required(self, message: &'static str) -> Self {
        self.check(Check::Required, message)
    }

    pub fn min_length(self, min: usize, message: &'static str) -> Self {
        self.check(Check::MinLength(min), message)
    }

    pub fn email(self, message: &'static str) -> Self {
        self.check(Check::Email, message)
    }

    pub fn alphanumeric(self, message: &'static str) -> Self {
        self.check(Check::AlphaNumeric, message)
    }

    /// Integer within `min..=max`
    pub fn integer_between(self, min: i64, max: i64, message: &'static str) -> Self {
        self.check(
            Check::Integer {
                min: Some(min),
                max: Some(max),
            },
            message,
        )
    }

    pub fn integer_at_least(self, min: i64, message: &'static str) -> Self {
        self.check(
            Check::Integer {
                min: Some(min),
                max: None,
            },
            message,
        )
    }

    pub fn integer(self, message: &'static str) -> Self {
        self.check(Check::Integer { min: None, max: None }, message)
    }

    pub fn number_at_least(self, min: f64, message: &'static str) -> Self {
        self.check(Check::Number { min: Some(min) }, message)
    }

    pub fn strong_password(self, message: &'static str) -> Self {
        self.check(Check::StrongPassword, message)
    }

    pub fn has_digit(self, message: &'static str) -> Self {
        self.check(Check::HasDigit, message)
    }

    pub fn has_uppercase(self, message: &'static str) -> Self {
        self.check(Check::HasUppercase, message)
    }

    pub fn has_lowercase(self, message: &'static str) -> Self {
        self.check(Check::HasLowercase, message)
    }

    pub fn has_symbol(self, message: &'static str) -> Self {
        self.check(Check::HasSymbol, message)
    }

    /// Fails when any stored account already uses the email.
    pub fn email_available(self, message: &'static str) -> Self {
        self.check(Check::EmailAvailable { current: None }, message)
    }

    /// Like `email_available`, but keeping `current` is not a collision.
    pub fn email_available_except(self, current: &str, message: &'static str) -> Self {
        self.check(
            Check::EmailAvailable {
                current: Some(current.to_string()),
            },
            message,
        )
    }
}

/// The ordered rules of one form.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// Evaluate every field. Store errors from uniqueness checks propagate.
    pub async fn validate<F>(
        &self,
        form: &F,
        accounts: &dyn AccountStore,
    ) -> Result<ValidationErrors, StoreError>
    where
        F: FormInput + Sync + ?Sized,
    {
        let mut errors = ValidationErrors::new();
        for rule in &self.rules {
            let value = form.value(rule.field).unwrap_or("").trim();
            for (check, message) in &rule.checks {
                if !check.passes(value, accounts).await? {
                    errors.add(rule.field, *message);
                    break;
                }
            }
        }
        Ok(errors)
    }
}

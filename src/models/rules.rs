// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Field rule table: identifier -> (full-match predicate, message).
//!
//! Built once when the form session starts and never mutated afterwards.

use anyhow::{Context, Result};
use regex::Regex;

/// Symbols a password may (and must at least once) contain.
pub const PASSWORD_SYMBOLS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];

/// How a rule decides whether a value is acceptable.
#[derive(Clone, Debug)]
pub enum Pattern {
    /// Anchored regular expression; the whole value must match.
    Regex(Regex),
    /// Hand-written check for constraints the regex engine cannot express.
    Predicate(fn(&str) -> bool),
}

impl Pattern {
    fn anchored(expr: &str) -> Result<Self> {
        let re = Regex::new(&format!("^(?:{expr})$"))
            .with_context(|| format!("Invalid field pattern: {expr}"))?;
        Ok(Self::Regex(re))
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Regex(re) => re.is_match(value),
            Self::Predicate(check) => check(value),
        }
    }
}

/// A single validation rule bound to a field identifier.
#[derive(Clone, Debug)]
pub struct Rule {
    pub field: &'static str,
    pub pattern: Pattern,
    pub message: &'static str,
}

impl Rule {
    pub fn accepts(&self, value: &str) -> bool {
        self.pattern.matches(value)
    }
}

/// Immutable lookup table of field rules.
#[derive(Clone, Debug)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Rules for the registration form.
    ///
    /// # Errors
    ///
    /// Returns an error if one of the built-in patterns fails to compile.
    pub fn registration() -> Result<Self> {
        let rules = vec![
            Rule {
                field: "fname",
                pattern: Pattern::anchored("[A-Za-z]{1,32}")?,
                message: "First name should contain only letters (max 30 characters)",
            },
            Rule {
                field: "lname",
                pattern: Pattern::anchored("[A-Za-z]{1,32}")?,
                message: "Last name should contain only letters (max 30 characters)",
            },
            Rule {
                field: "age",
                pattern: Pattern::anchored("1[5-9]|[2-9][0-9]")?,
                message: "Age must be between 15 and 99",
            },
            Rule {
                field: "email",
                pattern: Pattern::anchored(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,63}")?,
                message: "Please enter a valid email address",
            },
            Rule {
                field: "phone-number",
                pattern: Pattern::anchored("[6-9][0-9]{9}")?,
                message: "Phone number must start with 6-9 and have 10 digits",
            },
            Rule {
                field: "pincode",
                pattern: Pattern::anchored("[0-9]{6}")?,
                message: "Pin code must be a 6-digit number",
            },
            Rule {
                field: "password",
                pattern: Pattern::Predicate(is_strong_password),
                message: "Password must be atleast 10 characters with an uppercase, lowercase, number, and special character (@,$,!,%,?,&).",
            },
        ];
        Ok(Self { rules })
    }

    /// Find the rule registered for a field identifier.
    pub fn lookup(&self, field: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.field == field)
    }

    /// Resolve a rule by element id first, then by element name.
    pub fn for_element(&self, id: Option<&str>, name: Option<&str>) -> Option<&Rule> {
        id.and_then(|id| self.lookup(id))
            .or_else(|| name.and_then(|name| self.lookup(name)))
    }
}

/// At least 10 characters drawn only from ASCII letters, digits, and
/// [`PASSWORD_SYMBOLS`], with one of each class present.
fn is_strong_password(value: &str) -> bool {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(&c));
    allowed
        && value.chars().count() >= 10
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| PASSWORD_SYMBOLS.contains(&c))
}

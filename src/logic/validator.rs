// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Per-field validation against the rule table.

use tracing::debug;

use crate::logic::display::{clear_error, show_error};
use crate::models::document::{Document, NodeId};
use crate::models::rules::RuleTable;

/// Generic message for a required field without a dedicated rule.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Validate one field and update its annotation.
///
/// - Empty optional fields pass without touching the display.
/// - A field with a rule must match it end-to-end.
/// - A required field without a rule only has to be non-empty.
///
/// # Examples
///
/// ```ignore
/// let ok = validate_field(&mut doc, &rules, refs.email);
/// assert_eq!(ok, error_text(&doc, refs.email).is_none());
/// ```
pub fn validate_field(doc: &mut Document, rules: &RuleTable, field: NodeId) -> bool {
    let node = doc.node(field);
    let value = node.value.clone();
    let required = node.required;

    if value.is_empty() && !required {
        return true;
    }

    let rule = rules.for_element(node.id.as_deref(), node.name.as_deref());
    if let Some(rule) = rule {
        let ok = rule.accepts(&value);
        debug!(field = rule.field, ok, "rule checked");
        if ok {
            clear_error(doc, field);
        } else {
            show_error(doc, field, rule.message);
        }
        return ok;
    }

    if required && value.is_empty() {
        debug!(field = ?doc.node(field).id, "required value missing");
        show_error(doc, field, REQUIRED_MESSAGE);
        return false;
    }

    clear_error(doc, field);
    true
}

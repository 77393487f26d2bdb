// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Submission gate: run every check, surface every error, then decide.

use tracing::{debug, info};

use crate::logic::display::{clear_group_error, first_error, show_error, show_group_error};
use crate::logic::validator::validate_field;
use crate::models::document::{Document, Node, NodeId};
use crate::models::registration::FIELD_CLASS;
use crate::models::rules::RuleTable;

pub const GENDER_GROUP: &str = "gender";
pub const HOBBIES_GROUP: &str = "hobbies";

pub const SELECT_OPTION_MESSAGE: &str = "Please select an option";
pub const SELECT_HOBBY_MESSAGE: &str = "Please select at least one hobby";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";
pub const FILE_MISSING_MESSAGE: &str = "Please select a file";

/// Notice shown when the gate blocks submission.
pub const BLOCKED_NOTICE: &str = "Please fix the errors before submitting.";

/// Nodes the gate checks besides the generic required controls.
#[derive(Clone, Copy, Debug)]
pub struct GateFields {
    pub password: NodeId,
    pub confirm: NodeId,
    pub file: NodeId,
}

/// Result of one submission attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateReport {
    pub valid: bool,
    /// Number of individual checks that failed.
    pub failures: usize,
    /// First invalid control or annotation, in document order.
    pub first_error: Option<NodeId>,
}

/// Required controls validated one by one (choice inputs are checked per group).
pub fn required_controls(doc: &Document) -> Vec<NodeId> {
    doc.query_all(|n: &Node| n.is_control() && n.required && !n.is_choice())
}

/// At least one member of the named choice group must be checked.
///
/// The annotation lives inside the group's `.inputfield` wrapper. A group with
/// no members on the page passes.
pub fn validate_choice_group(doc: &mut Document, name: &str, message: &str) -> bool {
    let members = doc.by_name(name);
    let Some(first) = members.first().copied() else {
        return true;
    };
    let container = doc.closest(first, FIELD_CLASS).unwrap_or(first);
    let any_checked = members.iter().any(|m| doc.node(*m).checked);

    if any_checked {
        clear_group_error(doc, container);
    } else {
        show_group_error(doc, container, message);
    }
    any_checked
}

/// Evaluate the whole form. Every check runs even after a failure.
pub fn evaluate(doc: &mut Document, rules: &RuleTable, fields: GateFields) -> GateReport {
    let mut failures = 0;

    for control in required_controls(doc) {
        if !validate_field(doc, rules, control) {
            failures += 1;
        }
    }

    if !validate_choice_group(doc, GENDER_GROUP, SELECT_OPTION_MESSAGE) {
        failures += 1;
    }

    if doc.value(fields.password) != doc.value(fields.confirm) {
        show_error(doc, fields.confirm, PASSWORD_MISMATCH_MESSAGE);
        failures += 1;
    }

    let file = doc.node(fields.file);
    if file.required && file.files.is_empty() {
        show_error(doc, fields.file, FILE_MISSING_MESSAGE);
        failures += 1;
    }

    if !doc.by_name(HOBBIES_GROUP).is_empty()
        && !validate_choice_group(doc, HOBBIES_GROUP, SELECT_HOBBY_MESSAGE)
    {
        failures += 1;
    }

    let valid = failures == 0;
    let first_error = if valid { None } else { first_error(doc) };
    debug!(failures, ?first_error, "gate evaluated");
    info!(valid, "submission attempt");

    GateReport {
        valid,
        failures,
        first_error,
    }
}

// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Password strength meter, confirmation indicator, and visibility toggle.

use crate::logic::display::{INVALID_CLASS, clear_error};
use crate::models::document::{Document, InputType, NodeId, Tag};
use crate::models::rules::PASSWORD_SYMBOLS;

/// Background of a bar that is not lit.
pub const EMPTY_BAR_COLOR: &str = "#eee";

pub const MATCH_TEXT: &str = "✅ Passwords match";
pub const MISMATCH_TEXT: &str = "❌ Passwords do not match";

/// Color token attribute on the message node (`success` / `error`).
pub const COLOR_ATTR: &str = "color";
pub const BAR_COLOR_ATTR: &str = "background-color";

/// Nodes involved in the confirmation check.
#[derive(Clone, Copy, Debug)]
pub struct PasswordFields {
    pub password: NodeId,
    pub confirm: NodeId,
    pub message: NodeId,
}

/// Number of satisfied criteria, 0..=5.
pub fn strength_score(password: &str) -> usize {
    [
        password.chars().count() >= 10,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| PASSWORD_SYMBOLS.contains(&c)),
    ]
    .into_iter()
    .filter(|hit| *hit)
    .count()
}

/// Bar color for a given score.
pub fn strength_color(score: usize) -> &'static str {
    match score {
        1 => "#f44336",
        2 => "#ff5722",
        3 => "#ff9800",
        4 => "#ffc107",
        5 => "#4caf50",
        _ => EMPTY_BAR_COLOR,
    }
}

/// Light the first `score` bars with the score color and grey out the rest.
pub fn update_strength_meter(doc: &mut Document, bars: &[NodeId], password: &str) {
    let score = strength_score(password);
    for (index, bar) in bars.iter().enumerate() {
        let color = if index < score {
            strength_color(score)
        } else {
            EMPTY_BAR_COLOR
        };
        doc.node_mut(*bar).set_attr(BAR_COLOR_ATTR, color);
    }
}

pub fn reset_strength_meter(doc: &mut Document, bars: &[NodeId]) {
    for bar in bars {
        doc.node_mut(*bar).set_attr(BAR_COLOR_ATTR, EMPTY_BAR_COLOR);
    }
}

/// Refresh the confirmation message after either password field changed.
///
/// An empty confirmation is neutral; it neither matches nor mismatches.
pub fn check_password_match(doc: &mut Document, fields: PasswordFields) {
    let password = doc.value(fields.password).to_string();
    let confirm = doc.value(fields.confirm).to_string();

    if confirm.is_empty() {
        doc.set_text(fields.message, "");
        doc.node_mut(fields.message).remove_attr(COLOR_ATTR);
        doc.node_mut(fields.confirm).remove_class(INVALID_CLASS);
        return;
    }

    if password == confirm {
        doc.set_text(fields.message, MATCH_TEXT);
        doc.node_mut(fields.message).set_attr(COLOR_ATTR, "success");
        doc.node_mut(fields.confirm).remove_class(INVALID_CLASS);
        clear_error(doc, fields.confirm);
    } else {
        doc.set_text(fields.message, MISMATCH_TEXT);
        doc.node_mut(fields.message).set_attr(COLOR_ATTR, "error");
        doc.node_mut(fields.confirm).add_class(INVALID_CLASS);
    }
}

/// Flip the toggle's target between hidden and plain text input.
///
/// Returns `false` when the toggle has no resolvable password/text target.
pub fn toggle_visibility(doc: &mut Document, toggle: NodeId) -> bool {
    let Some(target) = doc
        .node(toggle)
        .attr("data-target")
        .and_then(|id| doc.by_id(id))
    else {
        return false;
    };

    match doc.node(target).input_type() {
        Some(InputType::Password) => {
            doc.node_mut(target).tag = Tag::Input(InputType::Text);
            doc.node_mut(toggle).replace_class("fa-eye", "fa-eye-slash");
            true
        }
        Some(InputType::Text) => {
            doc.node_mut(target).tag = Tag::Input(InputType::Password);
            doc.node_mut(toggle).replace_class("fa-eye-slash", "fa-eye");
            true
        }
        _ => false,
    }
}

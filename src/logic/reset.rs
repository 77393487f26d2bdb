// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Form reset: wipe feedback, restore defaults, then a late cleanup pass.

use tracing::debug;

use crate::logic::display::{INVALID_CLASS, all_errors, clear_error};
use crate::logic::password::{COLOR_ATTR, reset_strength_meter};
use crate::logic::upload::{UploadFields, clear_upload};
use crate::models::document::{Document, InputType, Node, NodeId, Tag};

/// Class of the icon buttons flipping password visibility.
pub const TOGGLE_CLASS: &str = "toggle-password";

/// Nodes reset explicitly besides the generic controls.
#[derive(Clone, Debug)]
pub struct ResetFields<'a> {
    pub upload: UploadFields,
    pub strength_bars: &'a [NodeId],
    pub password_message: NodeId,
}

/// Immediate part of the reset.
pub fn reset_form(doc: &mut Document, fields: ResetFields<'_>) {
    clear_upload(doc, fields.upload);
    reset_strength_meter(doc, fields.strength_bars);
    doc.set_text(fields.password_message, "");
    doc.node_mut(fields.password_message).remove_attr(COLOR_ATTR);

    let errors = all_errors(doc);
    debug!(count = errors.len(), "removing annotations on reset");
    for error in errors {
        doc.detach(error);
    }
    for node in doc.query_all(|n| n.has_class(INVALID_CLASS)) {
        doc.node_mut(node).remove_class(INVALID_CLASS);
    }

    for terms in doc.query_all(|n| n.input_type() == Some(InputType::Checkbox)) {
        if doc.closest(terms, "terms").is_some() && doc.closest(terms, "check").is_some() {
            doc.node_mut(terms).checked = false;
        }
    }

    restore_defaults(doc);
    hide_passwords(doc);
}

/// Put every control back to its markup value.
fn restore_defaults(doc: &mut Document) {
    for control in doc.query_all(Node::is_control) {
        let node = doc.node_mut(control);
        node.value = node.default_value.clone();
        node.checked = false;
        node.files.clear();
    }
}

/// Revealed password inputs go back to hidden with the closed-eye icon.
fn hide_passwords(doc: &mut Document) {
    for toggle in doc.query_all(|n| n.has_class(TOGGLE_CLASS)) {
        let target = doc
            .node(toggle)
            .attr("data-target")
            .and_then(|id| doc.by_id(id));
        if let Some(target) = target
            && doc.node(target).input_type() == Some(InputType::Text)
        {
            doc.node_mut(target).tag = Tag::Input(InputType::Password);
        }
        doc.node_mut(toggle).replace_class("fa-eye-slash", "fa-eye");
    }
}

/// Late cleanup once the reset settled: clear errors on every control.
pub fn settle_after_reset(doc: &mut Document) {
    for control in doc.query_all(Node::is_control) {
        clear_error(doc, control);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormOptions;
    use crate::logic::display::show_error;
    use crate::logic::password::{
        BAR_COLOR_ATTR, EMPTY_BAR_COLOR, MATCH_TEXT, toggle_visibility, update_strength_meter,
    };
    use crate::logic::upload::on_files_selected;
    use crate::models::attachment::{EMPTY_LABEL, FileMeta};
    use crate::models::registration::{self, FormRefs};

    fn fields(refs: &FormRefs) -> ResetFields<'_> {
        ResetFields {
            upload: UploadFields {
                file: refs.file,
                label: refs.file_label,
                info: refs.file_info,
                remove: refs.remove_file,
            },
            strength_bars: &refs.strength_bars,
            password_message: refs.password_message,
        }
    }

    #[test]
    fn reset_wipes_feedback_and_values() {
        let (mut doc, refs) = registration::build(&FormOptions::default());
        doc.set_value(refs.fname, "Ada");
        doc.set_value(refs.password, "Str0ng!Pass");
        update_strength_meter(&mut doc, &refs.strength_bars, "Str0ng!Pass");
        doc.set_text(refs.password_message, MATCH_TEXT);
        on_files_selected(
            &mut doc,
            fields(&refs).upload,
            vec![FileMeta::new("cv.pdf", 10)],
        );
        show_error(&mut doc, refs.email, "Please enter a valid email address");
        show_error(&mut doc, refs.phone, "Phone number must start with 6-9 and have 10 digits");
        let terms = doc.by_name("terms")[0];
        doc.node_mut(terms).checked = true;
        let gender = doc.by_name("gender")[0];
        doc.node_mut(gender).checked = true;

        reset_form(&mut doc, fields(&refs));

        assert_eq!(doc.value(refs.fname), "");
        assert_eq!(doc.value(refs.password), "");
        assert!(all_errors(&doc).is_empty());
        assert!(doc.query(|n| n.has_class(INVALID_CLASS)).is_none());
        assert!(!doc.node(terms).checked);
        assert!(!doc.node(gender).checked);
        assert_eq!(doc.node(refs.password_message).text, "");
        assert_eq!(doc.node(refs.file_label).text, EMPTY_LABEL);
        assert!(doc.node(refs.file).files.is_empty());
        assert!(
            refs.strength_bars
                .iter()
                .all(|b| doc.node(*b).attr(BAR_COLOR_ATTR) == Some(EMPTY_BAR_COLOR))
        );
    }

    #[test]
    fn reset_hides_revealed_passwords() {
        let (mut doc, refs) = registration::build(&FormOptions::default());
        let toggle = doc.query(|n| n.attr("data-target") == Some("password")).unwrap();
        toggle_visibility(&mut doc, toggle);

        reset_form(&mut doc, fields(&refs));

        assert_eq!(doc.node(refs.password).input_type(), Some(InputType::Password));
        assert!(doc.node(toggle).has_class("fa-eye"));
        assert!(!doc.node(toggle).has_class("fa-eye-slash"));
    }

    #[test]
    fn settle_clears_late_annotations() {
        let (mut doc, refs) = registration::build(&FormOptions::default());
        show_error(&mut doc, refs.pincode, "Pin code must be a 6-digit number");
        show_error(&mut doc, refs.state, "This field is required");

        settle_after_reset(&mut doc);

        assert!(all_errors(&doc).is_empty());
    }
}

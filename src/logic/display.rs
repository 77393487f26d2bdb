// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Error annotations: one `error-message` node per field or field group.

use crate::models::document::{Document, Node, NodeId, Tag};

/// Marker class for a control that failed validation.
pub const INVALID_CLASS: &str = "invalid";

/// Class of an inline error annotation.
pub const ERROR_CLASS: &str = "error-message";

/// Composite widgets whose internals must not receive annotations, in lookup priority.
pub const COMPOSITE_CONTAINERS: [&str; 4] = [
    "password-container",
    "phone-input",
    "file-upload",
    "custom_select",
];

/// Node after which a field's annotation is placed.
pub fn display_anchor(doc: &Document, field: NodeId) -> NodeId {
    COMPOSITE_CONTAINERS
        .iter()
        .find_map(|class| doc.closest(field, class))
        .unwrap_or(field)
}

fn is_error(doc: &Document, node: NodeId) -> bool {
    doc.node(node).has_class(ERROR_CLASS)
}

fn annotation(message: &str) -> Node {
    Node::new(Tag::Div).with_class(ERROR_CLASS).with_text(message)
}

/// Mark the field invalid and place a single annotation after its anchor.
pub fn show_error(doc: &mut Document, field: NodeId, message: &str) {
    clear_error(doc, field);

    doc.node_mut(field).add_class(INVALID_CLASS);
    let anchor = display_anchor(doc, field);
    let taken = doc.next_sibling(anchor).is_some_and(|n| is_error(doc, n));
    if !taken {
        let note = doc.create(annotation(message));
        doc.insert_after(anchor, note);
    }
}

/// Drop the invalid marker and the annotation following the field's anchor.
pub fn clear_error(doc: &mut Document, field: NodeId) {
    doc.node_mut(field).remove_class(INVALID_CLASS);
    let anchor = display_anchor(doc, field);
    if let Some(next) = doc.next_sibling(anchor).filter(|n| is_error(doc, *n)) {
        doc.detach(next);
    }
}

/// Live-typing cleanup: only an annotation directly after the field itself goes.
pub fn clear_adjacent_error(doc: &mut Document, field: NodeId) {
    doc.node_mut(field).remove_class(INVALID_CLASS);
    if let Some(next) = doc.next_sibling(field).filter(|n| is_error(doc, *n)) {
        doc.detach(next);
    }
}

/// Append a group annotation inside `container` unless one is already there.
pub fn show_group_error(doc: &mut Document, container: NodeId, message: &str) {
    let exists = doc
        .query_in(container, |n| n.has_class(ERROR_CLASS))
        .is_some();
    if !exists {
        doc.append(container, annotation(message));
    }
}

/// Remove the first annotation found inside `container`.
pub fn clear_group_error(doc: &mut Document, container: NodeId) {
    if let Some(existing) = doc.query_in(container, |n| n.has_class(ERROR_CLASS)) {
        doc.detach(existing);
    }
}

/// Text of the annotation currently attached to a field, if any.
pub fn error_text(doc: &Document, field: NodeId) -> Option<&str> {
    let anchor = display_anchor(doc, field);
    doc.next_sibling(anchor)
        .filter(|n| is_error(doc, *n))
        .map(|n| doc.node(n).text.as_str())
}

/// First node in document order that is invalid or an annotation.
pub fn first_error(doc: &Document) -> Option<NodeId> {
    doc.query(|n| n.has_class(INVALID_CLASS) || n.has_class(ERROR_CLASS))
}

/// Every annotation currently attached to the page.
pub fn all_errors(doc: &Document) -> Vec<NodeId> {
    doc.query_all(|n| n.has_class(ERROR_CLASS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::InputType;

    fn plain() -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let wrap = doc.append(root, Node::new(Tag::Div).with_class("inputfield"));
        let input = doc.append(wrap, Node::input(InputType::Text).with_id("email"));
        (doc, input)
    }

    fn wrapped(class: &str) -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let wrap = doc.append(root, Node::new(Tag::Div).with_class("inputfield"));
        let container = doc.append(wrap, Node::new(Tag::Div).with_class(class));
        let input = doc.append(container, Node::input(InputType::Password).with_id("pw"));
        doc.append(container, Node::new(Tag::Icon).with_class("toggle-password"));
        (doc, container, input)
    }

    #[test]
    fn show_error_twice_keeps_single_latest_annotation() {
        let (mut doc, input) = plain();

        show_error(&mut doc, input, "first");
        show_error(&mut doc, input, "second");

        assert_eq!(all_errors(&doc).len(), 1);
        assert_eq!(error_text(&doc, input), Some("second"));
        assert!(doc.node(input).has_class(INVALID_CLASS));
    }

    #[test]
    fn clear_error_without_annotation_is_noop() {
        let (mut doc, input) = plain();
        let before = doc.clone();

        clear_error(&mut doc, input);

        assert_eq!(doc, before);
    }

    #[test]
    fn clear_error_removes_marker_and_annotation() {
        let (mut doc, input) = plain();
        show_error(&mut doc, input, "bad");

        clear_error(&mut doc, input);

        assert!(all_errors(&doc).is_empty());
        assert!(!doc.node(input).has_class(INVALID_CLASS));
    }

    #[test]
    fn composite_fields_annotate_after_container() {
        for class in COMPOSITE_CONTAINERS {
            let (mut doc, container, input) = wrapped(class);

            show_error(&mut doc, input, "bad");

            assert_eq!(display_anchor(&doc, input), container);
            let next = doc.next_sibling(container).unwrap();
            assert!(doc.node(next).has_class(ERROR_CLASS), "{class}");
            assert!(
                doc.query_in(container, |n| n.has_class(ERROR_CLASS)).is_none(),
                "{class} internals must stay untouched"
            );
        }
    }

    #[test]
    fn adjacent_clear_leaves_container_annotation() {
        let (mut doc, _, input) = wrapped("password-container");
        show_error(&mut doc, input, "bad");

        clear_adjacent_error(&mut doc, input);

        assert!(!doc.node(input).has_class(INVALID_CLASS));
        assert_eq!(all_errors(&doc).len(), 1);
    }

    #[test]
    fn group_errors_are_not_stacked() {
        let (mut doc, input) = plain();
        let container = doc.parent(input).unwrap();

        show_group_error(&mut doc, container, "Please select an option");
        show_group_error(&mut doc, container, "Please select an option");
        assert_eq!(all_errors(&doc).len(), 1);

        clear_group_error(&mut doc, container);
        assert!(all_errors(&doc).is_empty());
    }

    #[test]
    fn first_error_follows_document_order() {
        let (mut doc, input) = plain();
        let root = doc.root();
        let later = doc.append(root, Node::input(InputType::Text).with_id("later"));
        show_error(&mut doc, later, "later");
        show_error(&mut doc, input, "first");

        assert_eq!(first_error(&doc), Some(input));
    }
}

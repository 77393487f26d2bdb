// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! File upload widget: size ceiling at selection time, label/info text, remove button.

use tracing::warn;

use crate::logic::display::{clear_error, show_error};
use crate::models::attachment::{EMPTY_INFO, EMPTY_LABEL, FileMeta, OVERSIZE_MESSAGE};
use crate::models::document::{Document, NodeId};

/// Nodes making up the upload widget.
#[derive(Clone, Copy, Debug)]
pub struct UploadFields {
    pub file: NodeId,
    pub label: NodeId,
    pub info: NodeId,
    pub remove: NodeId,
}

/// Outcome of a selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Accepted(FileMeta),
    Rejected(FileMeta),
    Empty,
}

/// Apply a new selection to the control; only the first file counts.
pub fn on_files_selected(doc: &mut Document, fields: UploadFields, files: Vec<FileMeta>) -> Selection {
    let Some(file) = files.into_iter().next() else {
        doc.node_mut(fields.file).files.clear();
        doc.set_value(fields.file, "");
        show_empty(doc, fields);
        return Selection::Empty;
    };

    if !file.within_limit() {
        warn!(name = %file.name, size = file.size, "attachment rejected: too large");
        show_error(doc, fields.file, OVERSIZE_MESSAGE);
        doc.node_mut(fields.file).files.clear();
        doc.set_value(fields.file, "");
        show_empty(doc, fields);
        return Selection::Rejected(file);
    }

    doc.set_text(fields.label, file.name.clone());
    doc.set_text(fields.info, file.describe());
    doc.set_value(fields.file, file.name.clone());
    doc.node_mut(fields.file).files = vec![file.clone()];
    clear_error(doc, fields.file);
    doc.node_mut(fields.remove).hidden = false;
    Selection::Accepted(file)
}

/// Detach the current file and clear any upload error.
pub fn remove_file(doc: &mut Document, fields: UploadFields) {
    clear_upload(doc, fields);
    clear_error(doc, fields.file);
}

/// Empty the control and restore the placeholder texts.
pub fn clear_upload(doc: &mut Document, fields: UploadFields) {
    doc.node_mut(fields.file).files.clear();
    doc.set_value(fields.file, "");
    show_empty(doc, fields);
}

fn show_empty(doc: &mut Document, fields: UploadFields) {
    doc.set_text(fields.info, EMPTY_INFO);
    doc.set_text(fields.label, EMPTY_LABEL);
    doc.node_mut(fields.remove).hidden = true;
}

// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Upload widget: picker button, info line, and remove button.

use eframe::egui::{self, Color32, RichText};

use crate::models::attachment::EMPTY_LABEL;
use crate::models::document::{InputType, NodeId, Tag};
use crate::mvu::Msg;
use crate::ui::components::form::{ViewCtx, decorate};

/// Render a `.file-upload` container and return any triggered messages.
pub fn view(ui: &mut egui::Ui, ctx: &ViewCtx<'_>, container: NodeId) -> Vec<Msg> {
    let mut msgs = Vec::new();

    let response = ui
        .horizontal(|ui| {
            for child in ctx.doc.children(container) {
                let n = ctx.doc.node(*child);
                if n.hidden {
                    continue;
                }
                match n.tag {
                    Tag::Label => {
                        let caption = ctx
                            .doc
                            .children(*child)
                            .first()
                            .map(|span| ctx.doc.node(*span).text.as_str())
                            .unwrap_or(EMPTY_LABEL);
                        if ui
                            .button(format!("{} {caption}", egui_phosphor::regular::UPLOAD_SIMPLE))
                            .on_hover_text("Attach a file of at most 2 MB")
                            .clicked()
                        {
                            msgs.push(Msg::RequestPickFile);
                        }
                    }
                    Tag::Span => {
                        ui.label(
                            RichText::new(n.text.as_str())
                                .small()
                                .color(Color32::from_gray(110)),
                        );
                    }
                    Tag::Button => {
                        if ui
                            .button(format!("{} {}", egui_phosphor::regular::TRASH, n.text))
                            .on_hover_text("Remove the selected file")
                            .clicked()
                        {
                            msgs.push(Msg::RemoveFile);
                        }
                    }
                    _ => {}
                }
            }
        })
        .response;

    if let Some(file) = ctx
        .doc
        .query_in(container, |n| n.input_type() == Some(InputType::File))
    {
        decorate(ui, ctx, file, &response, &mut msgs);
    }
    msgs
}

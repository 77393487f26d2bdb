// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Password widgets: input with visibility toggle, strength bars, match message.

use eframe::egui::{self, Color32, RichText};

use crate::logic::password::{BAR_COLOR_ATTR, COLOR_ATTR, EMPTY_BAR_COLOR};
use crate::models::document::{NodeId, Tag};
use crate::mvu::Msg;
use crate::ui::components::form::{ERROR_COLOR, SUCCESS_COLOR, ViewCtx, node, text_input};

/// Render a `.password-container`: the input plus its eye toggle.
pub fn input_view(ui: &mut egui::Ui, ctx: &ViewCtx<'_>, container: NodeId) -> Vec<Msg> {
    let mut msgs = Vec::new();
    ui.horizontal(|ui| {
        for child in ctx.doc.children(container) {
            let n = ctx.doc.node(*child);
            match n.tag {
                Tag::Input(_) => {
                    text_input(ui, ctx, *child, &mut msgs);
                }
                Tag::Icon => {
                    let (icon, hint) = if n.has_class("fa-eye-slash") {
                        (egui_phosphor::regular::EYE_SLASH, "Hide password")
                    } else {
                        (egui_phosphor::regular::EYE, "Show password")
                    };
                    if ui
                        .add(egui::Button::new(icon).frame(false))
                        .on_hover_text(hint)
                        .clicked()
                    {
                        msgs.push(Msg::ToggleVisibility(*child));
                    }
                }
                _ => node(ui, ctx, *child, &mut msgs),
            }
        }
    });
    msgs
}

/// Paint the five strength bars using their stored colors.
pub fn strength_view(ui: &mut egui::Ui, ctx: &ViewCtx<'_>, meter: NodeId) {
    let empty = bar_color(EMPTY_BAR_COLOR);
    ui.horizontal(|ui| {
        for bar in ctx.doc.children(meter) {
            let fill = ctx
                .doc
                .node(*bar)
                .attr(BAR_COLOR_ATTR)
                .map(bar_color)
                .unwrap_or(empty);
            let (rect, _) = ui.allocate_exact_size(egui::vec2(48.0, 6.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, 3.0, fill);
        }
    });
}

fn bar_color(hex: &str) -> Color32 {
    Color32::from_hex(hex).unwrap_or(Color32::LIGHT_GRAY)
}

/// Confirmation line under the second password field.
pub fn message_view(ui: &mut egui::Ui, ctx: &ViewCtx<'_>, id: NodeId) {
    let n = ctx.doc.node(id);
    if n.text.is_empty() {
        return;
    }
    let color = match n.attr(COLOR_ATTR) {
        Some("success") => SUCCESS_COLOR,
        Some("error") => ERROR_COLOR,
        _ => ui.visuals().text_color(),
    };
    ui.label(RichText::new(&n.text).small().color(color));
}

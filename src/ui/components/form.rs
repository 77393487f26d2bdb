// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Generic renderer walking the registration tree node by node.

use eframe::egui::{self, Color32, RichText};

use crate::logic::display::{ERROR_CLASS, INVALID_CLASS};
use crate::models::document::{Document, InputType, Node, NodeId, Tag};
use crate::models::registration::FIELD_CLASS;
use crate::mvu::{CLICKED_CLASS, FormModel, Msg};
use crate::ui::components::{date_input, file_upload, password};

pub const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
pub const SUCCESS_COLOR: Color32 = Color32::from_rgb(40, 167, 69);

pub const FIELD_WIDTH: f32 = 280.0;

/// Containers laid out in a single row.
const ROW_CLASSES: [&str; 4] = ["phone-input", "choices", "custom_select", "buttons"];

/// Read-only inputs shared by every view function.
pub struct ViewCtx<'a> {
    pub doc: &'a Document,
    pub scroll_target: Option<NodeId>,
}

/// Render the whole form and return the triggered messages.
pub fn view(ui: &mut egui::Ui, model: &FormModel) -> Vec<Msg> {
    let mut msgs = Vec::new();
    let ctx = ViewCtx {
        doc: &model.doc,
        scroll_target: model.scroll_target,
    };
    children(ui, &ctx, model.doc.root(), &mut msgs);
    msgs
}

/// Render every child of `parent` in the current layout.
pub fn children(ui: &mut egui::Ui, ctx: &ViewCtx<'_>, parent: NodeId, msgs: &mut Vec<Msg>) {
    for child in ctx.doc.children(parent) {
        node(ui, ctx, *child, msgs);
    }
}

pub fn node(ui: &mut egui::Ui, ctx: &ViewCtx<'_>, id: NodeId, msgs: &mut Vec<Msg>) {
    let n = ctx.doc.node(id);
    if n.hidden {
        return;
    }

    match n.tag {
        Tag::Div if n.has_class(ERROR_CLASS) => error_note(ui, ctx, id, msgs),
        Tag::Div if n.has_class("file-upload") => msgs.extend(file_upload::view(ui, ctx, id)),
        Tag::Div if n.has_class("password-container") => {
            msgs.extend(password::input_view(ui, ctx, id))
        }
        Tag::Div if n.has_class("password-strength") => password::strength_view(ui, ctx, id),
        Tag::Div if n.id.as_deref() == Some("password-message") => {
            password::message_view(ui, ctx, id)
        }
        Tag::Div if n.has_class(FIELD_CLASS) => {
            ui.add_space(4.0);
            ui.vertical(|ui| children(ui, ctx, id, msgs));
        }
        Tag::Div if ROW_CLASSES.iter().any(|c| n.has_class(c)) => {
            ui.horizontal(|ui| children(ui, ctx, id, msgs));
        }
        Tag::Form | Tag::Div => {
            ui.vertical(|ui| children(ui, ctx, id, msgs));
        }
        Tag::Label if ctx.doc.children(id).is_empty() => {
            ui.label(RichText::new(&n.text).strong());
        }
        Tag::Label => {
            ui.horizontal(|ui| children(ui, ctx, id, msgs));
        }
        Tag::Span => {
            ui.label(&n.text);
        }
        Tag::Icon => {}
        Tag::Button => button(ui, n, id, msgs),
        Tag::Select => select(ui, ctx, id, msgs),
        Tag::Input(InputType::Date) => msgs.extend(date_input::view(ui, ctx, id)),
        Tag::Input(InputType::Radio) => {
            if ui.radio(n.checked, n.text.as_str()).clicked() {
                msgs.push(Msg::SetChecked {
                    node: id,
                    checked: true,
                });
            }
        }
        Tag::Input(InputType::Checkbox) => {
            let mut checked = n.checked;
            if ui.checkbox(&mut checked, n.text.as_str()).changed() {
                msgs.push(Msg::SetChecked { node: id, checked });
            }
        }
        // Drawn by the upload widget.
        Tag::Input(InputType::File) => {}
        Tag::Input(_) => {
            text_input(ui, ctx, id, msgs);
        }
    }
}

/// Single-line editor for text-like inputs; edits become `Input`, focus loss `Blur`.
pub fn text_input(
    ui: &mut egui::Ui,
    ctx: &ViewCtx<'_>,
    id: NodeId,
    msgs: &mut Vec<Msg>,
) -> egui::Response {
    let n = ctx.doc.node(id);
    let mut value = n.value.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut value)
            .id_salt(id)
            .desired_width(FIELD_WIDTH)
            .password(n.input_type() == Some(InputType::Password))
            .interactive(!n.readonly)
            .hint_text(hint_for(n)),
    );

    if response.changed() {
        msgs.push(Msg::Input { node: id, value });
    }
    if response.lost_focus() {
        msgs.push(Msg::Blur(id));
    }
    decorate(ui, ctx, id, &response, msgs);
    response
}

fn hint_for(node: &Node) -> &'static str {
    match node.input_type() {
        Some(InputType::Email) => "name@example.com",
        Some(InputType::Tel) => "10-digit mobile number",
        Some(InputType::Number) if node.readonly => "Calculated from date of birth",
        _ => "",
    }
}

/// Red outline for invalid controls and scroll-to for the first error.
pub fn decorate(
    ui: &egui::Ui,
    ctx: &ViewCtx<'_>,
    id: NodeId,
    response: &egui::Response,
    msgs: &mut Vec<Msg>,
) {
    if ctx.doc.node(id).has_class(INVALID_CLASS) {
        ui.painter().rect_stroke(
            response.rect,
            3.0,
            egui::Stroke::new(1.5, ERROR_COLOR),
            egui::StrokeKind::Outside,
        );
    }
    scroll_if_target(ctx, id, response, msgs);
}

fn scroll_if_target(
    ctx: &ViewCtx<'_>,
    id: NodeId,
    response: &egui::Response,
    msgs: &mut Vec<Msg>,
) {
    if ctx.scroll_target == Some(id) {
        response.scroll_to_me(Some(egui::Align::Center));
        msgs.push(Msg::ScrolledToError);
    }
}

fn error_note(ui: &mut egui::Ui, ctx: &ViewCtx<'_>, id: NodeId, msgs: &mut Vec<Msg>) {
    let text = &ctx.doc.node(id).text;
    let response = ui.label(RichText::new(text).small().color(ERROR_COLOR));
    scroll_if_target(ctx, id, &response, msgs);
}

fn button(ui: &mut egui::Ui, n: &Node, id: NodeId, msgs: &mut Vec<Msg>) {
    let icon = match n.attr("type") {
        Some("submit") => egui_phosphor::regular::PAPER_PLANE_TILT,
        Some("reset") => egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE,
        _ => "",
    };
    let button = egui::Button::new(format!("{icon} {}", n.text)).selected(n.has_class(CLICKED_CLASS));
    if ui.add(button).clicked() {
        msgs.push(Msg::ButtonClicked(id));
    }
}

fn select(ui: &mut egui::Ui, ctx: &ViewCtx<'_>, id: NodeId, msgs: &mut Vec<Msg>) {
    let n = ctx.doc.node(id);
    let before = n.value.clone();
    let mut current = before.clone();
    let shown = if current.is_empty() {
        "Select…".to_string()
    } else {
        current.clone()
    };

    let response = egui::ComboBox::from_id_salt(id)
        .selected_text(shown)
        .width(FIELD_WIDTH)
        .show_ui(ui, |ui| {
            for option in &n.options {
                ui.selectable_value(&mut current, option.clone(), option.as_str());
            }
        })
        .response;

    if current != before {
        msgs.push(Msg::Changed {
            node: id,
            value: current,
        });
        msgs.push(Msg::Blur(id));
    }
    decorate(ui, ctx, id, &response, msgs);
}

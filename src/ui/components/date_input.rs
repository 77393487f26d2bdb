// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Date-of-birth input: typed ISO text next to a calendar picker button.

use chrono::{Local, NaiveDate};
use eframe::egui;
use egui_extras::DatePickerButton;

use crate::logic::age::{DATE_FORMAT, dob_window, parse_dob};
use crate::models::document::NodeId;
use crate::mvu::Msg;
use crate::ui::components::form::{FIELD_WIDTH, ViewCtx, decorate};

/// Render the date input and return any triggered messages.
///
/// Typing behaves like any text control; picking a date commits it as a
/// change followed by a blur so range checks run immediately.
pub fn view(ui: &mut egui::Ui, ctx: &ViewCtx<'_>, id: NodeId) -> Vec<Msg> {
    let mut msgs = Vec::new();
    let raw = &ctx.doc.node(id).value;

    ui.horizontal(|ui| {
        let mut text = raw.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut text)
                .id_salt(id)
                .desired_width(FIELD_WIDTH - 40.0)
                .hint_text("YYYY-MM-DD"),
        );
        if response.changed() {
            msgs.push(Msg::Input {
                node: id,
                value: text,
            });
        }
        if response.lost_focus() {
            msgs.push(Msg::Blur(id));
        }
        decorate(ui, ctx, id, &response, &mut msgs);

        let mut date = parse_dob(raw).unwrap_or_else(default_pick);
        if ui
            .add(DatePickerButton::new(&mut date).show_icon(true))
            .on_hover_text("Pick your date of birth")
            .changed()
        {
            msgs.push(Msg::Changed {
                node: id,
                value: date.format(DATE_FORMAT).to_string(),
            });
            msgs.push(Msg::Blur(id));
        }
    });

    msgs
}

/// Calendar opens on the latest acceptable birth date while the field is empty.
fn default_pick() -> NaiveDate {
    dob_window(Local::now().date_naive()).1
}

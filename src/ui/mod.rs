// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell hosting the registration form.
//! Handles layout, the blocking notice, and dispatch of commands to workers.

pub mod components;

use std::collections::VecDeque;
use std::time::Duration;

use eframe::egui;

use crate::mvu::{self, Command, FormModel, Msg};
use crate::ui::components::form;

/// Stateful egui application driving one registration session.
pub struct RegFormApp {
    model: FormModel,
    inbox: VecDeque<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl RegFormApp {
    pub fn new(model: FormModel) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().max(2))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd);
                    let _ = msg_tx.send(msg);
                }
            });
        }

        Self {
            model,
            inbox: VecDeque::new(),
            cmd_tx,
            msg_rx,
        }
    }

    /// Apply queued messages in arrival order, one handler at a time.
    fn process_inbox(&mut self) {
        while let Some(msg) = self.inbox.pop_front() {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
        }
    }
}

impl eframe::App for RegFormApp {
    /// Drives a single UI frame: drains worker replies, applies messages, renders the form.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);

        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push_back(msg);
        }
        self.process_inbox();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading(format!(
                    "{} Registration",
                    egui_phosphor::regular::IDENTIFICATION_CARD
                ));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::widgets::global_theme_preference_switch(ui);
                });
            });
            ui.add_space(4.0);
        });

        self.render_notice_modal(ctx);

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            egui::ScrollArea::vertical().show(ui, |ui| {
                let msgs = form::view(ui, &self.model);
                self.inbox.extend(msgs);
                ui.add_space(8.0);
            });
        });

        if !self.inbox.is_empty() {
            ctx.request_repaint();
        } else if self.model.pending_commands > 0 {
            // Timers and dialogs answer without user input.
            ctx.request_repaint_after(Duration::from_millis(16));
        }
    }
}

impl RegFormApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    /// Centered notice window shown until acknowledged.
    fn render_notice_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.notice.clone() {
            egui::Window::new("Attention")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push_back(Msg::DismissNotice);
                    }
                });
        }
    }

    /// Render latest status message when present.
    fn render_status(&self, ui: &mut egui::Ui) {
        if let Some(text) = &self.model.status {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(text).color(egui::Color32::from_gray(68)));
                if self.model.pending_commands > 0 {
                    ui.add(egui::Spinner::new().size(14.0)).on_hover_text(format!(
                        "{} task(s) running in background",
                        self.model.pending_commands
                    ));
                }
            });
        }
    }
}

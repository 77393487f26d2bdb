// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring egui/eframe to launch the registration UI.

use anyhow::{Result, anyhow};
use eframe::egui;
use egui_phosphor::Variant;
use tracing::info;

use crate::config::AppConfig;
use crate::mvu::FormModel;
use crate::ui::RegFormApp;

/// Build the form session and run the main egui event loop.
pub fn run(config: AppConfig) -> Result<()> {
    let model = FormModel::new(&config.form)?;

    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([480.0, 400.0]),
        ..Default::default()
    };

    info!(
        width = config.window.width,
        height = config.window.height,
        "starting registration form"
    );
    eframe::run_native(
        "Registration",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(RegFormApp::new(model)))
        }),
    )
    .map_err(|err| anyhow!("Failed to run the UI: {err}"))
}

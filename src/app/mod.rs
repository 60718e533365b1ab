// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring egui/eframe to launch the entry form.

use std::sync::Arc;

use eframe::egui;
use egui_phosphor::Variant;

use crate::logic::api::{ApiClient, ApiConfig};
use crate::ui::StudentFormApp;

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run() -> eframe::Result<()> {
    let config = ApiConfig::from_env();
    log::info!("student records backend: {}", config.base_url);
    let api = Arc::new(ApiClient::new(config));

    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 640.0])
            .with_min_inner_size([400.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Student Records",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(StudentFormApp::new(api, None)))
        }),
    )
}

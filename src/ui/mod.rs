// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for the student entry form.
//! Handles layout, form controls, and wiring to the submission workers.

pub mod components;

use std::sync::Arc;

use chrono::{Datelike, Local};
use eframe::egui;
use egui_extras::DatePickerButton;

use crate::logic::api::ApiClient;
use crate::models::student::{Field, FieldValue, MIN_ENROLLMENT_YEAR};
use crate::mvu::{self, AppModel, Command, FormEvent, Msg};
use crate::ui::components::toggle_switch;

/// Invoked once per successfully created record, e.g. so an external roster
/// view can re-fetch its list.
pub type CreatedCallback = Box<dyn Fn() + Send>;

/// Which screen the shell is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Screen {
    #[default]
    EntryForm,
    Saved,
}

/// Stateful egui application hosting the entry form and its collaborators.
pub struct StudentFormApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
    screen: Screen,
    on_created: Option<CreatedCallback>,
}

impl StudentFormApp {
    /// Wire the form to its collaborators: the API client the workers submit
    /// through and an optional callback fired after each created record.
    pub fn new(api: Arc<ApiClient>, on_created: Option<CreatedCallback>) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().max(2))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let api = Arc::clone(&api);
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd, &api);
                    let _ = msg_tx.send(msg);
                }
            });
        }

        Self {
            model: AppModel::default(),
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
            screen: Screen::EntryForm,
            on_created,
        }
    }
}

impl eframe::App for StudentFormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);

        // Pull messages produced by the submission workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        // Process pending messages until exhausted.
        let mut msgs = std::mem::take(&mut self.inbox);
        while let Some(msg) = msgs.pop() {
            let mut commands = Vec::new();
            let event = mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
            if let Some(event) = event {
                self.handle_event(event);
            }
        }
        self.inbox = msgs;

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Add Student");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(2.0);
                    egui::widgets::global_theme_preference_switch(ui);
                });
            });
            ui.add_space(4.0);
        });

        self.render_alert_modal(ctx);

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            egui::ScrollArea::vertical().show(ui, |ui| match self.screen {
                Screen::EntryForm => self.render_form(ui),
                Screen::Saved => self.render_saved(ui),
            });
        });
    }
}

impl StudentFormApp {
    /// React to an outcome emitted by the update function: fire the
    /// created-callback once, then switch to the post-submit screen.
    fn handle_event(&mut self, event: FormEvent) {
        match event {
            FormEvent::Created => {
                if let Some(callback) = &self.on_created {
                    callback();
                }
                self.screen = Screen::Saved;
            }
        }
    }

    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    /// Render all form controls followed by the submit button.
    fn render_form(&mut self, ui: &mut egui::Ui) {
        let draft = self.model.draft.clone();

        self.render_text_field(ui, "Student ID", "e.g., S12345", Field::StudentId, draft.student_id);
        self.render_text_field(ui, "First Name", "First name", Field::FirstName, draft.first_name);
        self.render_text_field(ui, "Last Name", "Last name", Field::LastName, draft.last_name);
        self.render_text_field(ui, "Email", "name@example.com", Field::Email, draft.email);
        self.render_dob_field(ui);
        self.render_text_field(ui, "Department", "Department", Field::Department, draft.department);
        self.render_year_field(ui, draft.enrollment_year);
        self.render_active_field(ui, draft.is_active);

        ui.add_space(12.0);
        self.render_submit_button(ui);
        ui.add_space(8.0);
    }

    /// Single-line text input with inline error display.
    fn render_text_field(
        &mut self,
        ui: &mut egui::Ui,
        label: &str,
        hint: &str,
        field: Field,
        mut value: String,
    ) {
        ui.label(label);
        if ui
            .add(egui::TextEdit::singleline(&mut value).hint_text(hint))
            .changed()
        {
            self.inbox.push(Msg::FieldEdited {
                field,
                value: FieldValue::Text(value),
            });
        }
        self.render_field_error(ui, field);
        ui.add_space(6.0);
    }

    /// Calendar picker for the date of birth. The draft keeps `None` until the
    /// user actually picks a date, so the required check can still fire.
    fn render_dob_field(&mut self, ui: &mut egui::Ui) {
        ui.label("Date of Birth");
        ui.horizontal(|ui| {
            let mut date = self
                .model
                .draft
                .dob
                .unwrap_or_else(|| Local::now().date_naive());
            if ui
                .add(DatePickerButton::new(&mut date).show_icon(true))
                .changed()
            {
                self.inbox.push(Msg::FieldEdited {
                    field: Field::Dob,
                    value: FieldValue::Date(date),
                });
            }
            if self.model.draft.dob.is_none() {
                ui.label(
                    egui::RichText::new("No date selected yet.")
                        .small()
                        .color(egui::Color32::from_gray(110)),
                );
            }
        });
        self.render_field_error(ui, Field::Dob);
        ui.add_space(6.0);
    }

    fn render_year_field(&mut self, ui: &mut egui::Ui, mut value: String) {
        ui.label("Enrollment Year");
        ui.horizontal(|ui| {
            if ui
                .add(
                    egui::TextEdit::singleline(&mut value)
                        .desired_width(80.0)
                        .hint_text("Year"),
                )
                .changed()
            {
                self.inbox.push(Msg::FieldEdited {
                    field: Field::EnrollmentYear,
                    value: FieldValue::Text(value),
                });
            }
            ui.label(
                egui::RichText::new(format!(
                    "{MIN_ENROLLMENT_YEAR}\u{2013}{}",
                    Local::now().date_naive().year()
                ))
                .small()
                .color(egui::Color32::from_gray(110)),
            );
        });
        self.render_field_error(ui, Field::EnrollmentYear);
        ui.add_space(6.0);
    }

    fn render_active_field(&mut self, ui: &mut egui::Ui, mut active: bool) {
        ui.horizontal(|ui| {
            if toggle_switch(ui, &mut active).changed() {
                self.inbox.push(Msg::FieldEdited {
                    field: Field::IsActive,
                    value: FieldValue::Flag(active),
                });
            }
            ui.label("Active");
        });
    }

    /// Render the submit button. Disabled while a create call is in flight so
    /// a rapid double-click cannot issue two concurrent requests.
    fn render_submit_button(&mut self, ui: &mut egui::Ui) {
        let idle = self.model.pending_commands == 0;
        let button = egui::Button::new(format!(
            "{} Add Student",
            egui_phosphor::regular::USER_PLUS
        ));

        if ui
            .add_enabled(idle, button)
            .on_disabled_hover_text("Submitting\u{2026}")
            .clicked()
        {
            self.inbox.push(Msg::SubmitRequested);
        }
    }

    /// Inline error label below the offending control.
    fn render_field_error(&self, ui: &mut egui::Ui, field: Field) {
        if let Some(message) = self.model.errors.get(&field) {
            ui.label(
                egui::RichText::new(message)
                    .small()
                    .color(ui.visuals().error_fg_color),
            );
        }
    }

    /// Post-submit screen shown after the backend accepted the record.
    fn render_saved(&mut self, ui: &mut egui::Ui) {
        ui.heading("Students");
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new("The record was saved to the backend.")
                .color(egui::Color32::from_gray(110)),
        );
        ui.add_space(12.0);
        if ui
            .button(format!(
                "{} Add another student",
                egui_phosphor::regular::PLUS
            ))
            .clicked()
        {
            // Start over with a fresh draft; the old one is gone by design.
            self.model = AppModel::default();
            self.screen = Screen::EntryForm;
        }
    }

    /// Blocking modal for submission failures.
    fn render_alert_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.alert.clone() {
            egui::Window::new("Submission failed")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissAlert);
                    }
                });
        }
    }

    /// Render latest status message and the pending-work spinner.
    fn render_status(&self, ui: &mut egui::Ui) {
        if let Some(text) = &self.model.status {
            let display = if self.model.pending_commands > 0 {
                format!("{}  ({} working\u{2026})", text, self.model.pending_commands)
            } else {
                text.to_string()
            };
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(display).color(egui::Color32::from_gray(68)));
                if self.model.pending_commands > 0 {
                    ui.add(egui::Spinner::new().size(14.0))
                        .on_hover_text("Submitting to the backend");
                }
            });
        } else if self.model.pending_commands > 0 {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new().size(14.0))
                    .on_hover_text("Submitting to the backend");
            });
        }
    }
}

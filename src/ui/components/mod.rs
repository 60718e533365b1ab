// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Reusable egui widgets shared by the form shell.

pub mod toggle;

pub use toggle::toggle_switch;

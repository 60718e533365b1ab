// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! HTTP client for the student records backend.
//!
//! Responsibilities:
//! - Resolve the backend base URL from the environment.
//! - Issue the single create-record POST and classify the outcome.
//! - Turn backend rejections into user-facing messages.

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::models::student::NewStudent;

/// Shown when the backend gives no usable error body.
const GENERIC_SUBMIT_ERROR: &str = "Failed to add student";

/// Resolved backend settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
}

impl ApiConfig {
    /// Environment variable overriding the backend base URL.
    pub const BASE_URL_VAR: &'static str = "STUDENT_API_URL";

    const DEFAULT_BASE_URL: &'static str = "http://localhost:5000";

    /// Read the config from the environment, falling back to the local default.
    pub fn from_env() -> Self {
        let base_url = std::env::var(Self::BASE_URL_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Build a config for an explicit base URL. Tests point this at a mock server.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }
}

/// Error body shape the backend uses for rejections.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Blocking client issuing create-record calls. Lives on the worker threads,
/// never on the UI thread.
pub struct ApiClient {
    config: ApiConfig,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// POST one student to the create-record endpoint.
    ///
    /// Any 2xx status counts as success; the response body is ignored beyond
    /// that. On a non-2xx response the backend's `error` field becomes the
    /// error message when present, otherwise the generic fallback. Transport
    /// failures surface as the generic fallback as well.
    pub fn create_student(&self, student: &NewStudent) -> Result<()> {
        let url = format!("{}/api/students", self.config.base_url);
        let response = self
            .http
            .post(&url)
            .json(student)
            .send()
            .context(GENERIC_SUBMIT_ERROR)?;

        let status = response.status();
        if status.is_success() {
            log::info!("student {} created", student.student_id);
            return Ok(());
        }

        let message = response
            .json::<ErrorBody>()
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| GENERIC_SUBMIT_ERROR.to_string());
        log::error!("create student rejected with {status}: {message}");
        bail!(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_student() -> NewStudent {
        NewStudent {
            student_id: "S123".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            dob: "2001-06-15".into(),
            department: "Mathematics".into(),
            enrollment_year: 2020,
            is_active: true,
        }
    }

    #[test]
    fn config_strips_trailing_slashes() {
        let config = ApiConfig::new("http://localhost:5000/");
        assert_eq!(config.base_url, "http://localhost:5000");
    }

    #[test]
    fn success_status_is_ok() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/students")
            .with_status(201)
            .with_body("{}")
            .create();

        let api = ApiClient::new(ApiConfig::new(server.url()));
        assert!(api.create_student(&sample_student()).is_ok());
        mock.assert();
    }

    #[test]
    fn server_error_message_is_surfaced() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/api/students")
            .with_status(400)
            .with_body(r#"{"error":"Duplicate ID"}"#)
            .create();

        let api = ApiClient::new(ApiConfig::new(server.url()));
        let err = api.create_student(&sample_student()).unwrap_err();
        assert_eq!(err.to_string(), "Duplicate ID");
    }

    #[test]
    fn rejection_without_body_falls_back_to_generic_message() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/api/students")
            .with_status(500)
            .create();

        let api = ApiClient::new(ApiConfig::new(server.url()));
        let err = api.create_student(&sample_student()).unwrap_err();
        assert_eq!(err.to_string(), "Failed to add student");
    }
}

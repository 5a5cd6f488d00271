// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

/// Status and body of a backend answer.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendResponse {
    pub status: u16,
    pub body: Value,
}

impl BackendResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The error description carried by a failed answer.
    pub fn message(&self) -> String {
        match &self.body {
            Value::String(message) => message.clone(),
            Value::Object(map) => map
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| self.body.to_string()),
            Value::Null => format!("no response body (status {})", self.status),
            other => other.to_string(),
        }
    }
}

/// Metadata queries against the remote geoprocessing backend.
///
/// Calls block the translation until answered. Timeouts and retries are the
/// implementation's business.
pub trait BackendClient: Send + Sync {
    fn get_dataset_info(&self, collection: &str, namespace: &str, name: &str) -> BackendResponse;
}

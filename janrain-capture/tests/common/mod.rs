//! Shared helpers for client tests.

#![allow(dead_code)]

use janrain_capture::{Janrain, JanrainConfig};
use std::io;
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;
use wiremock::{MockServer, Request};

pub const FULL_CLIENT_ID: &str = "owner_client";
pub const FULL_CLIENT_SECRET: &str = "owner_secret";
pub const LOGIN_CLIENT_ID: &str = "login_client";
pub const LOGIN_CLIENT_SECRET: &str = "login_secret";
pub const APP_ID: &str = "app123";

/// Points every service at the mock server.
pub fn mock_config(server: &MockServer) -> JanrainConfig {
    JanrainConfig {
        capture_server_url: server.uri(),
        configuration_server_url: server.uri(),
        cdn_url: format!("{}/widget_data/flow.js", server.uri()),
        full_client_id: FULL_CLIENT_ID.to_string(),
        full_client_secret: FULL_CLIENT_SECRET.to_string(),
        login_client_id: LOGIN_CLIENT_ID.to_string(),
        login_client_secret: LOGIN_CLIENT_SECRET.to_string(),
        app_id: APP_ID.to_string(),
        ..Default::default()
    }
}

pub fn mock_client(server: &MockServer) -> Janrain {
    Janrain::new(mock_config(server)).unwrap()
}

/// Wraps a flow document the way the CDN serves it.
pub fn flow_asset(status: &str, document: &str) -> String {
    format!(
        "janrain.capture.ui.handleCaptureResponse({status},function () {{ janrain.capture.ui.render({document}); }});\n"
    )
}

/// Decoded form body of a recorded request.
pub fn form_body(request: &Request) -> Vec<(String, String)> {
    url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect()
}

pub fn form_value(request: &Request, key: &str) -> Option<String> {
    form_body(request)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

pub fn has_authorization(request: &Request) -> bool {
    request.headers.get("authorization").is_some()
}

pub async fn only_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

// ── Log capture ─────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Routes events on the current thread into a buffer until the guard drops.
pub fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

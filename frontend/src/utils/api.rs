use gloo_net::http::{Request, Response};
use gloo_net::Error as GlooError;
use serde::Serialize;
use web_sys::RequestCredentials;

use crate::config;

/// Entry point for calls to the backend; prefixes the configured backend URL.
pub struct Api;

/// Thin wrapper so every request is built the same way.
pub struct RequestWrapper {
    request: Request,
    path: String,
}

impl RequestWrapper {
    fn new(path: &str, request: Request) -> Self {
        Self {
            request: request.credentials(RequestCredentials::SameOrigin),
            path: path.to_string(),
        }
    }

    /// Set the request body as JSON
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self, serde_json::Error> {
        let body_string = serde_json::to_string(data)?;
        self.request = self.request.header("Content-Type", "application/json");
        self.request = self.request.body(body_string);
        Ok(self)
    }

    /// Sends the request once. There is no retry.
    pub async fn send(self) -> Result<Response, GlooError> {
        let response = self.request.send().await;
        if let Err(e) = &response {
            log::warn!("Request to {} failed: {}", self.path, e);
        }
        response
    }
}

impl Api {
    pub fn post(path: &str) -> RequestWrapper {
        let full_url = format!("{}{}", config::get_backend_url(), path);
        RequestWrapper::new(path, Request::post(&full_url))
    }
}

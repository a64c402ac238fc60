//! HTTP client for communicating with the onboarding backend
//!
//! One endpoint serves both operations: `GET` returns the form definition
//! and `POST` stores the answers.

use super::{ApiError, OnboardingApi};
use crate::state::{FormSchema, SubmissionPayload};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;

/// Error body sent by the backend on failure
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Client for the onboarding endpoint
#[derive(Debug, Clone)]
pub struct OnboardingClient {
    http: reqwest::Client,
    endpoint: String,
}

impl OnboardingClient {
    /// Create a new client for `base_url` + `path`
    pub fn new(base_url: &str, path: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let endpoint = if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };

        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Full URL of the onboarding endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl OnboardingApi for OnboardingClient {
    async fn fetch_form(&self) -> Result<FormSchema, ApiError> {
        let response = self.http.get(&self.endpoint).send().await?;

        match response.status() {
            StatusCode::FORBIDDEN => Err(ApiError::AlreadyOnboarded),
            status if status.is_success() => Ok(response.json::<FormSchema>().await?),
            _ => Err(status_error(response).await),
        }
    }

    async fn submit(&self, payload: SubmissionPayload) -> Result<(), ApiError> {
        let response = self.http.post(&self.endpoint).json(&payload).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(status_error(response).await)
        }
    }
}

/// Build a status error, picking up the `error` text from the body when present
async fn status_error(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.json::<ErrorBody>().await.unwrap_or_default();
    ApiError::Status {
        status,
        message: body.error,
    }
}

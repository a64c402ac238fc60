//! Trait abstraction for the onboarding client to enable mocking in tests

use super::ApiError;
use crate::state::{FormSchema, SubmissionPayload};
use async_trait::async_trait;

/// Onboarding backend operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OnboardingApi: Send + Sync {
    /// Fetch the step/field definition of the wizard
    async fn fetch_form(&self) -> Result<FormSchema, ApiError>;

    /// Submit the collected answers
    async fn submit(&self, payload: SubmissionPayload) -> Result<(), ApiError>;
}

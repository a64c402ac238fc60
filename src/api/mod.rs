//! HTTP client module for the onboarding API

mod client;
mod error;
mod traits;

pub use client::OnboardingClient;
pub use error::ApiError;
pub use traits::OnboardingApi;

#[cfg(test)]
pub use traits::MockOnboardingApi;

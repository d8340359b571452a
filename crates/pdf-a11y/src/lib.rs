//! PDF accessibility auditing against WCAG and PDF/UA.
//!
//! [`audit`] holds the scoring and recommendation engine together with the orchestration
//! around it; [`config`], [`telemetry`] and [`error`] carry the service plumbing shared with
//! the `pdf-a11y-api` binary.

pub mod audit;
pub mod config;
pub mod error;
pub mod telemetry;

pub use error::AppError;

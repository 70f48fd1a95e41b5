//! Shared utilities

pub mod config;
pub mod diagnostic;

pub use config::BuildConfig;
pub use diagnostic::Diagnostic;

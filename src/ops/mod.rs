//! High-level operations.
//!
//! This module contains the implementation of sifbuilder commands.

pub mod generate;
pub mod resolve;

pub use generate::{generate, render_definition, GenerateOptions, GenerateResult};
pub use resolve::{load_index, resolve_config, resolve_requests, LoadedIndex};

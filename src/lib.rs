//! sifbuilder - resolve NMRbox software into Debian package sets
//!
//! This crate provides the core library functionality for sifbuilder:
//! parsing the NMRbox package index, grouping packages into software
//! releases, resolving software requests and rendering container definitions.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod sources;
pub mod util;

pub use crate::core::{package::Package, software::Software};

pub use resolver::{Index, Request, Resolution, ResolveError};

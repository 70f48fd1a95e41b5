//! Core data structures for sifbuilder.
//!
//! - `Package`: one Debian package tagged with NMRbox software metadata
//! - `Software`: one software release grouping those packages

pub mod package;
pub mod software;

pub use package::{Package, StanzaFields};
pub use software::Software;

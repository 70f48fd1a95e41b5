//! Software resolution.
//!
//! Packages parsed from the index are grouped into an [`Index`] of software
//! releases, which then answers family/version requests. The resolver is
//! pure - all I/O happens before the index is built.

pub mod errors;
pub mod index;
pub mod resolve;
pub mod version;

pub use errors::ResolveError;
pub use index::{Index, RESERVED_FAMILY};
pub use resolve::{Request, Resolution, ResolutionSummary};

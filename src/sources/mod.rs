//! Package sources.
//!
//! sifbuilder reads the apt package list published by the NMRbox repository,
//! and optionally the local dpkg status file to see what is installed.

pub mod dpkg_status;
pub mod lines;
pub mod package_list;

pub use dpkg_status::{installed_families, installed_families_file, DEFAULT_STATUS_PATH};
pub use package_list::{parse, parse_file, parse_str, PackageList, ParseStats, DEFAULT_INDEX_PATH};

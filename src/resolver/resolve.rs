//! Resolution of software requests against an [`Index`].

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::core::Software;
use crate::resolver::errors::ResolveError;
use crate::resolver::index::Index;
use crate::resolver::version::{self, DebianVersion};

/// A request for one software family, optionally pinned to a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Software family, case-insensitive
    pub family: String,

    /// Software version; `None` means the latest release
    pub version: Option<String>,
}

impl Request {
    /// Request the latest release of a family.
    pub fn latest(family: impl Into<String>) -> Self {
        Request {
            family: family.into(),
            version: None,
        }
    }

    /// Request a specific release.
    pub fn exact(family: impl Into<String>, version: impl Into<String>) -> Self {
        Request {
            family: family.into(),
            version: Some(version.into()),
        }
    }
}

impl FromStr for Request {
    type Err = String;

    /// Parse `FAMILY` or `FAMILY=VERSION`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (family, version) = match s.split_once('=') {
            Some((family, version)) => (family.trim(), Some(version.trim())),
            None => (s.trim(), None),
        };

        if family.is_empty() {
            return Err(format!("invalid software request `{}`: empty name", s));
        }

        match version {
            Some("") => Err(format!("invalid software request `{}`: empty version", s)),
            Some(v) => Ok(Request::exact(family, v)),
            None => Ok(Request::latest(family)),
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}={}", self.family, v),
            None => write!(f, "{}", self.family),
        }
    }
}

/// Software selected for a batch of requests, in request order.
#[derive(Debug, Clone, Default)]
pub struct Resolution<'a> {
    software: Vec<&'a Software>,
}

impl<'a> Resolution<'a> {
    pub fn software(&self) -> &[&'a Software] {
        &self.software
    }

    /// `FAMILY VERSION` descriptions of the selected software.
    pub fn descriptions(&self) -> Vec<String> {
        self.software.iter().map(|s| s.to_string()).collect()
    }

    /// Package specifiers of all selected software, in order.
    pub fn package_specs(&self, include_data: bool) -> Vec<String> {
        self.software
            .iter()
            .flat_map(|s| s.package_specs(include_data))
            .collect()
    }

    /// Serializable summary for machine-readable output.
    pub fn summary(&self, include_data: bool) -> ResolutionSummary {
        ResolutionSummary {
            software: self.descriptions(),
            packages: self.package_specs(include_data),
        }
    }
}

/// Serializable view of a [`Resolution`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionSummary {
    pub software: Vec<String>,
    pub packages: Vec<String>,
}

impl Index {
    /// Resolve a single request.
    ///
    /// A pinned version yields exactly one release. An unpinned request
    /// yields every release whose highest package version equals the
    /// family-wide maximum, so several releases may come back.
    pub fn resolve(&self, request: &Request) -> Result<Vec<&Software>, ResolveError> {
        let family = request.family.to_uppercase();
        let releases = self
            .family(&family)
            .ok_or_else(|| ResolveError::UnknownFamily {
                family: family.clone(),
            })?;

        if let Some(wanted) = &request.version {
            let software = releases
                .get(wanted)
                .ok_or_else(|| ResolveError::UnknownVersion {
                    family: family.clone(),
                    version: wanted.clone(),
                    available: self.versions(&family).into_iter().map(String::from).collect(),
                })?;

            tracing::debug!("{} {} resolves to {}", family, wanted, software);
            return Ok(vec![software]);
        }

        let newest = version::max_version(
            releases
                .values()
                .filter_map(Software::max_package_version),
        )
        .map(DebianVersion::new);

        let latest: Vec<&Software> = releases
            .values()
            .filter(|s| s.max_package_version().map(DebianVersion::new) == newest)
            .collect();

        tracing::debug!(
            "{} resolves to {}",
            family,
            latest
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );

        Ok(latest)
    }

    /// Resolve a batch of requests. The first failure aborts the batch.
    pub fn resolve_all<'a, I>(&'a self, requests: I) -> Result<Resolution<'a>, ResolveError>
    where
        I: IntoIterator,
        I::Item: Borrow<Request>,
    {
        let mut software = Vec::new();
        for request in requests {
            software.extend(self.resolve(request.borrow())?);
        }

        Ok(Resolution { software })
    }
}

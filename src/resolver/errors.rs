//! Resolution error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Error while building the index or resolving a software request.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ResolveError {
    #[error("software `{family}` not found")]
    #[diagnostic(
        code(sifbuilder::resolve::unknown_family),
        help("Run `sifbuilder list` to see available software")
    )]
    UnknownFamily { family: String },

    #[error("version {version} of software `{family}` not found")]
    #[diagnostic(code(sifbuilder::resolve::unknown_version))]
    UnknownVersion {
        family: String,
        version: String,
        available: Vec<String>,
    },

    #[error(
        "package `{package}` is listed twice with version {version} ({family} {software_version})"
    )]
    #[diagnostic(
        code(sifbuilder::resolve::duplicate_package_version),
        help("The package index is inconsistent; refresh it with `apt-get update`")
    )]
    DuplicatePackageVersion {
        package: String,
        version: String,
        family: String,
        software_version: String,
    },
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::UnknownFamily { family } => {
                let message = format!("software `{}` not found in the package index", family);
                Diagnostic::error(message)
                    .with_suggestion("Check that the software name is spelled correctly")
                    .with_suggestion("Run `sifbuilder list` to see available software")
            }

            ResolveError::UnknownVersion {
                family,
                version,
                available,
            } => {
                let mut diag = Diagnostic::error(format!(
                    "version {} of software `{}` not found",
                    version, family
                ));

                if !available.is_empty() {
                    let valid = available.join(", ");
                    diag = diag.with_context(format!("valid values are: {}", valid));
                }

                diag.with_suggestion(format!(
                    "Omit the version to use the latest release of `{}`",
                    family
                ))
            }

            ResolveError::DuplicatePackageVersion {
                package,
                version,
                family,
                software_version,
            } => Diagnostic::error(format!(
                "package `{}` appears more than once with version {}",
                package, version
            ))
            .with_context(format!("while grouping {} {}", family, software_version))
            .with_suggestion("Refresh the package index with `apt-get update`")
            .with_suggestion("Report the duplicate to the repository maintainers"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_version_diagnostic_lists_alternatives() {
        let err = ResolveError::UnknownVersion {
            family: "NMRPIPE".to_string(),
            version: "9.9".to_string(),
            available: vec!["10.9".to_string(), "11.2".to_string()],
        };

        let output = err.to_diagnostic().format(false);

        assert!(output.contains("version 9.9 of software `NMRPIPE` not found"));
        assert!(output.contains("valid values are: 10.9, 11.2"));
        assert!(output.contains("1. Omit the version"));
    }

    #[test]
    fn test_unknown_family_diagnostic() {
        let err = ResolveError::UnknownFamily {
            family: "NOSUCH".to_string(),
        };

        let output = err.to_diagnostic().format(false);
        assert!(output.contains("error: software `NOSUCH` not found"));
        assert!(output.contains("sifbuilder list"));
    }

    #[test]
    fn test_error_codes() {
        let err = ResolveError::UnknownFamily {
            family: "X".to_string(),
        };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("sifbuilder::resolve::unknown_family"));
    }
}

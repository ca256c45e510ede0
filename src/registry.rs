//! npm registry URL synthesis
//!
//! Turns `name@version` package identifiers (as found in pnpm lockfile keys)
//! into registry tarball URLs. Scoped identifiers keep the `@scope/` prefix in
//! the URL path but drop it from the archive filename.

use std::fmt;
use thiserror::Error;

const REGISTRY_BASE: &str = "https://registry.npmjs.org";

#[derive(Error, Debug)]
#[error("Invalid package identifier '{spec}'. Expected <name>@<version>")]
pub struct IdentifierError {
    pub spec: String,
}

/// A parsed package identifier: name (scope prefix included) plus version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageId {
    pub name: String,
    pub version: String,
}

impl PackageId {
    /// Parse an identifier like `lodash@4.17.21` or `@scope/name@1.0.0`.
    ///
    /// The version separator is the last `@` outside the scope prefix. Both
    /// the name and the version must be non-empty.
    pub fn parse(spec: &str) -> Result<Self, IdentifierError> {
        let malformed = || IdentifierError {
            spec: spec.to_string(),
        };

        // Scoped identifiers (@scope/name@version): skip past the scope's `@`
        // and `/` before looking for the version separator.
        let version_sep = if spec.starts_with('@') {
            let after_scope = spec.find('/').ok_or_else(malformed)? + 1;
            spec[after_scope..].find('@').ok_or_else(malformed)? + after_scope
        } else {
            spec.find('@').ok_or_else(malformed)?
        };

        let name = &spec[..version_sep];
        let version = &spec[version_sep + 1..];
        if name.is_empty() || version.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
        })
    }

    /// Registry tarball URL for this package release.
    ///
    /// Format: `https://registry.npmjs.org/<name>/-/<bareName>-<version>.tgz`,
    /// where the filename uses the name without its scope.
    pub fn tarball_url(&self) -> String {
        let bare_name = self.name.rsplit('/').next().unwrap_or(&self.name);
        format!(
            "{}/{}/-/{}-{}.tgz",
            REGISTRY_BASE, self.name, bare_name, self.version
        )
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

use crate::pep508::operator::{PinOperator, UnsupportedSpecifier, extract_operator, strip_marker};
use crate::repository::PackageIndex;
use thiserror::Error;
use tracing::{debug, warn};

/// Why a specifier was left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error(transparent)]
    Unsupported(#[from] UnsupportedSpecifier),

    #[error("error retrieving version from the package index")]
    LookupUnavailable,

    #[error("no new version available")]
    UpToDate,

    #[error("index returned an unusable version '{0}'")]
    MalformedVersion(String),
}

/// A specifier that carries exactly one pin operator, split into its parts.
///
/// `name_with_extras` and `old_version` are whitespace-free; `marker` is the
/// original text after the first `;`, untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedSpecifier<'a> {
    name_with_extras: String,
    operator: PinOperator,
    old_version: String,
    marker: Option<&'a str>,
}

impl<'a> PinnedSpecifier<'a> {
    pub fn parse(specifier: &'a str, operator: PinOperator) -> Self {
        let marker = specifier.split_once(';').map(|(_, marker)| marker);
        let compact: String = strip_marker(specifier)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let (name_with_extras, old_version) = compact
            .split_once(operator.as_str())
            .map(|(name, version)| (name.to_string(), version.to_string()))
            .unwrap_or_else(|| (compact.clone(), String::new()));

        Self {
            name_with_extras,
            operator,
            old_version,
            marker,
        }
    }

    /// Package name without extras, as used for index lookups.
    pub fn base_name(&self) -> &str {
        self.name_with_extras
            .split_once('[')
            .map_or(self.name_with_extras.as_str(), |(name, _)| name)
    }

    pub fn operator(&self) -> PinOperator {
        self.operator
    }

    pub fn old_version(&self) -> &str {
        &self.old_version
    }

    /// Reassemble the specifier with `version` pinned in place of the old one.
    pub fn with_version(&self, version: &str) -> String {
        let mut out = format!("{}{}{}", self.name_with_extras, self.operator, version);
        if let Some(marker) = self.marker {
            out.push(';');
            out.push_str(marker);
        }
        out
    }

    /// The original specifier with whitespace stripped from the requirement part.
    pub fn normalized(&self) -> String {
        self.with_version(&self.old_version)
    }
}

/// Rewrite one specifier to pin the latest version known to `index`.
///
/// Every failure is returned as a [`SkipReason`]; the caller keeps the
/// original string in that case.
pub fn update_specifier(specifier: &str, index: &dyn PackageIndex) -> Result<String, SkipReason> {
    let operator = extract_operator(specifier)?;
    let pinned = PinnedSpecifier::parse(specifier, operator);

    let latest = match index.latest_version(pinned.base_name()) {
        Ok(Some(version)) => version,
        Ok(None) => {
            debug!(package = pinned.base_name(), "no version published on the index");
            return Err(SkipReason::LookupUnavailable);
        }
        Err(e) => {
            warn!(package = pinned.base_name(), error = %e, "version lookup failed");
            return Err(SkipReason::LookupUnavailable);
        }
    };

    let latest = latest.trim();
    if latest.is_empty() || latest.contains(|c: char| c == ';' || c.is_whitespace()) {
        return Err(SkipReason::MalformedVersion(latest.to_string()));
    }

    debug!(
        package = pinned.base_name(),
        operator = %pinned.operator(),
        current = pinned.old_version(),
        latest,
        "resolved latest version"
    );

    let updated = pinned.with_version(latest);
    if extract_operator(&updated) != Ok(operator) {
        return Err(SkipReason::MalformedVersion(latest.to_string()));
    }

    if updated == pinned.normalized() {
        return Err(SkipReason::UpToDate);
    }

    Ok(updated)
}

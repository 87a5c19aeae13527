use crate::error::{BumpError, Result};
use pep440_rs::Version;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::LazyLock;
use toml_edit::DocumentMut;
use url::Url;

// PEP 508 project / extra names, compared case-insensitively.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([A-Z0-9]|[A-Z0-9][A-Z0-9._-]*[A-Z0-9])$").unwrap());

// A requirement has to open with a project name followed by extras, a
// version clause, a marker, a direct reference, or nothing.
static REQUIREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*([A-Z0-9]|[A-Z0-9][A-Z0-9._-]*[A-Z0-9])\s*(\[|\(|;|@|[<>=!~]|$)").unwrap()
});

// `module.path` or `module.path:object.attr`, optionally followed by `[extras]`.
static ENTRY_POINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][\w.]*\s*(:\s*[A-Za-z_][\w.]*)?\s*(\[[^\]]*\])?$").unwrap()
});

static ENTRY_POINT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\[\s=]([^=]*[^\s=])?$").unwrap());

/// Keys a `[project]` table may list in `dynamic`.
const DYNAMIC_FIELDS: &[&str] = &[
    "version",
    "description",
    "readme",
    "requires-python",
    "license",
    "license-files",
    "authors",
    "maintainers",
    "keywords",
    "classifiers",
    "urls",
    "scripts",
    "gui-scripts",
    "entry-points",
    "dependencies",
    "optional-dependencies",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct PyprojectSchema {
    project: Option<ProjectTable>,
    build_system: Option<BuildSystemTable>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ProjectTable {
    name: Option<String>,
    version: Option<String>,
    description: Option<String>,
    readme: Option<Readme>,
    requires_python: Option<String>,
    license: Option<License>,
    license_files: Option<Vec<String>>,
    authors: Option<Vec<Contact>>,
    maintainers: Option<Vec<Contact>>,
    keywords: Option<Vec<String>>,
    classifiers: Option<Vec<String>>,
    urls: Option<BTreeMap<String, String>>,
    scripts: Option<BTreeMap<String, String>>,
    gui_scripts: Option<BTreeMap<String, String>>,
    entry_points: Option<BTreeMap<String, BTreeMap<String, String>>>,
    dependencies: Option<Vec<String>>,
    optional_dependencies: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    dynamic: Vec<String>,
}

impl ProjectTable {
    fn is_set(&self, field: &str) -> bool {
        match field {
            "name" => self.name.is_some(),
            "version" => self.version.is_some(),
            "description" => self.description.is_some(),
            "readme" => self.readme.is_some(),
            "requires-python" => self.requires_python.is_some(),
            "license" => self.license.is_some(),
            "license-files" => self.license_files.is_some(),
            "authors" => self.authors.is_some(),
            "maintainers" => self.maintainers.is_some(),
            "keywords" => self.keywords.is_some(),
            "classifiers" => self.classifiers.is_some(),
            "urls" => self.urls.is_some(),
            "scripts" => self.scripts.is_some(),
            "gui-scripts" => self.gui_scripts.is_some(),
            "entry-points" => self.entry_points.is_some(),
            "dependencies" => self.dependencies.is_some(),
            "optional-dependencies" => self.optional_dependencies.is_some(),
            _ => false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Readme {
    Path(String),
    Table(ReadmeTable),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ReadmeTable {
    file: Option<String>,
    text: Option<String>,
    content_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum License {
    Expression(String),
    Table(LicenseTable),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LicenseTable {
    file: Option<String>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Contact {
    name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct BuildSystemTable {
    requires: Option<Vec<String>>,
    build_backend: Option<String>,
}

/// Checks a loaded manifest against the `pyproject.toml` schema
/// (PEP 517/518 `[build-system]`, PEP 621 `[project]`).
pub struct SchemaValidator;

impl SchemaValidator {
    /// Fails with [`BumpError::SchemaInvalid`] on the first violation found.
    pub fn validate(doc: &DocumentMut) -> Result<()> {
        let schema: PyprojectSchema = toml::from_str(&doc.to_string())
            .map_err(|e| BumpError::SchemaInvalid(e.to_string().trim_end().to_string()))?;

        if let Some(build_system) = &schema.build_system {
            Self::validate_build_system(build_system)?;
        }

        if let Some(project) = &schema.project {
            Self::validate_project(project)?;
        }

        Ok(())
    }

    fn validate_build_system(build_system: &BuildSystemTable) -> Result<()> {
        if build_system.requires.is_none() {
            return Err(invalid("build-system.requires is required"));
        }
        if let Some(backend) = &build_system.build_backend {
            if backend.trim().is_empty() {
                return Err(invalid("build-system.build-backend must not be empty"));
            }
        }
        Ok(())
    }

    fn validate_project(project: &ProjectTable) -> Result<()> {
        Self::validate_dynamic(project)?;

        match &project.name {
            None => return Err(invalid("project.name is required")),
            Some(name) if !NAME_RE.is_match(name) => {
                return Err(invalid(format!(
                    "project.name '{name}' is not a valid PEP 508 name"
                )));
            }
            Some(_) => {}
        }

        match &project.version {
            None if !project.dynamic.iter().any(|d| d == "version") => {
                return Err(invalid(
                    "project.version is required unless listed in project.dynamic",
                ));
            }
            Some(version) if Version::from_str(version).is_err() => {
                return Err(invalid(format!(
                    "project.version '{version}' is not a valid PEP 440 version"
                )));
            }
            _ => {}
        }

        if let Some(requires_python) = &project.requires_python {
            if requires_python.trim().is_empty() {
                return Err(invalid("project.requires-python must not be empty"));
            }
        }

        if let Some(readme) = &project.readme {
            Self::validate_readme(readme)?;
        }
        if let Some(license) = &project.license {
            Self::validate_license(license)?;
        }

        for (field, contacts) in [
            ("project.authors", &project.authors),
            ("project.maintainers", &project.maintainers),
        ] {
            Self::validate_contacts(field, contacts.as_deref().unwrap_or_default())?;
        }

        if let Some(urls) = &project.urls {
            for (label, url) in urls {
                if Url::parse(url).is_err() {
                    return Err(invalid(format!(
                        "project.urls.{label}: '{url}' is not a valid URL"
                    )));
                }
            }
        }

        for (field, scripts) in [
            ("project.scripts", &project.scripts),
            ("project.gui-scripts", &project.gui_scripts),
        ] {
            if let Some(scripts) = scripts {
                Self::validate_entry_points(field, scripts)?;
            }
        }

        if let Some(entry_points) = &project.entry_points {
            for (group, entries) in entry_points {
                if group == "console_scripts" || group == "gui_scripts" {
                    return Err(invalid(format!(
                        "project.entry-points.{group} must be declared as project.scripts or project.gui-scripts"
                    )));
                }
                Self::validate_entry_points(&format!("project.entry-points.{group}"), entries)?;
            }
        }

        if let Some(dependencies) = &project.dependencies {
            Self::validate_requirements("project.dependencies", dependencies)?;
        }

        if let Some(optional) = &project.optional_dependencies {
            for (extra, requirements) in optional {
                if !NAME_RE.is_match(extra) {
                    return Err(invalid(format!(
                        "project.optional-dependencies: '{extra}' is not a valid extra name"
                    )));
                }
                Self::validate_requirements(
                    &format!("project.optional-dependencies.{extra}"),
                    requirements,
                )?;
            }
        }

        Ok(())
    }

    fn validate_dynamic(project: &ProjectTable) -> Result<()> {
        for field in &project.dynamic {
            if field == "name" {
                return Err(invalid("project.dynamic must not contain 'name'"));
            }
            if !DYNAMIC_FIELDS.contains(&field.as_str()) {
                return Err(invalid(format!(
                    "project.dynamic: '{field}' is not a [project] key"
                )));
            }
            if project.is_set(field) {
                return Err(invalid(format!(
                    "project.{field} is listed in project.dynamic but also set statically"
                )));
            }
        }
        Ok(())
    }

    fn validate_readme(readme: &Readme) -> Result<()> {
        match readme {
            Readme::Path(path) if path.trim().is_empty() => {
                Err(invalid("project.readme must not be empty"))
            }
            Readme::Table(table) if table.file.is_some() == table.text.is_some() => Err(
                invalid("project.readme must set exactly one of 'file' or 'text'"),
            ),
            Readme::Table(table) if table.content_type.is_none() => {
                Err(invalid("project.readme.content-type is required"))
            }
            _ => Ok(()),
        }
    }

    fn validate_license(license: &License) -> Result<()> {
        match license {
            License::Expression(expression) if expression.trim().is_empty() => {
                Err(invalid("project.license must not be empty"))
            }
            License::Table(table) if table.file.is_some() == table.text.is_some() => Err(
                invalid("project.license must set exactly one of 'file' or 'text'"),
            ),
            _ => Ok(()),
        }
    }

    fn validate_contacts(field: &str, contacts: &[Contact]) -> Result<()> {
        for (index, contact) in contacts.iter().enumerate() {
            if contact.name.is_none() && contact.email.is_none() {
                return Err(invalid(format!(
                    "{field}[{index}] must set 'name' or 'email'"
                )));
            }
            if let Some(email) = &contact.email {
                if !email.contains('@') {
                    return Err(invalid(format!(
                        "{field}[{index}]: '{email}' is not an email address"
                    )));
                }
            }
        }
        Ok(())
    }

    fn validate_entry_points(field: &str, entries: &BTreeMap<String, String>) -> Result<()> {
        for (name, reference) in entries {
            if !ENTRY_POINT_NAME_RE.is_match(name) {
                return Err(invalid(format!(
                    "{field}: '{name}' is not a valid entry point name"
                )));
            }
            if !ENTRY_POINT_RE.is_match(reference) {
                return Err(invalid(format!(
                    "{field}.{name}: '{reference}' is not a valid object reference"
                )));
            }
        }
        Ok(())
    }

    fn validate_requirements(field: &str, requirements: &[String]) -> Result<()> {
        for (index, requirement) in requirements.iter().enumerate() {
            if !REQUIREMENT_RE.is_match(requirement) {
                return Err(invalid(format!(
                    "{field}[{index}]: '{requirement}' is not a valid PEP 508 requirement"
                )));
            }
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> BumpError {
    BumpError::SchemaInvalid(message.into())
}

use crate::error::{BumpError, Result};
use crate::utils::{PathValidator, TomlUtils};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use toml_edit::DocumentMut;

/// Key used for the unconditional `project.dependencies` list.
pub const MAIN_GROUP_KEY: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupName {
    /// `project.dependencies`
    Main,
    /// `project.optional-dependencies.<name>`
    Optional(String),
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupName::Main => f.write_str(MAIN_GROUP_KEY),
            GroupName::Optional(name) => f.write_str(name),
        }
    }
}

/// One dependency list from the manifest, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGroup {
    pub name: GroupName,
    pub specifiers: Vec<String>,
}

impl DependencyGroup {
    pub fn new(name: GroupName, specifiers: Vec<String>) -> Self {
        Self { name, specifiers }
    }
}

/// A `pyproject.toml` loaded with its formatting intact.
pub struct PyprojectManifest {
    path: PathBuf,
    doc: DocumentMut,
}

impl PyprojectManifest {
    /// Read and parse the manifest. The file is closed before this returns.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = PathValidator::validate_manifest_path(path)?;

        let content = fs::read_to_string(&path)?;
        let doc = content
            .parse::<DocumentMut>()
            .map_err(|e| BumpError::TomlParsing(e.to_string().trim_end().to_string()))?;

        Ok(Self { path, doc })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn document(&self) -> &DocumentMut {
        &self.doc
    }

    /// Main group first (when non-empty), then every optional group in file order.
    pub fn dependency_groups(&self) -> Result<Vec<DependencyGroup>> {
        let Some(project) = self.doc.get("project").and_then(|p| p.as_table_like()) else {
            return Err(BumpError::NoDependencies);
        };

        let mut groups = Vec::new();

        if let Some(main) = project.get("dependencies").and_then(TomlUtils::string_array) {
            if !main.is_empty() {
                groups.push(DependencyGroup::new(GroupName::Main, main));
            }
        }

        if let Some(optional) = project
            .get("optional-dependencies")
            .and_then(|o| o.as_table_like())
        {
            for (name, item) in optional.iter() {
                if let Some(specifiers) = TomlUtils::string_array(item) {
                    groups.push(DependencyGroup::new(
                        GroupName::Optional(name.to_string()),
                        specifiers,
                    ));
                }
            }
        }

        if groups.is_empty() {
            return Err(BumpError::NoDependencies);
        }

        Ok(groups)
    }

    /// Write a group's specifiers back into the document. Returns the number
    /// of array elements whose text changed.
    pub fn replace_group(&mut self, group: &DependencyGroup) -> usize {
        let Some(project) = self
            .doc
            .get_mut("project")
            .and_then(|p| p.as_table_like_mut())
        else {
            return 0;
        };

        let item = match &group.name {
            GroupName::Main => project.get_mut("dependencies"),
            GroupName::Optional(name) => project
                .get_mut("optional-dependencies")
                .and_then(|o| o.as_table_like_mut())
                .and_then(|o| o.get_mut(name)),
        };

        item.map_or(0, |item| TomlUtils::replace_strings(item, &group.specifiers))
    }

    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, self.doc.to_string())?;
        Ok(())
    }
}

use toml_edit::{Item, Value};

/// Helpers for reading and rewriting string arrays inside `pyproject.toml`.
pub struct TomlUtils;

impl TomlUtils {
    /// Collects the string elements of an array item, skipping anything else.
    pub fn string_array(item: &Item) -> Option<Vec<String>> {
        let array = item.as_array()?;
        Some(
            array
                .iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect(),
        )
    }

    /// Overwrites the array's string elements in order with `replacements`.
    ///
    /// Only elements whose text actually changes are touched, and each keeps
    /// its decor, so comments and line layout inside the array survive.
    /// Returns the number of rewritten elements.
    pub fn replace_strings(item: &mut Item, replacements: &[String]) -> usize {
        let Some(array) = item.as_array_mut() else {
            return 0;
        };

        let mut changed = 0;
        let targets = array.iter_mut().filter(|v| v.as_str().is_some());
        for (value, replacement) in targets.zip(replacements) {
            if value.as_str() == Some(replacement.as_str()) {
                continue;
            }
            let decor = value.decor().clone();
            *value = Value::from(replacement.as_str());
            *value.decor_mut() = decor;
            changed += 1;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml_edit::DocumentMut;

    #[test]
    fn reads_string_array() {
        let doc: DocumentMut = r#"deps = ["a==1", "b~=2"]"#.parse().unwrap();
        assert_eq!(
            TomlUtils::string_array(doc.get("deps").unwrap()),
            Some(vec!["a==1".to_string(), "b~=2".to_string()])
        );
    }

    #[test]
    fn non_array_is_none() {
        let doc: DocumentMut = r#"deps = "a==1""#.parse().unwrap();
        assert!(TomlUtils::string_array(doc.get("deps").unwrap()).is_none());
    }

    #[test]
    fn replaces_only_changed_elements_and_keeps_comments() {
        let source = r#"deps = [
    "a==1",  # core
    # pinned for reasons
    "b~=2",
]
"#;
        let mut doc: DocumentMut = source.parse().unwrap();
        let item = doc.get_mut("deps").unwrap();
        let changed = TomlUtils::replace_strings(item, &["a==3".to_string(), "b~=2".to_string()]);
        assert_eq!(changed, 1);

        let expected = r#"deps = [
    "a==3",  # core
    # pinned for reasons
    "b~=2",
]
"#;
        assert_eq!(doc.to_string(), expected);
    }

    #[test]
    fn unchanged_elements_keep_their_quoting() {
        let mut doc: DocumentMut = "deps = ['a==1']\n".parse().unwrap();
        let item = doc.get_mut("deps").unwrap();
        assert_eq!(TomlUtils::replace_strings(item, &["a==1".to_string()]), 0);
        assert_eq!(doc.to_string(), "deps = ['a==1']\n");
    }
}

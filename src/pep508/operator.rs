use std::fmt;
use thiserror::Error;

/// Characters that only show up in direct references (`name @ url`) or other
/// constructs this tool does not rewrite.
const COMPLEX_CHARS: &[char] = &['/', ':', '@'];

/// Range and exclusion operators. Any of them means the version is not pinned.
const RANGE_OPERATORS: &[&str] = &["<=", "<", "!=", ">=", ">"];

/// Pin operators that can be rewritten in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinOperator {
    /// `==`
    Equal,
    /// `~=`
    Compatible,
    /// `===`
    ArbitraryEqual,
}

impl PinOperator {
    /// Longest token first so `===` never scans as `==` followed by a stray `=`.
    const SCAN_ORDER: [PinOperator; 3] = [
        PinOperator::ArbitraryEqual,
        PinOperator::Equal,
        PinOperator::Compatible,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PinOperator::Equal => "==",
            PinOperator::Compatible => "~=",
            PinOperator::ArbitraryEqual => "===",
        }
    }
}

impl fmt::Display for PinOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a specifier cannot be rewritten.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedSpecifier {
    #[error("can't handle complex dependency specifiers")]
    Complex,

    #[error("no pinned version specified")]
    Unpinned,

    #[error("no version specified")]
    Unversioned,
}

/// Determine the single pin operator used by `specifier`.
///
/// The environment marker (everything from the first `;`) is ignored, so a
/// marker such as `platform_version=='2'` does not count as a second pin.
pub fn extract_operator(specifier: &str) -> Result<PinOperator, UnsupportedSpecifier> {
    if specifier.contains(COMPLEX_CHARS) {
        return Err(UnsupportedSpecifier::Complex);
    }

    let requirement = strip_marker(specifier);

    if RANGE_OPERATORS.iter().any(|op| requirement.contains(op)) {
        return Err(UnsupportedSpecifier::Unpinned);
    }

    let found = scan_pin_operators(requirement);
    match found.as_slice() {
        [] => Err(UnsupportedSpecifier::Unversioned),
        [operator] => Ok(*operator),
        _ => Err(UnsupportedSpecifier::Complex),
    }
}

/// Returns the part of a specifier that precedes its environment marker.
pub fn strip_marker(specifier: &str) -> &str {
    specifier
        .split_once(';')
        .map_or(specifier, |(requirement, _)| requirement)
}

fn scan_pin_operators(text: &str) -> Vec<PinOperator> {
    let mut found = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let matched = PinOperator::SCAN_ORDER
            .into_iter()
            .find(|op| rest.starts_with(op.as_str()));

        let advance = match matched {
            Some(op) => {
                found.push(op);
                op.as_str().len()
            }
            None => rest.chars().next().map_or(1, char::len_utf8),
        };
        rest = &rest[advance..];
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &[&str] = &[
        "requests==1.0.0",
        "requests~=1.0",
        "requests===1.0.0",
        "requests==1.0.*",
        "requests==1.0.1dev0",
        "requests[foo]==1.0",
        "requests[foo,bar]==1.0.0",
        "requests == 1.0",
        "requests[foo] == 1.0",
        "requests== 1.0",
        "requests ==1.0",
        "requests   ==   1.0",
        " requests==1.0 ",
        "  requests == 1.0  ",
        "requests==1.0 ; python_version < '4.0'",
        "requests~=1.0.0;python_version>'2.7'",
        "requests[foo, bar]==1.0.0;python_version>'2.7' and platform_version=='2'",
        "requests == 1.0; os_name=='a' or os_name=='b'",
    ];

    const UNPINNED: &[&str] = &[
        "foo>1.0",
        "foo<1.0",
        "foo>=1.0",
        "foo<=1.0",
        "foo!=1.0",
        "foo >= 1.0dev1",
        "foo >= 1.0.1, <= 2.0.*",
        "foo >= 1.0.1, == 1.0.*",
        "foo>1.0.0,<2.0.0",
        "foo>1.0; python_version < '4.0'",
        "foo [bar,baz] >= 2.8.1, == 2.8.* ; python_version < '4.0'",
    ];

    const UNVERSIONED: &[&str] = &[
        "foo",
        "foo_bar2",
        "foo[bar]",
        "foo [bar,baz]",
        "foo[bar, baz];python_version<'2.7' and platform_version=='2'",
        "foo; os_name=='a' or os_name=='b'",
    ];

    const COMPLEX: &[&str] = &[
        "foo@http://foo.com",
        "foo [bar,baz] @ http://foo.com ; python_version=='2.7'",
        "foo @ https://github.com/foo/foo/archive/1.0.0.zip",
        "foo==1.0==2.0",
        "foo==1.0~=1.0",
    ];

    #[test]
    fn accepts_single_pin_operator() {
        for specifier in VALID {
            assert!(
                extract_operator(specifier).is_ok(),
                "expected a pin operator in {specifier:?}"
            );
        }
    }

    #[test]
    fn rejects_range_operators_as_unpinned() {
        for specifier in UNPINNED {
            assert_eq!(
                extract_operator(specifier),
                Err(UnsupportedSpecifier::Unpinned),
                "{specifier:?}"
            );
        }
    }

    #[test]
    fn rejects_missing_operator_as_unversioned() {
        for specifier in UNVERSIONED {
            assert_eq!(
                extract_operator(specifier),
                Err(UnsupportedSpecifier::Unversioned),
                "{specifier:?}"
            );
        }
    }

    #[test]
    fn rejects_url_references_and_double_pins_as_complex() {
        for specifier in COMPLEX {
            assert_eq!(
                extract_operator(specifier),
                Err(UnsupportedSpecifier::Complex),
                "{specifier:?}"
            );
        }
    }

    #[test]
    fn arbitrary_equality_is_a_single_token() {
        assert_eq!(
            extract_operator("requests===1.0.0"),
            Ok(PinOperator::ArbitraryEqual)
        );
        assert_eq!(
            extract_operator("requests === 1.0.0 ; os_name=='nt'"),
            Ok(PinOperator::ArbitraryEqual)
        );
    }

    #[test]
    fn picks_the_operator_actually_used() {
        assert_eq!(extract_operator("requests==1.0"), Ok(PinOperator::Equal));
        assert_eq!(
            extract_operator("requests~=1.0.0;python_version>'2.7'"),
            Ok(PinOperator::Compatible)
        );
    }

    #[test]
    fn marker_operators_do_not_count() {
        assert_eq!(
            extract_operator("requests==1.0; python_version >= '3.8'"),
            Ok(PinOperator::Equal)
        );
    }

    #[test]
    fn whitespace_variants_extract_the_same_operator() {
        for specifier in [" requests==1.0 ", "requests == 1.0", "requests==1.0"] {
            assert_eq!(extract_operator(specifier), Ok(PinOperator::Equal));
        }
    }

    #[test]
    fn reason_messages_match_console_output() {
        assert_eq!(
            UnsupportedSpecifier::Complex.to_string(),
            "can't handle complex dependency specifiers"
        );
        assert_eq!(
            UnsupportedSpecifier::Unpinned.to_string(),
            "no pinned version specified"
        );
        assert_eq!(
            UnsupportedSpecifier::Unversioned.to_string(),
            "no version specified"
        );
    }
}

//! Shared fixtures for integration tests.

#![allow(dead_code)]

use numdb::{Database, MatchPart, Props};

/// The reference database used throughout the docs.
pub const EXAMPLE_DB: &str = r#"# comment line
0        prop1="foo"
  100    prop2="bar"
  200-345 prop2="bar" prop3="baz"
6        prop1="boo"
  333    prop2="bar" prop3="baz" prop4="bla"
90,98    prop1="booz"
  20,89  prop2="foo"
  985    prop2="fooz"
"#;

pub fn example_db() -> Database {
    numdb::read_str(EXAMPLE_DB).expect("example database parses")
}

pub fn props(pairs: &[(&str, &str)]) -> Props {
    pairs.iter().copied().collect()
}

/// Build an expected `info` result from `(digits, props)` pairs.
pub fn parts(expected: &[(&str, &[(&str, &str)])]) -> Vec<MatchPart> {
    expected
        .iter()
        .map(|(digits, pairs)| MatchPart::new(*digits, props(pairs)))
        .collect()
}

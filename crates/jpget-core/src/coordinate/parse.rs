//! Tokenizing for the compact coordinate grammars.

use super::{Coordinate, CoordinateError, DEFAULT_GROUP, DEFAULT_PACKAGING};

/// Splits on `:` and trims each token. Empty tokens are dropped, so `a::b`
/// tokenizes the same as `a:b`.
fn tokenize(input: &str) -> Vec<&str> {
    input
        .split(':')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

pub(super) fn parse_compact(input: &str) -> Result<Coordinate, CoordinateError> {
    let tokens = tokenize(input);
    match tokens.as_slice() {
        [name, version] => Ok(Coordinate::new(DEFAULT_GROUP, name, version, DEFAULT_PACKAGING)),
        [group, name, version] => Ok(Coordinate::new(group, name, version, DEFAULT_PACKAGING)),
        [group, name, version, packaging] => Ok(Coordinate::new(group, name, version, packaging)),
        [group, name, version, packaging, classifier] => {
            Ok(Coordinate::new(group, name, version, packaging).with_classifier(classifier))
        }
        _ => Err(CoordinateError::InvalidCoordinateFormat(input.to_string())),
    }
}

pub(super) fn parse_dependency(entry: &str) -> Option<Coordinate> {
    let declared = entry.split(';').next().unwrap_or("");
    match tokenize(declared).as_slice() {
        [name, version] => Some(Coordinate::new(DEFAULT_GROUP, name, version, DEFAULT_PACKAGING)),
        [group, name, version] => Some(Coordinate::new(group, name, version, DEFAULT_PACKAGING)),
        _ => None,
    }
}

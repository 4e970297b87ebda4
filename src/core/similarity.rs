use std::collections::HashSet;

use crate::error::MatchError;
use crate::models::{AttributeValue, FieldKind, DEFAULT_TOKEN_DELIMITER};

/// Compare two attribute values of the same kind, returning a similarity in [0, 1]
///
/// Multi-choice values are split on the default `", "` delimiter.
pub fn compare_attributes(a: &AttributeValue, b: &AttributeValue) -> Result<f64, MatchError> {
    compare_attributes_with(a, b, DEFAULT_TOKEN_DELIMITER)
}

/// Compare two attribute values, splitting multi-choice values on `delimiter`
///
/// # Errors
/// `MatchError::Precondition` when the two values have different field kinds.
pub fn compare_attributes_with(
    a: &AttributeValue,
    b: &AttributeValue,
    delimiter: &str,
) -> Result<f64, MatchError> {
    if a.field_kind != b.field_kind {
        return Err(MatchError::Precondition(format!(
            "field kinds differ: '{}' is {:?} but '{}' is {:?}",
            a.field_name, a.field_kind, b.field_name, b.field_kind
        )));
    }

    let similarity = match a.field_kind {
        FieldKind::SingleChoice => {
            if a.value == b.value {
                1.0
            } else {
                0.0
            }
        }
        FieldKind::MultiChoice => token_overlap(&a.value, &b.value, delimiter),
    };

    Ok(similarity)
}

/// Shared tokens normalized by the larger token set
///
/// Dividing by the larger set keeps the result within [0, 1] and penalizes
/// lopsided answers. The floor of 1 makes two empty sets score 0.
#[inline]
fn token_overlap(a: &str, b: &str, delimiter: &str) -> f64 {
    let a_tokens = tokenize(a, delimiter);
    let b_tokens = tokenize(b, delimiter);

    let shared = a_tokens.intersection(&b_tokens).count();
    let largest = a_tokens.len().max(b_tokens.len()).max(1);

    shared as f64 / largest as f64
}

fn tokenize<'a>(value: &'a str, delimiter: &str) -> HashSet<&'a str> {
    value
        .split(delimiter)
        .filter(|token| !token.is_empty())
        .collect()
}

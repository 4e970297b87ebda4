use crate::core::similarity::compare_attributes_with;
use crate::error::MatchError;
use crate::models::{CandidateRecord, ScoringConfig};

/// Calculate the directional affinity scores (proposer -> respondent, respondent -> proposer)
///
/// Uses the default favorite boost of 3 and the `", "` token delimiter.
/// Record ids are ignored.
pub fn compute_affinity(
    proposer: &CandidateRecord,
    respondent: &CandidateRecord,
) -> Result<(f64, f64), MatchError> {
    compute_affinity_with(proposer, respondent, &ScoringConfig::default())
}

/// Calculate the directional affinity scores with explicit scoring parameters
///
/// Scoring formula, per side:
/// score = sum over categories of (similarity * weight)
///
/// Every category weighs `1 / n`. When the side declares a favorite that
/// names one of its fields, the weights become `1 / (n + boost - 1)` with the
/// favorite multiplied by `boost`. Either way one side's weights sum to 1.
///
/// # Errors
/// * `MatchError::Validation` if a category exists on only one record, or the
///   boost is below 1 or the delimiter is empty
/// * `MatchError::Precondition` if a category's field kinds disagree
pub fn compute_affinity_with(
    proposer: &CandidateRecord,
    respondent: &CandidateRecord,
    config: &ScoringConfig,
) -> Result<(f64, f64), MatchError> {
    config.validate()?;
    ensure_same_categories(proposer, respondent)?;

    let num_categories = proposer.attributes.len();
    if num_categories == 0 {
        return Ok((0.0, 0.0));
    }

    let proposer_weights = SideWeights::for_record(proposer, num_categories, config.favorite_boost);
    let respondent_weights = SideWeights::for_record(respondent, num_categories, config.favorite_boost);

    let mut proposer_score = 0.0;
    let mut respondent_score = 0.0;

    for (category_id, proposer_value) in &proposer.attributes {
        let respondent_value = respondent
            .attributes
            .get(category_id)
            .ok_or_else(|| missing_category(category_id, &respondent.id))?;

        let similarity = compare_attributes_with(proposer_value, respondent_value, &config.token_delimiter)?;

        proposer_score += similarity * proposer_weights.weight_for(&proposer_value.field_name);
        respondent_score += similarity * respondent_weights.weight_for(&respondent_value.field_name);
    }

    Ok((proposer_score, respondent_score))
}

/// Per-side category weighting
#[derive(Debug, Clone, Copy)]
struct SideWeights<'a> {
    favorite: Option<&'a str>,
    regular: f64,
    boosted: f64,
}

impl<'a> SideWeights<'a> {
    fn for_record(record: &'a CandidateRecord, num_categories: usize, boost: f64) -> Self {
        let n = num_categories as f64;

        match record.effective_favorite() {
            Some(favorite) => {
                let adjusted = 1.0 / (n + boost - 1.0);
                Self {
                    favorite: Some(favorite),
                    regular: adjusted,
                    boosted: adjusted * boost,
                }
            }
            None => Self {
                favorite: None,
                regular: 1.0 / n,
                boosted: 1.0 / n,
            },
        }
    }

    #[inline]
    fn weight_for(&self, field_name: &str) -> f64 {
        if self.favorite == Some(field_name) {
            self.boosted
        } else {
            self.regular
        }
    }
}

fn ensure_same_categories(proposer: &CandidateRecord, respondent: &CandidateRecord) -> Result<(), MatchError> {
    if let Some(category_id) = proposer
        .attributes
        .keys()
        .find(|id| !respondent.attributes.contains_key(*id))
    {
        return Err(missing_category(category_id, &respondent.id));
    }

    if let Some(category_id) = respondent
        .attributes
        .keys()
        .find(|id| !proposer.attributes.contains_key(*id))
    {
        return Err(missing_category(category_id, &proposer.id));
    }

    Ok(())
}

fn missing_category(category_id: &str, record_id: &str) -> MatchError {
    MatchError::Validation(format!(
        "category '{}' is missing from record '{}'",
        category_id, record_id
    ))
}

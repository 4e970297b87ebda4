use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::MatchError;

/// Separator between tokens of a multi-choice cell value
pub const DEFAULT_TOKEN_DELIMITER: &str = ", ";

/// Weight multiplier applied to a participant's favorite attribute
pub const DEFAULT_FAVORITE_BOOST: f64 = 3.0;

/// Which group a participant belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Proposer,
    Respondent,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Proposer => write!(f, "proposer"),
            Side::Respondent => write!(f, "respondent"),
        }
    }
}

/// Kind of a categorical field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "singleChoice", alias = "singleSelect")]
    SingleChoice,
    #[serde(rename = "multiChoice", alias = "multipleSelects")]
    MultiChoice,
}

/// One typed cell value of a participant record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    #[serde(rename = "fieldKind")]
    pub field_kind: FieldKind,
    pub value: String,
}

impl AttributeValue {
    pub fn single(field_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            field_kind: FieldKind::SingleChoice,
            value: value.into(),
        }
    }

    pub fn multi(field_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            field_kind: FieldKind::MultiChoice,
            value: value.into(),
        }
    }
}

/// A participant row prior to scoring, keyed by category (mapping) id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: String,
    #[serde(rename = "favoriteAttributeName", default)]
    pub favorite_attribute_name: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl CandidateRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, category_id: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(category_id.into(), value);
        self
    }

    pub fn with_favorite(mut self, field_name: impl Into<String>) -> Self {
        self.favorite_attribute_name = Some(field_name.into());
        self
    }

    /// The declared favorite, only when it names one of this record's fields
    pub fn effective_favorite(&self) -> Option<&str> {
        let favorite = self.favorite_attribute_name.as_deref()?;
        if favorite.is_empty() {
            return None;
        }

        self.attributes
            .values()
            .any(|value| value.field_name == favorite)
            .then_some(favorite)
    }
}

/// A counterpart id together with the affinity score toward it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(rename = "matchId")]
    pub match_id: String,
    pub score: f64,
}

/// A participant with its ranked preference list over the opposite side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub preferences: Vec<String>,
    #[serde(rename = "expandedPreferences", default)]
    pub expanded_preferences: Vec<RankedCandidate>,
}

impl Participant {
    /// Build a participant from a plain ranked id list
    pub fn new<I, S>(id: impl Into<String>, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            preferences: preferences.into_iter().map(Into::into).collect(),
            expanded_preferences: Vec::new(),
        }
    }
}

/// One pairing in a matching result
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchPair {
    #[serde(rename = "proposerId")]
    pub proposer_id: String,
    #[serde(rename = "respondentId")]
    pub respondent_id: String,
}

impl MatchPair {
    pub fn new(proposer_id: impl Into<String>, respondent_id: impl Into<String>) -> Self {
        Self {
            proposer_id: proposer_id.into(),
            respondent_id: respondent_id.into(),
        }
    }
}

/// Affinity scoring parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub favorite_boost: f64,
    pub token_delimiter: String,
}

impl ScoringConfig {
    /// Reject parameters that would produce non-finite or negative scores
    pub fn validate(&self) -> Result<(), MatchError> {
        if !self.favorite_boost.is_finite() || self.favorite_boost < 1.0 {
            return Err(MatchError::Validation(format!(
                "favorite boost must be a finite number of at least 1, got {}",
                self.favorite_boost
            )));
        }
        if self.token_delimiter.is_empty() {
            return Err(MatchError::Validation("token delimiter must not be empty".to_string()));
        }

        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            favorite_boost: DEFAULT_FAVORITE_BOOST,
            token_delimiter: DEFAULT_TOKEN_DELIMITER.to_string(),
        }
    }
}

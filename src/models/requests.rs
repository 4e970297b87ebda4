use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::models::domain::{FieldKind, Side};

/// Pairs one proposer-side field with one respondent-side field
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FieldMapping {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "proposer_field_id", rename = "proposerFieldId")]
    pub proposer_field_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "respondent_field_id", rename = "respondentFieldId")]
    pub respondent_field_id: String,
}

impl FieldMapping {
    pub fn field_id_for(&self, side: Side) -> &str {
        match side {
            Side::Proposer => &self.proposer_field_id,
            Side::Respondent => &self.respondent_field_id,
        }
    }
}

/// Schema entry for a field on one side
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FieldSchema {
    #[validate(length(min = 1))]
    pub id: String,
    pub name: String,
    pub kind: FieldKind,
}

/// A raw row: record id plus cell values rendered as strings, keyed by field id
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RawRecord {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    pub cells: HashMap<String, String>,
}

/// Request to build preference lists or run a full matching
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchingRequest {
    #[validate(nested)]
    #[serde(alias = "field_mappings", rename = "fieldMappings", default)]
    pub field_mappings: Vec<FieldMapping>,
    #[serde(alias = "proposer_favorite_field_id", rename = "proposerFavoriteFieldId", default)]
    pub proposer_favorite_field_id: Option<String>,
    #[serde(alias = "respondent_favorite_field_id", rename = "respondentFavoriteFieldId", default)]
    pub respondent_favorite_field_id: Option<String>,
    #[validate(nested)]
    #[serde(alias = "proposer_fields", rename = "proposerFields", default)]
    pub proposer_fields: Vec<FieldSchema>,
    #[validate(nested)]
    #[serde(alias = "respondent_fields", rename = "respondentFields", default)]
    pub respondent_fields: Vec<FieldSchema>,
    #[validate(nested)]
    #[serde(default)]
    pub proposers: Vec<RawRecord>,
    #[validate(nested)]
    #[serde(default)]
    pub respondents: Vec<RawRecord>,
}

impl MatchingRequest {
    pub fn fields_for(&self, side: Side) -> &[FieldSchema] {
        match side {
            Side::Proposer => &self.proposer_fields,
            Side::Respondent => &self.respondent_fields,
        }
    }

    pub fn favorite_field_for(&self, side: Side) -> Option<&str> {
        let favorite = match side {
            Side::Proposer => self.proposer_favorite_field_id.as_deref(),
            Side::Respondent => self.respondent_favorite_field_id.as_deref(),
        };
        favorite.filter(|id| !id.is_empty())
    }

    pub fn records_for(&self, side: Side) -> &[RawRecord] {
        match side {
            Side::Proposer => &self.proposers,
            Side::Respondent => &self.respondents,
        }
    }
}

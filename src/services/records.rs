use std::collections::{HashMap, HashSet};

use crate::error::MatchError;
use crate::models::{AttributeValue, CandidateRecord, FieldMapping, FieldSchema, RawRecord, Side};

/// Shape raw rows of one side into typed candidate records
///
/// Each mapping becomes one category keyed by the mapping id. The field name
/// and kind come from the side's schema; the value is the row's cell for the
/// mapped field, or an empty string when the cell is absent.
///
/// When `favorite_field_id` is given, the row's value in that field names the
/// attribute the participant cares most about. An empty value means none.
///
/// # Errors
/// `MatchError::Validation` for duplicate mapping ids, a mapping or favorite
/// field that is not in the schema, or a row without an id.
pub fn format_records(
    side: Side,
    mappings: &[FieldMapping],
    fields: &[FieldSchema],
    favorite_field_id: Option<&str>,
    rows: &[RawRecord],
) -> Result<Vec<CandidateRecord>, MatchError> {
    let schema: HashMap<&str, &FieldSchema> = fields.iter().map(|field| (field.id.as_str(), field)).collect();

    let mut mapping_ids = HashSet::with_capacity(mappings.len());
    let mut columns = Vec::with_capacity(mappings.len());

    for mapping in mappings {
        if !mapping_ids.insert(mapping.id.as_str()) {
            return Err(MatchError::Validation(format!("duplicate field mapping id '{}'", mapping.id)));
        }

        let field_id = mapping.field_id_for(side);
        let field = schema.get(field_id).ok_or_else(|| {
            MatchError::Validation(format!(
                "mapping '{}' references unknown {} field '{}'",
                mapping.id, side, field_id
            ))
        })?;

        columns.push((mapping.id.as_str(), *field));
    }

    if let Some(favorite) = favorite_field_id {
        if !schema.contains_key(favorite) {
            return Err(MatchError::Validation(format!(
                "favorite field '{}' is not a {} field",
                favorite, side
            )));
        }
    }

    rows.iter()
        .map(|row| {
            if row.id.is_empty() {
                return Err(MatchError::Validation(format!("{} row is missing an id", side)));
            }

            let attributes = columns
                .iter()
                .map(|(mapping_id, field)| {
                    let value = AttributeValue {
                        field_name: field.name.clone(),
                        field_kind: field.kind,
                        value: row.cells.get(&field.id).cloned().unwrap_or_default(),
                    };
                    (mapping_id.to_string(), value)
                })
                .collect();

            let favorite_attribute_name = favorite_field_id
                .and_then(|id| row.cells.get(id))
                .filter(|name| !name.is_empty())
                .cloned();

            Ok(CandidateRecord {
                id: row.id.clone(),
                favorite_attribute_name,
                attributes,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldKind;

    fn mapping(id: &str, proposer_field: &str, respondent_field: &str) -> FieldMapping {
        FieldMapping {
            id: id.to_string(),
            proposer_field_id: proposer_field.to_string(),
            respondent_field_id: respondent_field.to_string(),
        }
    }

    fn field(id: &str, name: &str, kind: FieldKind) -> FieldSchema {
        FieldSchema {
            id: id.to_string(),
            name: name.to_string(),
            kind,
        }
    }

    fn row(id: &str, cells: &[(&str, &str)]) -> RawRecord {
        RawRecord {
            id: id.to_string(),
            cells: cells.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }

    #[test]
    fn test_formats_rows_by_mapping() {
        let mappings = vec![mapping("abc", "fld_major", "fld_mentor_major")];
        let fields = vec![
            field("fld_major", "Major", FieldKind::SingleChoice),
            field("fld_favorite", "Most important", FieldKind::SingleChoice),
        ];
        let rows = vec![row("rec1", &[("fld_major", "Computer Science"), ("fld_favorite", "Major")])];

        let records = format_records(Side::Proposer, &mappings, &fields, Some("fld_favorite"), &rows).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "rec1");
        assert_eq!(records[0].favorite_attribute_name.as_deref(), Some("Major"));
        assert_eq!(
            records[0].attributes["abc"],
            AttributeValue::single("Major", "Computer Science")
        );
    }

    #[test]
    fn test_uses_side_specific_field() {
        let mappings = vec![mapping("abc", "fld_major", "fld_mentor_major")];
        let fields = vec![field("fld_mentor_major", "Mentor major", FieldKind::MultiChoice)];
        let rows = vec![row("rec9", &[("fld_mentor_major", "Biology, Physics")])];

        let records = format_records(Side::Respondent, &mappings, &fields, None, &rows).unwrap();

        assert_eq!(
            records[0].attributes["abc"],
            AttributeValue::multi("Mentor major", "Biology, Physics")
        );
        assert_eq!(records[0].favorite_attribute_name, None);
    }

    #[test]
    fn test_missing_cell_becomes_empty_value() {
        let mappings = vec![mapping("abc", "fld_major", "x")];
        let fields = vec![field("fld_major", "Major", FieldKind::SingleChoice)];
        let rows = vec![row("rec1", &[])];

        let records = format_records(Side::Proposer, &mappings, &fields, None, &rows).unwrap();
        assert_eq!(records[0].attributes["abc"].value, "");
    }

    #[test]
    fn test_empty_favorite_cell_means_no_favorite() {
        let fields = vec![field("fld_favorite", "Most important", FieldKind::SingleChoice)];
        let rows = vec![row("rec1", &[("fld_favorite", "")])];

        let records = format_records(Side::Proposer, &[], &fields, Some("fld_favorite"), &rows).unwrap();
        assert_eq!(records[0].favorite_attribute_name, None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mappings = vec![mapping("abc", "fld_missing", "x")];

        let err = format_records(Side::Proposer, &mappings, &[], None, &[]).unwrap_err();
        assert!(matches!(err, MatchError::Validation(_)));
    }

    #[test]
    fn test_unknown_favorite_field_rejected() {
        let err = format_records(Side::Proposer, &[], &[], Some("fld_favorite"), &[]).unwrap_err();
        assert!(matches!(err, MatchError::Validation(_)));
    }

    #[test]
    fn test_duplicate_mapping_rejected() {
        let mappings = vec![mapping("abc", "f", "g"), mapping("abc", "f", "g")];
        let fields = vec![field("f", "Major", FieldKind::SingleChoice)];

        let err = format_records(Side::Proposer, &mappings, &fields, None, &[]).unwrap_err();
        assert!(matches!(err, MatchError::Validation(_)));
    }

    #[test]
    fn test_row_without_id_rejected() {
        let err = format_records(Side::Proposer, &[], &[], None, &[row("", &[])]).unwrap_err();
        assert!(matches!(err, MatchError::Validation(_)));
    }
}

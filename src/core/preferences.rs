use std::collections::HashSet;

use crate::core::affinity::compute_affinity_with;
use crate::error::MatchError;
use crate::models::{CandidateRecord, Participant, RankedCandidate, ScoringConfig, Side};

/// Build both sides' ranked preference lists with the default scoring parameters
pub fn build_preference_lists(
    proposers: &[CandidateRecord],
    respondents: &[CandidateRecord],
) -> Result<(Vec<Participant>, Vec<Participant>), MatchError> {
    build_preference_lists_with(proposers, respondents, &ScoringConfig::default())
}

/// Build both sides' ranked preference lists
///
/// Every proposer/respondent pair is scored once. Each participant's list is
/// then sorted by descending affinity. The sort is stable, so ties keep the
/// order in which the opposite side was supplied.
///
/// # Errors
/// * `MatchError::Validation` for empty or duplicate ids, or mismatched categories
/// * `MatchError::Precondition` for field kinds that disagree
pub fn build_preference_lists_with(
    proposers: &[CandidateRecord],
    respondents: &[CandidateRecord],
    config: &ScoringConfig,
) -> Result<(Vec<Participant>, Vec<Participant>), MatchError> {
    config.validate()?;
    ensure_unique_ids(proposers, Side::Proposer)?;
    ensure_unique_ids(respondents, Side::Respondent)?;

    let mut proposer_lists: Vec<Vec<RankedCandidate>> = proposers
        .iter()
        .map(|_| Vec::with_capacity(respondents.len()))
        .collect();
    let mut respondent_lists: Vec<Vec<RankedCandidate>> = respondents
        .iter()
        .map(|_| Vec::with_capacity(proposers.len()))
        .collect();

    for (proposer, proposer_list) in proposers.iter().zip(proposer_lists.iter_mut()) {
        for (respondent, respondent_list) in respondents.iter().zip(respondent_lists.iter_mut()) {
            let (proposer_score, respondent_score) = compute_affinity_with(proposer, respondent, config)?;

            proposer_list.push(RankedCandidate {
                match_id: respondent.id.clone(),
                score: proposer_score,
            });
            respondent_list.push(RankedCandidate {
                match_id: proposer.id.clone(),
                score: respondent_score,
            });
        }
    }

    let proposers = proposers
        .iter()
        .zip(proposer_lists)
        .map(|(record, expanded)| rank(&record.id, expanded))
        .collect();
    let respondents = respondents
        .iter()
        .zip(respondent_lists)
        .map(|(record, expanded)| rank(&record.id, expanded))
        .collect();

    Ok((proposers, respondents))
}

fn rank(id: &str, mut expanded: Vec<RankedCandidate>) -> Participant {
    // sort_by is stable: equal scores keep input order
    expanded.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Participant {
        id: id.to_string(),
        preferences: expanded.iter().map(|c| c.match_id.clone()).collect(),
        expanded_preferences: expanded,
    }
}

fn ensure_unique_ids(records: &[CandidateRecord], side: Side) -> Result<(), MatchError> {
    let mut seen = HashSet::with_capacity(records.len());

    for record in records {
        if record.id.is_empty() {
            return Err(MatchError::Validation(format!("{} record is missing an id", side)));
        }
        if !seen.insert(record.id.as_str()) {
            return Err(MatchError::Validation(format!(
                "duplicate {} id '{}'",
                side, record.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttributeValue;

    fn person(id: &str, major: &str, race: &str) -> CandidateRecord {
        CandidateRecord::new(id)
            .with_attribute("major", AttributeValue::single("Major", major))
            .with_attribute("race", AttributeValue::multi("Race", race))
    }

    #[test]
    fn test_builds_ranked_lists() {
        let mentees = vec![
            person("Rami Abdou", "Computer Science", "Black/African-American, Hispanic/Latinx"),
            person("Jehron Petty", "Information Science", "Hispanic/Latinx"),
        ];
        let mentors = vec![
            person("Jermaine Cole", "Computer Science", "Black/African-American"),
            person("Kendrick Lamar", "Computer Science", "Hispanic/Latinx"),
        ];

        let (mentees, mentors) = build_preference_lists(&mentees, &mentors).unwrap();

        assert_eq!(mentees[0].preferences, vec!["Jermaine Cole", "Kendrick Lamar"]);
        assert_eq!(mentees[1].preferences, vec!["Kendrick Lamar", "Jermaine Cole"]);
        assert_eq!(mentors[0].preferences, vec!["Rami Abdou", "Jehron Petty"]);
        assert_eq!(mentors[1].preferences, vec!["Rami Abdou", "Jehron Petty"]);
    }

    #[test]
    fn test_expanded_preferences_carry_scores() {
        let mentees = vec![person("a", "CS", "X")];
        let mentors = vec![person("1", "CS", "Y"), person("2", "CS", "X")];

        let (mentees, mentors) = build_preference_lists(&mentees, &mentors).unwrap();

        assert_eq!(mentees[0].expanded_preferences.len(), 2);
        assert_eq!(mentees[0].expanded_preferences[0].match_id, "2");
        assert_eq!(mentees[0].expanded_preferences[0].score, 1.0);
        assert_eq!(mentees[0].expanded_preferences[1].score, 0.5);
        assert_eq!(mentors[1].expanded_preferences[0].match_id, "a");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mentees = vec![person("a", "CS", "X"), person("b", "CS", "X")];
        let mentors = vec![person("3", "CS", "X"), person("1", "CS", "X"), person("2", "CS", "X")];

        let (mentees, mentors) = build_preference_lists(&mentees, &mentors).unwrap();

        for mentee in &mentees {
            assert_eq!(mentee.preferences, vec!["3", "1", "2"]);
        }
        for mentor in &mentors {
            assert_eq!(mentor.preferences, vec!["a", "b"]);
        }
    }

    #[test]
    fn test_empty_inputs() {
        let (mentees, mentors) = build_preference_lists(&[], &[]).unwrap();
        assert!(mentees.is_empty());
        assert!(mentors.is_empty());

        let (mentees, mentors) = build_preference_lists(&[person("a", "CS", "X")], &[]).unwrap();
        assert_eq!(mentees.len(), 1);
        assert!(mentees[0].preferences.is_empty());
        assert!(mentors.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mentees = vec![person("a", "CS", "X"), person("a", "CS", "X")];
        let mentors = vec![person("1", "CS", "X")];

        let err = build_preference_lists(&mentees, &mentors).unwrap_err();
        assert!(matches!(err, MatchError::Validation(_)));
    }

    #[test]
    fn test_missing_id_rejected() {
        let mentees = vec![person("", "CS", "X")];

        let err = build_preference_lists(&mentees, &[]).unwrap_err();
        assert!(matches!(err, MatchError::Validation(_)));
    }
}

use std::collections::HashSet;
use std::time::Instant;

use tracing::{debug, info};

use crate::core::{preferences::build_preference_lists_with, stable::run_stable_matching};
use crate::error::MatchError;
use crate::models::{CandidateRecord, MatchPair, Participant, ScoringConfig};

/// Result of the matching process
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub matches: Vec<MatchPair>,
    /// Proposers left without a partner, in input order
    pub unmatched_proposers: Vec<String>,
    /// Respondents left without a partner, in input order
    pub unmatched_respondents: Vec<String>,
}

/// Main matching orchestrator - runs the scoring and pairing pipeline
///
/// # Pipeline Stages
/// 1. Per-attribute similarity
/// 2. Directional affinity per pair
/// 3. Ranked preference lists for both sides
/// 4. Deferred acceptance
#[derive(Debug, Clone)]
pub struct Matcher {
    config: ScoringConfig,
}

impl Matcher {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score every pair and rank both sides
    pub fn preference_lists(
        &self,
        proposers: &[CandidateRecord],
        respondents: &[CandidateRecord],
    ) -> Result<(Vec<Participant>, Vec<Participant>), MatchError> {
        let started = Instant::now();
        let lists = build_preference_lists_with(proposers, respondents, &self.config)?;

        debug!(
            proposers = proposers.len(),
            respondents = respondents.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "preference lists built"
        );

        Ok(lists)
    }

    /// Run the complete pipeline and report who was left unmatched
    ///
    /// # Arguments
    /// * `proposers` - Records of the proposing side (mentees)
    /// * `respondents` - Records of the responding side (mentors)
    ///
    /// # Returns
    /// MatchOutcome with the stable pairs and the unmatched ids of each side
    pub fn run(
        &self,
        proposers: &[CandidateRecord],
        respondents: &[CandidateRecord],
    ) -> Result<MatchOutcome, MatchError> {
        let started = Instant::now();

        let (ranked_proposers, ranked_respondents) = self.preference_lists(proposers, respondents)?;
        let matches = run_stable_matching(&ranked_proposers, &ranked_respondents)?;

        let matched_proposers: HashSet<&str> = matches.iter().map(|m| m.proposer_id.as_str()).collect();
        let matched_respondents: HashSet<&str> = matches.iter().map(|m| m.respondent_id.as_str()).collect();

        let unmatched_proposers = proposers
            .iter()
            .filter(|record| !matched_proposers.contains(record.id.as_str()))
            .map(|record| record.id.clone())
            .collect();
        let unmatched_respondents = respondents
            .iter()
            .filter(|record| !matched_respondents.contains(record.id.as_str()))
            .map(|record| record.id.clone())
            .collect();

        info!(
            proposers = proposers.len(),
            respondents = respondents.len(),
            pairs = matches.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "matching complete"
        );

        Ok(MatchOutcome {
            matches,
            unmatched_proposers,
            unmatched_respondents,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttributeValue;

    fn create_record(id: &str, major: &str, hobbies: &str) -> CandidateRecord {
        CandidateRecord::new(id)
            .with_attribute("major", AttributeValue::single("Major", major))
            .with_attribute("hobbies", AttributeValue::multi("Hobbies", hobbies))
    }

    #[test]
    fn test_run_pairs_best_fits() {
        let matcher = Matcher::with_default_config();

        let mentees = vec![
            create_record("a", "Biology", "Chess"),
            create_record("b", "Computer Science", "Climbing, Running"),
        ];
        let mentors = vec![
            create_record("1", "Computer Science", "Running"),
            create_record("2", "Biology", "Chess"),
        ];

        let outcome = matcher.run(&mentees, &mentors).unwrap();

        assert_eq!(
            outcome.matches,
            vec![MatchPair::new("a", "2"), MatchPair::new("b", "1")]
        );
        assert!(outcome.unmatched_proposers.is_empty());
        assert!(outcome.unmatched_respondents.is_empty());
    }

    #[test]
    fn test_run_reports_unmatched() {
        let matcher = Matcher::default();

        let mentees = vec![create_record("a", "Biology", "Chess")];
        let mentors = vec![
            create_record("1", "Computer Science", "Running"),
            create_record("2", "Biology", "Chess"),
            create_record("3", "Physics", ""),
        ];

        let outcome = matcher.run(&mentees, &mentors).unwrap();

        assert_eq!(outcome.matches, vec![MatchPair::new("a", "2")]);
        assert_eq!(outcome.unmatched_respondents, vec!["1", "3"]);
    }

    #[test]
    fn test_run_with_no_records() {
        let outcome = Matcher::default().run(&[], &[]).unwrap();
        assert!(outcome.matches.is_empty());
        assert!(outcome.unmatched_proposers.is_empty());
        assert!(outcome.unmatched_respondents.is_empty());
    }

    #[test]
    fn test_run_surfaces_errors() {
        let mentees = vec![create_record("a", "Biology", "Chess")];
        let mentors = vec![CandidateRecord::new("1").with_attribute("major", AttributeValue::multi("Major", "Biology"))];

        assert!(Matcher::default().run(&mentees, &mentors).is_err());
    }

    #[test]
    fn test_run_rejects_invalid_boost() {
        let matcher = Matcher::new(ScoringConfig {
            favorite_boost: 0.0,
            ..ScoringConfig::default()
        });

        let err = matcher.run(&[], &[]).unwrap_err();
        assert!(matches!(err, MatchError::Validation(_)));
    }
}

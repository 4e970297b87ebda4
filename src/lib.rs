//! Mentor Match - affinity scoring and stable pairing of mentees with mentors
//!
//! This library scores every mentee/mentor pair on their shared categorical
//! attributes, ranks each side's candidates, and resolves the rankings into
//! a stable one-to-one matching with deferred acceptance.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    build_preference_lists, compare_attributes, compute_affinity, run_stable_matching, MatchOutcome, Matcher,
};
pub use error::MatchError;
pub use models::{AttributeValue, CandidateRecord, FieldKind, MatchPair, Participant, RankedCandidate, ScoringConfig};

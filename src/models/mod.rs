// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AttributeValue, CandidateRecord, FieldKind, MatchPair, Participant, RankedCandidate, ScoringConfig, Side,
    DEFAULT_FAVORITE_BOOST, DEFAULT_TOKEN_DELIMITER,
};
pub use requests::{FieldMapping, FieldSchema, MatchingRequest, RawRecord};
pub use responses::{ErrorResponse, HealthResponse, PreferenceListsResponse, RunMatchingResponse};

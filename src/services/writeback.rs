use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::models::MatchPair;

/// Default number of record updates per write batch
pub const DEFAULT_WRITE_BATCH_SIZE: usize = 50;

/// Link a proposer record to its matched respondent record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkUpdate {
    #[serde(rename = "recordId")]
    pub record_id: String,
    #[serde(rename = "linkedRecordId")]
    pub linked_record_id: String,
}

impl From<&MatchPair> for LinkUpdate {
    fn from(pair: &MatchPair) -> Self {
        Self {
            record_id: pair.proposer_id.clone(),
            linked_record_id: pair.respondent_id.clone(),
        }
    }
}

/// Split `items` into consecutive chunks of at most `chunk_size`
///
/// Empty input yields no chunks.
pub fn chunk<T: Clone>(items: &[T], chunk_size: usize) -> Result<Vec<Vec<T>>, MatchError> {
    if chunk_size == 0 {
        return Err(MatchError::Validation("chunk size must be positive".to_string()));
    }

    Ok(items.chunks(chunk_size).map(<[T]>::to_vec).collect())
}

/// Plan the link updates for a matching, batched for a rate-limited store
///
/// The batches are meant to be written one after another, in order. Writing
/// them is left to the caller.
pub fn plan_link_batches(matches: &[MatchPair], batch_size: usize) -> Result<Vec<Vec<LinkUpdate>>, MatchError> {
    let updates: Vec<LinkUpdate> = matches.iter().map(LinkUpdate::from).collect();
    chunk(&updates, batch_size)
}

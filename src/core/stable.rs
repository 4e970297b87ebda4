use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::error::MatchError;
use crate::models::{MatchPair, Participant, Side};

/// A proposer waiting in the free queue
#[derive(Debug, Clone, Copy)]
struct Suitor {
    /// Index into the proposer slice
    index: usize,
    /// Position of the next untried entry in the proposer's preference list
    next_choice: usize,
}

/// Rank of every proposer in every respondent's list, lower is preferred
struct RankIndex<'a> {
    ranks: HashMap<&'a str, HashMap<&'a str, usize>>,
}

impl<'a> RankIndex<'a> {
    fn build(respondents: &'a [Participant]) -> Self {
        let ranks = respondents
            .iter()
            .map(|respondent| {
                let ranking = respondent
                    .preferences
                    .iter()
                    .enumerate()
                    .map(|(rank, proposer_id)| (proposer_id.as_str(), rank))
                    .collect();
                (respondent.id.as_str(), ranking)
            })
            .collect();

        Self { ranks }
    }

    fn rank_of(&self, respondent_id: &str, proposer_id: &str) -> Result<usize, MatchError> {
        self.ranks
            .get(respondent_id)
            .and_then(|ranking| ranking.get(proposer_id))
            .copied()
            .ok_or_else(|| {
                MatchError::Precondition(format!(
                    "respondent '{}' does not rank proposer '{}'",
                    respondent_id, proposer_id
                ))
            })
    }
}

/// Run deferred acceptance with proposers proposing
///
/// Returns the proposer-optimal stable matching as `(proposer, respondent)`
/// pairs, ordered by when each respondent first became engaged. Proposers
/// who exhaust their list and respondents nobody proposed to successfully
/// are absent from the result.
///
/// A rejected or displaced proposer goes back to the front of the free
/// queue, so it retries before anyone still waiting.
///
/// Only proposer lists are walked, and they may leave respondents out; that
/// proposer simply never proposes to them. A respondent list only has to
/// rank the proposers it ends up choosing between.
///
/// # Errors
/// * `MatchError::Validation` for empty or duplicate participant ids
/// * `MatchError::Precondition` when a list names an unknown id or repeats
///   an id, or when a contested respondent does not rank one of its suitors
pub fn run_stable_matching(
    proposers: &[Participant],
    respondents: &[Participant],
) -> Result<Vec<MatchPair>, MatchError> {
    let proposer_ids = unique_ids(proposers, Side::Proposer)?;
    let respondent_ids = unique_ids(respondents, Side::Respondent)?;

    for proposer in proposers {
        ensure_ranking(proposer, &respondent_ids, Side::Proposer)?;
    }
    for respondent in respondents {
        ensure_ranking(respondent, &proposer_ids, Side::Respondent)?;
    }

    let rank_index = RankIndex::build(respondents);

    let mut free: VecDeque<Suitor> = (0..proposers.len())
        .map(|index| Suitor { index, next_choice: 0 })
        .collect();
    let mut engagements: HashMap<&str, Suitor> = HashMap::with_capacity(respondents.len());
    let mut engagement_order: Vec<&str> = Vec::with_capacity(respondents.len());

    while let Some(mut suitor) = free.pop_front() {
        let proposer = &proposers[suitor.index];

        let Some(respondent_id) = proposer.preferences.get(suitor.next_choice) else {
            debug!(proposer = %proposer.id, "preference list exhausted, proposer stays unmatched");
            continue;
        };
        let respondent_id = respondent_id.as_str();
        suitor.next_choice += 1;

        let Some(current) = engagements.get(respondent_id).copied() else {
            engagements.insert(respondent_id, suitor);
            engagement_order.push(respondent_id);
            continue;
        };

        let current_id = proposers[current.index].id.as_str();
        let current_rank = rank_index.rank_of(respondent_id, current_id)?;
        let new_rank = rank_index.rank_of(respondent_id, &proposer.id)?;

        if new_rank < current_rank {
            debug!(
                respondent = %respondent_id,
                accepted = %proposer.id,
                displaced = %current_id,
                "respondent traded up"
            );
            engagements.insert(respondent_id, suitor);
            free.push_front(current);
        } else {
            debug!(respondent = %respondent_id, rejected = %proposer.id, "proposal rejected");
            free.push_front(suitor);
        }
    }

    let pairs = engagement_order
        .into_iter()
        .filter_map(|respondent_id| {
            engagements
                .get(respondent_id)
                .map(|suitor| MatchPair::new(proposers[suitor.index].id.as_str(), respondent_id))
        })
        .collect();

    Ok(pairs)
}

fn unique_ids(participants: &[Participant], side: Side) -> Result<HashSet<&str>, MatchError> {
    let mut ids = HashSet::with_capacity(participants.len());

    for participant in participants {
        if participant.id.is_empty() {
            return Err(MatchError::Validation(format!("{} is missing an id", side)));
        }
        if !ids.insert(participant.id.as_str()) {
            return Err(MatchError::Validation(format!(
                "duplicate {} id '{}'",
                side, participant.id
            )));
        }
    }

    Ok(ids)
}

/// Check that a list only names known ids, each at most once
fn ensure_ranking(participant: &Participant, opposite_ids: &HashSet<&str>, side: Side) -> Result<(), MatchError> {
    let mut listed = HashSet::with_capacity(participant.preferences.len());

    for id in &participant.preferences {
        if !opposite_ids.contains(id.as_str()) {
            return Err(MatchError::Precondition(format!(
                "{} '{}' lists unknown id '{}'",
                side, participant.id, id
            )));
        }
        if !listed.insert(id.as_str()) {
            return Err(MatchError::Precondition(format!(
                "{} '{}' lists '{}' more than once",
                side, participant.id, id
            )));
        }
    }

    Ok(())
}

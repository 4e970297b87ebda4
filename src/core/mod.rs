// Core algorithm exports
pub mod affinity;
pub mod matcher;
pub mod preferences;
pub mod similarity;
pub mod stable;

pub use affinity::{compute_affinity, compute_affinity_with};
pub use matcher::{MatchOutcome, Matcher};
pub use preferences::{build_preference_lists, build_preference_lists_with};
pub use similarity::{compare_attributes, compare_attributes_with};
pub use stable::run_stable_matching;

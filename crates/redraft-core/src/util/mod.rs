pub mod descendants;
pub mod lcs;

pub use descendants::descendants_trimmed;
pub use lcs::{compute_correlation, find_longest_match, similarity_ratio, CorrelationStatus};

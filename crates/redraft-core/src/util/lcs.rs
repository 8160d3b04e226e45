//! Longest contiguous match correlation.
//!
//! The longest run of equal items shared by two sequences is found first, then
//! the parts on either side of it are correlated recursively. Summing the
//! matched runs gives the similarity ratio used to compare paragraph
//! formatting descriptors.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationStatus {
    Equal,
    Deleted,
    Inserted,
}

impl fmt::Display for CorrelationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationStatus::Equal => write!(f, "Equal"),
            CorrelationStatus::Deleted => write!(f, "Deleted"),
            CorrelationStatus::Inserted => write!(f, "Inserted"),
        }
    }
}

/// One stretch of the correlation. `len1`/`len2` count items taken from each
/// side; an `Equal` block has `len1 == len2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelatedBlock {
    pub status: CorrelationStatus,
    pub len1: usize,
    pub len2: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub i1: usize,
    pub i2: usize,
    pub length: usize,
}

/// Longest run of consecutive equal items. Ties go to the earliest start in
/// `items1`, then in `items2`.
pub fn find_longest_match<T: PartialEq>(items1: &[T], items2: &[T]) -> Option<MatchResult> {
    let mut best = MatchResult { i1: 0, i2: 0, length: 0 };

    for i1 in 0..items1.len() {
        if items1.len() - i1 <= best.length {
            break;
        }
        for i2 in 0..items2.len() {
            if items2.len() - i2 <= best.length {
                break;
            }

            let length = items1[i1..]
                .iter()
                .zip(&items2[i2..])
                .take_while(|(a, b)| a == b)
                .count();

            if length > best.length {
                best = MatchResult { i1, i2, length };
            }
        }
    }

    (best.length > 0).then_some(best)
}

pub fn compute_correlation<T: PartialEq>(items1: &[T], items2: &[T]) -> Vec<CorrelatedBlock> {
    let mut blocks = Vec::new();
    correlate_into(items1, items2, &mut blocks);
    blocks
}

fn correlate_into<T: PartialEq>(items1: &[T], items2: &[T], blocks: &mut Vec<CorrelatedBlock>) {
    if items1.is_empty() && items2.is_empty() {
        return;
    }

    let Some(m) = find_longest_match(items1, items2) else {
        if !items1.is_empty() {
            blocks.push(CorrelatedBlock {
                status: CorrelationStatus::Deleted,
                len1: items1.len(),
                len2: 0,
            });
        }
        if !items2.is_empty() {
            blocks.push(CorrelatedBlock {
                status: CorrelationStatus::Inserted,
                len1: 0,
                len2: items2.len(),
            });
        }
        return;
    };

    correlate_into(&items1[..m.i1], &items2[..m.i2], blocks);
    blocks.push(CorrelatedBlock {
        status: CorrelationStatus::Equal,
        len1: m.length,
        len2: m.length,
    });
    correlate_into(&items1[m.i1 + m.length..], &items2[m.i2 + m.length..], blocks);
}

/// `2 * M / T` over characters, where `M` is the number of matched characters
/// and `T` the combined length. Two empty strings are identical.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let chars1: Vec<char> = a.chars().collect();
    let chars2: Vec<char> = b.chars().collect();

    let total = chars1.len() + chars2.len();
    if total == 0 {
        return 1.0;
    }

    let matched: usize = compute_correlation(&chars1, &chars2)
        .iter()
        .filter(|block| block.status == CorrelationStatus::Equal)
        .map(|block| block.len1)
        .sum();

    2.0 * matched as f64 / total as f64
}

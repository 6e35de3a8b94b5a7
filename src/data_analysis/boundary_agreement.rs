// src/data_analysis/boundary_agreement.rs

use std::collections::BTreeSet;

use crate::data_analysis::boundary_detection::EpisodeBoundaries;

/// Comparison between episode starts implied by reset markers and the starts
/// found by the time-gap detector. The two are reported, never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryAgreement {
    pub matched: Vec<usize>,
    /// Reset markers with no time gap at the following sample.
    pub reset_only: Vec<usize>,
    /// Time gaps with no reset marker in front of them.
    pub gap_only: Vec<usize>,
}

impl BoundaryAgreement {
    pub fn is_consistent(&self) -> bool {
        self.reset_only.is_empty() && self.gap_only.is_empty()
    }
}

/// `reset_positions` are filtered indices as returned by
/// `sentinel_filter::reset_positions`. Markers before the first sample or after
/// the last one do not start an episode inside the sequence and are skipped.
pub fn compare_boundaries(
    reset_positions: &[usize],
    boundaries: &EpisodeBoundaries,
    filtered_len: usize,
) -> BoundaryAgreement {
    let resets: BTreeSet<usize> = reset_positions
        .iter()
        .copied()
        .filter(|&p| p > 0 && p < filtered_len)
        .collect();
    let gaps: BTreeSet<usize> = boundaries.indices.iter().copied().collect();

    BoundaryAgreement {
        matched: resets.intersection(&gaps).copied().collect(),
        reset_only: resets.difference(&gaps).copied().collect(),
        gap_only: gaps.difference(&resets).copied().collect(),
    }
}

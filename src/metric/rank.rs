use std::collections::HashSet;

use super::RelevantSet;

/// Rank based statistics of one ranked list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RankStats {
    /// Relevant documents anywhere in the list.
    pub found: usize,
    pub reciprocal_rank: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Average precision over the hits within the cutoff only.
    pub average_precision: f64,
}

/// Precision, recall, F1 and AP at a fixed cutoff, plus reciprocal rank
/// over the full list.
pub struct RankScorer {
    truncation_level: usize,
}

impl RankScorer {
    pub fn new(truncation_level: usize) -> RankScorer {
        RankScorer { truncation_level: truncation_level }
    }

    pub fn get_k(&self) -> usize {
        self.truncation_level
    }

    pub fn score<'a, I>(&self, docids: I, relevant: &RelevantSet) -> RankStats
    where
        I: IntoIterator<Item = &'a str>,
    {
        let k = self.truncation_level;
        let mut found = 0;
        let mut found_at_k = 0;
        let mut first_rank = None;
        let mut precisions: Vec<f64> = Vec::new();
        let mut seen = HashSet::new();

        for (position, docid) in docids.into_iter().enumerate().map(|(i, d)| (i + 1, d)) {
            // A repeated document only counts where it first appears.
            if !relevant.contains(docid) || !seen.insert(docid) {
                continue;
            }

            found += 1;
            if first_rank.is_none() {
                first_rank = Some(position);
            }
            if position <= k {
                found_at_k += 1;
                precisions.push(found_at_k as f64 / position as f64);
            }
        }

        let recall = if relevant.is_empty() {
            0.0
        } else {
            found_at_k as f64 / relevant.len() as f64
        };
        let precision = if k == 0 {
            0.0
        } else {
            found_at_k as f64 / k as f64
        };
        let f1 = if precision > 0.0 && recall > 0.0 {
            2.0 * (precision * recall) / (precision + recall)
        } else {
            0.0
        };
        let reciprocal_rank = first_rank.map_or(0.0, |rank| 1.0 / rank as f64);
        let average_precision = if relevant.is_empty() {
            0.0
        } else {
            // Sum of no values must stay +0.0, "-0.0000" is not a valid AP.
            precisions.iter().fold(0.0, |acc, &p| acc + p) / relevant.len() as f64
        };

        RankStats {
            found: found,
            reciprocal_rank: reciprocal_rank,
            precision: precision,
            recall: recall,
            f1: f1,
            average_precision: average_precision,
        }
    }
}

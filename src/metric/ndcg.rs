use itertools::Itertools;
use std::cmp::Ordering;

use super::DCGScorer;
use super::MetricScorer;

pub struct NDCGScorer {
    truncation_level: usize,
    dcg: DCGScorer,
}

impl NDCGScorer {
    pub fn new(truncation_level: usize) -> NDCGScorer {
        NDCGScorer {
            truncation_level: truncation_level,
            dcg: DCGScorer::new(truncation_level),
        }
    }

    /// DCG of the best possible ordering of `judged`.
    pub fn max_dcg(&self, judged: &[f64]) -> f64 {
        let sorted: Vec<f64> = judged
            .iter()
            .cloned()
            .sorted_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal))
            .collect();
        self.dcg.score(&sorted)
    }

    /// NDCG of the ranked `labels` against the ideal ordering of every
    /// judged label of the query, which may include documents that were
    /// never retrieved. Zero when the ideal DCG is zero.
    pub fn score_against(&self, labels: &[f64], judged: &[f64]) -> f64 {
        let max = self.max_dcg(judged);
        if max == 0.0 {
            return 0.0;
        }

        let dcg = self.dcg.score(labels);
        debug!("DCG: {}, ideal DCG: {}", dcg, max);
        dcg / max
    }
}

impl MetricScorer for NDCGScorer {
    fn name(&self) -> String {
        format!("NDCG@{}", self.truncation_level)
    }

    fn get_k(&self) -> usize {
        self.truncation_level
    }

    /// NDCG where the ranked labels are the whole judged pool.
    fn score(&self, labels: &[f64]) -> f64 {
        self.score_against(labels, labels)
    }
}

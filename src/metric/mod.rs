pub mod dcg;
pub mod ndcg;
pub mod rank;
pub mod relevance;
pub use self::dcg::DCGScorer;
pub use self::ndcg::NDCGScorer;
pub use self::rank::{RankScorer, RankStats};
pub use self::relevance::RelevantSet;

/// Cutoff of precision, recall, F1 and average precision.
pub const RANK_CUTOFF: usize = 10;

/// Cutoff of NDCG.
pub const GAIN_CUTOFF: usize = 20;

pub trait MetricScorer {
    fn get_k(&self) -> usize;

    /// Score of the labels in ranking order.
    fn score(&self, labels: &[f64]) -> f64;

    /// Name of the scorer. For display.
    fn name(&self) -> String;
}

use super::MetricScorer;

lazy_static! {
    static ref DISCOUNT: Vec<f64> = (0..128).map(discount).collect();
}

/// Discount of the 0-based position `i`. The top position is not
/// discounted, position i + 1 > 1 is divided by log2(i + 1).
fn discount(i: usize) -> f64 {
    if i == 0 {
        1.0
    } else {
        1.0 / (i as f64 + 1.0).log2()
    }
}

/// Discounted cumulative gain with linear gain.
pub struct DCGScorer {
    truncation_level: usize,
}

impl DCGScorer {
    pub fn new(truncation_level: usize) -> DCGScorer {
        DCGScorer { truncation_level: truncation_level }
    }

    pub fn discount(&self, i: usize) -> f64 {
        DISCOUNT.get(i).cloned().unwrap_or_else(|| discount(i))
    }

    fn gain(&self, label: f64) -> f64 {
        label
    }
}

impl MetricScorer for DCGScorer {
    fn name(&self) -> String {
        format!("DCG@{}", self.truncation_level)
    }

    fn get_k(&self) -> usize {
        self.truncation_level
    }

    fn score(&self, labels: &[f64]) -> f64 {
        labels
            .iter()
            .take(self.truncation_level)
            .enumerate()
            .map(|(i, &label)| self.gain(label) * self.discount(i))
            .fold(0.0, |acc, gain| acc + gain)
    }
}

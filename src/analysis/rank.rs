use crate::models::{RankInputs, RankLevel, RankResult};

/// Upper percentile bound of each level, aligned with `RankLevel::ALL`.
pub const THRESHOLDS: [f64; 9] = [1.0, 12.5, 25.0, 37.5, 50.0, 62.5, 75.0, 87.5, 100.0];

pub const COMMITS_MEDIAN_ALL: f64 = 1000.0;
pub const COMMITS_MEDIAN_YEAR: f64 = 250.0;

#[derive(Debug, Clone, Copy)]
enum Curve {
    Exponential,
    LogNormal,
}

#[derive(Debug, Clone, Copy)]
struct Factor {
    weight: f64,
    median: f64,
    curve: Curve,
}

impl Factor {
    const fn new(weight: f64, median: f64, curve: Curve) -> Self {
        Self {
            weight,
            median,
            curve,
        }
    }

    fn score(&self, value: u64) -> f64 {
        let x = value as f64 / self.median;
        match self.curve {
            Curve::Exponential => exponential_cdf(x),
            Curve::LogNormal => log_normal_cdf(x),
        }
    }
}

/// `1 - 2^-x`
pub fn exponential_cdf(x: f64) -> f64 {
    1.0 - 2f64.powf(-x)
}

/// `x / (1 + x)`
pub fn log_normal_cdf(x: f64) -> f64 {
    x / (1.0 + x)
}

/// Weighted percentile rank; lower percentiles are better.
///
/// `all_commits` selects the commit median for lifetime commit counts rather
/// than a single year's.
pub fn calculate_rank(inputs: &RankInputs, all_commits: bool) -> RankResult {
    let commits_median = if all_commits {
        COMMITS_MEDIAN_ALL
    } else {
        COMMITS_MEDIAN_YEAR
    };

    let factors = [
        (Factor::new(2.0, commits_median, Curve::Exponential), inputs.total_commits),
        (Factor::new(3.0, 50.0, Curve::Exponential), inputs.prs),
        (Factor::new(1.0, 25.0, Curve::Exponential), inputs.issues),
        (Factor::new(1.0, 2.0, Curve::Exponential), inputs.reviews),
        (Factor::new(4.0, 50.0, Curve::LogNormal), inputs.stars),
        (Factor::new(1.0, 10.0, Curve::LogNormal), inputs.followers),
    ];

    let total_weight: f64 = factors.iter().map(|(f, _)| f.weight).sum();
    let score = factors
        .iter()
        .map(|(factor, value)| factor.weight * factor.score(*value))
        .sum::<f64>()
        / total_weight;

    let percentile = ((1.0 - score) * 100.0).clamp(0.0, 100.0);

    RankResult {
        level: level_for(percentile),
        percentile,
    }
}

/// First level whose threshold is at least `percentile`; `C` otherwise.
pub fn level_for(percentile: f64) -> RankLevel {
    THRESHOLDS
        .iter()
        .zip(RankLevel::ALL)
        .find(|(threshold, _)| percentile <= **threshold)
        .map(|(_, level)| level)
        .unwrap_or(RankLevel::C)
}

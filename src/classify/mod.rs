//! Rule-based labels derived from score geometry.
//!
//! Dominance and quadrant labels apply to one category's Top-N. Ocean status
//! spans the Top-N of every category in a run. Engagement temperature uses
//! fixed cut points and any keyword with video statistics.

mod dominance;
mod engagement;
mod ocean;
mod quadrant;

pub use dominance::classify_dominance;
pub use engagement::classify_engagement;
pub use engagement::classify_temperature;
pub use engagement::engagement_rate;
pub use engagement::summarize_engagement;
pub use ocean::build_ocean_table;
pub use ocean::classify_ocean;
pub use ocean::GroupedNews;
pub use ocean::NewsDocument;
pub use ocean::NewsIndex;
pub use ocean::OceanThresholds;
pub use quadrant::classify_quadrant;
pub use quadrant::QuadrantThresholds;

/// Arithmetic mean, `None` for an empty input.
pub(crate) fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::mean;

    #[test]
    fn test_mean() {
        assert_eq!(mean([1.0, 2.0, 6.0]), Some(3.0));
        assert_eq!(mean(Vec::<f64>::new()), None);
    }
}

use statrs::distribution::ContinuousCDF;

/// A continuous delay distribution, seen only through its cumulative
/// distribution function.
pub trait DelayDistribution {
    fn cdf(&self, x: f64) -> f64;
}

impl<D: ContinuousCDF<f64, f64>> DelayDistribution for D {
    fn cdf(&self, x: f64) -> f64 {
        ContinuousCDF::cdf(self, x)
    }
}

/// Probability mass assigned to the discrete bucket `day`:
/// `cdf(day) - cdf(day - 1)`, for integer `day >= 1`.
pub fn day_probability(delay: &dyn DelayDistribution, day: usize) -> f64 {
    delay.cdf(day as f64) - delay.cdf(day as f64 - 1.0)
}

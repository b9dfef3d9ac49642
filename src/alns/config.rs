//! ALNS run parameters.

/// Configuration for [`Alns`](super::Alns).
///
/// # Examples
///
/// ```
/// use u_mdvrp::alns::AlnsConfig;
///
/// let config = AlnsConfig::default()
///     .with_max_iterations(100)
///     .with_destroy_fraction(0.3);
/// assert_eq!(config.max_iterations, 100);
/// assert_eq!(config.cooling_rate, 0.995);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AlnsConfig {
    /// Destroy/repair iterations per run.
    pub max_iterations: usize,
    /// Share of the stops removed per destroy step (rounded up).
    pub destroy_fraction: f64,
    /// Initial temperature as a share of the initial makespan.
    pub initial_temperature_ratio: f64,
    /// Multiplicative temperature decay per iteration.
    pub cooling_rate: f64,
}

impl Default for AlnsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 400,
            destroy_fraction: 0.2,
            initial_temperature_ratio: 0.05,
            cooling_rate: 0.995,
        }
    }
}

impl AlnsConfig {
    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the destroy fraction, clamped to `[0, 1]`.
    pub fn with_destroy_fraction(mut self, fraction: f64) -> Self {
        self.destroy_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Sets the initial temperature ratio.
    pub fn with_initial_temperature_ratio(mut self, ratio: f64) -> Self {
        self.initial_temperature_ratio = ratio;
        self
    }

    /// Sets the cooling rate.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Initial temperature for a starting makespan: `ratio · makespan`, or
    /// `1.0` when that is not positive.
    pub fn initial_temperature(&self, makespan: f64) -> f64 {
        let t = makespan * self.initial_temperature_ratio;
        if t > 0.0 {
            t
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AlnsConfig::default();
        assert_eq!(config.max_iterations, 400);
        assert_eq!(config.destroy_fraction, 0.2);
        assert_eq!(config.initial_temperature_ratio, 0.05);
    }

    #[test]
    fn test_initial_temperature() {
        let config = AlnsConfig::default();
        assert!((config.initial_temperature(200.0) - 10.0).abs() < 1e-12);
        assert_eq!(config.initial_temperature(0.0), 1.0);
    }

    #[test]
    fn test_fraction_clamped() {
        assert_eq!(AlnsConfig::default().with_destroy_fraction(1.5).destroy_fraction, 1.0);
    }
}

//! Ant colony parameters.

/// Configuration for [`AntColony`](super::AntColony).
///
/// # Examples
///
/// ```
/// use u_mdvrp::aco::AcoConfig;
///
/// let config = AcoConfig::default().with_ants(10).with_iterations(20);
/// assert_eq!(config.ants, 10);
/// assert_eq!(config.beta, 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AcoConfig {
    /// Ants per iteration.
    pub ants: usize,
    /// Colony iterations.
    pub iterations: usize,
    /// Pheromone exponent.
    pub alpha: f64,
    /// Heuristic (inverse cost) exponent.
    pub beta: f64,
    /// Evaporation rate in `[0, 1]`.
    pub rho: f64,
    /// Pheromone on every edge before the first iteration.
    pub initial_pheromone: f64,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            ants: 20,
            iterations: 50,
            alpha: 1.0,
            beta: 2.0,
            rho: 0.5,
            initial_pheromone: 1.0,
        }
    }
}

impl AcoConfig {
    /// Sets the number of ants per iteration.
    pub fn with_ants(mut self, n: usize) -> Self {
        self.ants = n;
        self
    }

    /// Sets the number of iterations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the pheromone exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the heuristic exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate, clamped to `[0, 1]`.
    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho.clamp(0.0, 1.0);
        self
    }
}

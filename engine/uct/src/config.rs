//! Search configuration parameters.

/// Configuration for a UCT search.
#[derive(Debug, Clone)]
pub struct UctConfig {
    /// Number of select/simulate/backpropagate iterations per search.
    pub iterations: u32,

    /// Exploration constant in the UCB1 formula. Higher values favour
    /// exploration of rarely visited children, `0.0` degenerates to pure
    /// exploitation (best mean reward).
    pub exploration: f32,

    /// Standard deviation of the Gaussian perturbation added to every
    /// finite UCB1 score before comparison. Breaks near-ties between
    /// converged children pseudo-randomly instead of by insertion order,
    /// which keeps repeated self-play games from collapsing onto a single
    /// line of play. `0.0` disables the noise entirely.
    pub tie_break_noise_std: f32,
}

impl Default for UctConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration: std::f32::consts::FRAC_1_SQRT_2,
            tie_break_noise_std: 0.01,
        }
    }
}

impl UctConfig {
    /// Create a fast, noise-free config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 100,
            exploration: std::f32::consts::FRAC_1_SQRT_2,
            tie_break_noise_std: 0.0,
        }
    }

    /// Builder pattern: set the iteration budget.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f32) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the tie-break noise standard deviation.
    pub fn with_tie_break_noise(mut self, std: f32) -> Self {
        self.tie_break_noise_std = std;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = UctConfig::default();
        assert_eq!(config.iterations, 1000);
        assert!((config.exploration - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
        assert!((config.tie_break_noise_std - 0.01).abs() < 1e-6);
    }

    #[test]
    fn builder_pattern() {
        let config = UctConfig::default()
            .with_iterations(50)
            .with_exploration(0.0)
            .with_tie_break_noise(0.0);

        assert_eq!(config.iterations, 50);
        assert_eq!(config.exploration, 0.0);
        assert_eq!(config.tie_break_noise_std, 0.0);
    }

    #[test]
    fn testing_config_is_noise_free() {
        let config = UctConfig::for_testing();
        assert_eq!(config.tie_break_noise_std, 0.0);
    }
}

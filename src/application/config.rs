use crate::error::{LifeError, Result};

/// Slowest and fastest stepping rates accepted by the scheduler
pub const MIN_STEPS_PER_SECOND: f32 = 1.0;
pub const MAX_STEPS_PER_SECOND: f32 = 60.0;

/// Settings for the transition orchestrator
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrchestratorConfig {
    /// Seconds a shrink or grow phase may wait for completion signals before
    /// the transition is fast-forwarded. `None` waits indefinitely.
    pub join_timeout: Option<f32>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            join_timeout: Some(5.0),
        }
    }
}

/// Everything needed to build or reset a [`Simulation`](super::Simulation)
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Side length of the square torus
    pub size: usize,
    /// Probability that a cell starts alive
    pub density: f64,
    /// Fixed seed for reproducible boards; `None` draws from the thread RNG
    pub seed: Option<u64>,
    pub steps_per_second: f32,
    pub orchestrator: OrchestratorConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            size: 32,
            density: 0.25,
            seed: None,
            steps_per_second: 2.0,
            orchestrator: OrchestratorConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_steps_per_second(mut self, steps: f32) -> Self {
        self.steps_per_second = steps;
        self
    }

    pub fn with_join_timeout(mut self, timeout: Option<f32>) -> Self {
        self.orchestrator.join_timeout = timeout;
        self
    }

    /// Check every field; the first problem found is reported
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(LifeError::invalid_config("grid size must be positive"));
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(LifeError::invalid_config(format!(
                "density must be within [0, 1], got {}",
                self.density
            )));
        }
        if !(MIN_STEPS_PER_SECOND..=MAX_STEPS_PER_SECOND).contains(&self.steps_per_second) {
            return Err(LifeError::invalid_config(format!(
                "steps per second must be within [{MIN_STEPS_PER_SECOND}, {MAX_STEPS_PER_SECOND}], got {}",
                self.steps_per_second
            )));
        }
        if let Some(timeout) = self.orchestrator.join_timeout {
            if timeout.is_nan() || timeout <= 0.0 {
                return Err(LifeError::invalid_config(format!(
                    "join timeout must be positive, got {timeout}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = SimulationConfig::default()
            .with_size(8)
            .with_density(0.5)
            .with_seed(11)
            .with_steps_per_second(10.0)
            .with_join_timeout(None);
        assert_eq!(config.size, 8);
        assert_eq!(config.density, 0.5);
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.steps_per_second, 10.0);
        assert_eq!(config.orchestrator.join_timeout, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_each_bad_field() {
        let base = SimulationConfig::default();
        assert!(base.clone().with_size(0).validate().is_err());
        assert!(base.clone().with_density(1.01).validate().is_err());
        assert!(base.clone().with_density(f64::NAN).validate().is_err());
        assert!(base.clone().with_steps_per_second(0.0).validate().is_err());
        assert!(base.clone().with_join_timeout(Some(0.0)).validate().is_err());
        assert!(base.with_join_timeout(Some(f32::NAN)).validate().is_err());
    }
}

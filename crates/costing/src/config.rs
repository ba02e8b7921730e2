//! Engine configuration (environment-driven).

use periodcost_core::DEFAULT_COST_SCALE;

/// Environment variable overriding [`CostingConfig::cost_scale`].
pub const COST_SCALE_VAR: &str = "PERIODCOST_COST_SCALE";

/// Largest scale a `Decimal` can carry.
const MAX_COST_SCALE: u32 = 28;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CostingConfig {
    /// Decimal places kept on unit costs and settled costs.
    pub cost_scale: u32,
}

impl Default for CostingConfig {
    fn default() -> Self {
        Self {
            cost_scale: DEFAULT_COST_SCALE,
        }
    }
}

impl CostingConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(COST_SCALE_VAR) {
            match raw.trim().parse::<u32>() {
                Ok(scale) if scale <= MAX_COST_SCALE => config.cost_scale = scale,
                _ => tracing::warn!(
                    var = COST_SCALE_VAR,
                    value = %raw,
                    default = DEFAULT_COST_SCALE,
                    "invalid cost scale; using default"
                ),
            }
        }
        config
    }
}

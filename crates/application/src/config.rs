use officeline_core::{AppError, AppResult};
use officeline_domain::OverstockRatio;

/// Default number of join codes tried before giving up.
pub const DEFAULT_JOIN_CODE_MAX_ATTEMPTS: u8 = 10;

/// Tunables shared by the application services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Join codes generated per office creation before failing.
    pub join_code_max_attempts: u8,
    /// Overstock threshold used when classifying inventory.
    pub overstock_ratio: OverstockRatio,
}

impl CoordinatorConfig {
    /// Creates a validated configuration.
    pub fn new(join_code_max_attempts: u8, overstock_ratio_percent: u8) -> AppResult<Self> {
        if join_code_max_attempts == 0 {
            return Err(AppError::Validation(
                "join code attempts must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            join_code_max_attempts,
            overstock_ratio: OverstockRatio::new(overstock_ratio_percent)?,
        })
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            join_code_max_attempts: DEFAULT_JOIN_CODE_MAX_ATTEMPTS,
            overstock_ratio: OverstockRatio::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CoordinatorConfig;

    #[test]
    fn zero_attempts_are_rejected() {
        assert!(CoordinatorConfig::new(0, 90).is_err());
    }

    #[test]
    fn ratio_is_validated() {
        assert!(CoordinatorConfig::new(10, 0).is_err());
        assert_eq!(
            CoordinatorConfig::new(10, 90).ok(),
            Some(CoordinatorConfig::default())
        );
    }
}

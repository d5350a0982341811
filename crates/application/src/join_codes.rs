use officeline_core::{AppError, AppResult};
use officeline_domain::JoinCode;

// Each byte is rejected with probability 4/256, so sixteen bytes almost
// always hold six usable values.
const RANDOM_BUFFER_LEN: usize = 16;
const RANDOM_DRAWS: usize = 4;

/// Source of candidate join codes. Uniqueness is checked by the caller.
pub trait JoinCodeGenerator: Send + Sync {
    /// Draws one candidate code.
    fn generate(&self) -> AppResult<JoinCode>;
}

/// Generator drawing uniformly from the join-code alphabet using OS randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomJoinCodeGenerator;

impl RandomJoinCodeGenerator {
    /// Creates a new generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl JoinCodeGenerator for RandomJoinCodeGenerator {
    fn generate(&self) -> AppResult<JoinCode> {
        let mut bytes = [0_u8; RANDOM_BUFFER_LEN];
        for _ in 0..RANDOM_DRAWS {
            getrandom::fill(&mut bytes).map_err(|error| {
                AppError::Internal(format!("failed to read random bytes for join code: {error}"))
            })?;

            if let Some(code) = JoinCode::from_random_bytes(&bytes) {
                return Ok(code);
            }
        }

        Err(AppError::Internal(
            "random source did not yield enough usable bytes for a join code".to_owned(),
        ))
    }
}

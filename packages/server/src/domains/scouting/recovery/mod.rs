//! Turning unreliable agent output into a validated [`EventRecord`].
//!
//! An ordered chain of [`CandidateStrategy`] objects each gets one look at the
//! raw output. The first candidate found is validated; later strategies are
//! fallbacks, never retries.

pub mod json_scan;
pub mod strategies;
pub mod validation;

pub use strategies::{CandidateStrategy, LastJsonBlockInText, LatestToolResult, NativeObject};
pub use validation::{validate_event, FieldViolation};

use thiserror::Error;
use tracing::{debug, warn};

use crate::domains::scouting::models::{EventRecord, RawAgentOutput};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecoveryError {
    #[error("Agent failed to provide a valid JSON object")]
    ExtractionFailed { raw: Box<RawAgentOutput> },

    #[error("Schema validation failed: {} violation(s)", violations.len())]
    SchemaValidationFailed { violations: Vec<FieldViolation> },
}

pub struct Recoverer {
    strategies: Vec<Box<dyn CandidateStrategy>>,
}

impl Recoverer {
    /// Text first, then the latest tool output, then the native object.
    pub fn standard() -> Self {
        Self::with_strategies(vec![
            Box::new(LastJsonBlockInText),
            Box::new(LatestToolResult),
            Box::new(NativeObject),
        ])
    }

    pub fn with_strategies(strategies: Vec<Box<dyn CandidateStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Pure: the same output always yields the same record or the same error.
    pub fn recover(&self, output: &RawAgentOutput) -> Result<EventRecord, RecoveryError> {
        let found = self.strategies.iter().find_map(|strategy| {
            let candidate = strategy.extract(output);
            debug!(
                strategy = strategy.name(),
                found = candidate.is_some(),
                "Recovery strategy tried"
            );
            candidate.map(|c| (strategy.name(), c))
        });

        let Some((strategy, candidate)) = found else {
            return Err(RecoveryError::ExtractionFailed {
                raw: Box::new(output.clone()),
            });
        };

        validate_event(&candidate).map_err(|violations| {
            warn!(strategy, violations = violations.len(), "Candidate failed schema validation");
            RecoveryError::SchemaValidationFailed { violations }
        })
    }
}

impl Default for Recoverer {
    fn default() -> Self {
        Self::standard()
    }
}

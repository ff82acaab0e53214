use gateway_client::GatewayError;
use thiserror::Error;

use super::recovery::RecoveryError;
use crate::kernel::HandoffError;

/// Anything that ends a scouting request early.
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Agent run failed: {0}")]
    Agent(#[from] GatewayError),

    #[error(transparent)]
    Recovery(#[from] RecoveryError),

    #[error(transparent)]
    Handoff(#[from] HandoffError),
}

pub mod actions;
pub mod error;
pub mod models;
pub mod prompts;
pub mod recovery;

pub use actions::{extract_event, parse_target_url, scout_url};
pub use error::ScoutError;
pub use models::*;
pub use recovery::{FieldViolation, Recoverer, RecoveryError};

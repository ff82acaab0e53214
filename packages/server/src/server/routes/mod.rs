// HTTP routes
pub mod health;
pub mod scout;

pub use health::*;
pub use scout::*;

pub mod scout;

pub use scout::*;

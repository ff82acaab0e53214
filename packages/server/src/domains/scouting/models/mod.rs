pub mod agent_output;
pub mod event_record;
pub mod scrape_result;

pub use agent_output::*;
pub use event_record::*;
pub use scrape_result::*;

//! Git repository probing, status parsing, and process execution

pub mod backend;
pub mod record;
pub mod status;

// Re-export commonly used items
pub use backend::*;
pub use record::*;
pub use status::*;

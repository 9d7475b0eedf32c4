

pub mod category;
pub mod config;
pub mod error;

pub use category::Category;
pub use config::MatcherConfig;
pub use error::{ConvoReadyError, Result};

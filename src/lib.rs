pub mod config;
pub mod engine;
pub mod error;
pub mod explicit;
pub mod implicit;
pub mod ordering;
pub mod play;
pub mod response;
pub mod schedule;
pub mod verdict;

mod cli;

pub use cli::run;
pub use config::WatchConfig;
pub use engine::StoppageEngine;
pub use error::WatchError;
pub use response::UnifiedResponse;
pub use verdict::{Confidence, StoppageVerdict};

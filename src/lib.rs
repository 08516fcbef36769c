pub mod api;
pub mod config;
pub mod extract;
pub mod reports;
pub mod types;
pub mod use_cases;
pub mod utils;

pub use config::{Config, OutputFormat};
pub use types::*;
pub use use_cases::{DrawUseCase, run};

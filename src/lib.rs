pub mod aws;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cache::DefaultsCache;
pub use config::cli::{Cli, Commands};
pub use domain::model::{DeployRequest, OnFailure};
pub use utils::error::{CftError, Result};

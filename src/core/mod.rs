pub mod attach;
pub mod build;
pub mod credentials;
pub mod deploy;
pub mod describe;
pub mod destroy;
pub mod list;
pub mod lock;
pub mod pipelines;
pub mod watch;

pub use crate::domain::model::{DeployRequest, OnFailure};
pub use crate::domain::ports::{BuildOps, PipelineOps, StackOps, TokenOps};
pub use crate::utils::error::Result;

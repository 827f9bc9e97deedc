pub mod config;
pub mod error;
pub mod invocation;
pub mod io;
pub mod modification;
pub mod vars;

#[cfg(feature = "cli")]
pub mod logging;

// 重新导出主要结构
pub use config::{Config, GITHUB_ENV_VAR};
pub use error::{EnvError, InvocationError};
pub use invocation::{execute, Outcome};
pub use modification::Modification;
pub use vars::{Diff, DiffLine, Snapshot, Vars};

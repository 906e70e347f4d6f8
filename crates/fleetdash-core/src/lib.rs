pub mod config;
pub mod error;
pub mod logging;
pub mod storage;

pub use config::{CoreConfig, LoggingConfig, StorageConfig, StorageMode, DEFAULT_PERMISSIONS_KEY};
pub use error::{format_error_chain, log_error, CoreError, CoreResult};
pub use storage::{DurableStorage, FileStorage, MemoryStorage};

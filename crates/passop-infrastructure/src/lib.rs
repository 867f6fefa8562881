pub mod config_service;
pub mod file_backend;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::file_backend::FileBackend;
pub use crate::paths::PassopPaths;

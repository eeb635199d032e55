//! CLI command implementations

pub mod import;
pub mod init;
pub mod update_views;
pub mod validate;

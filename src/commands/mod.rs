pub mod common;
pub mod generate;
pub mod init;
pub mod summary;

pub mod edit;
pub mod export;
pub mod history;
pub mod import;
pub mod init;
pub mod log;
pub mod norm;
pub mod show;
pub mod summary;
pub mod worker;

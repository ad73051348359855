pub mod activity;
pub mod file;
pub mod user;

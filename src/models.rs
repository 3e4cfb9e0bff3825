pub mod config;
pub mod dashboard;
pub mod lead;
pub mod options;
pub mod user;

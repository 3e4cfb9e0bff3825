pub mod config;
pub mod dashboard;
pub mod health;
pub mod leads;
pub mod options;
pub mod users;

pub mod lead_service;
pub use lead_service::LeadService;
pub mod options_service;
pub use options_service::OptionsService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;

pub mod sheets;
pub use sheets::SheetsBackend;
pub mod google_sheets;
pub use google_sheets::GoogleSheetsClient;
pub mod memory_sheet;
pub use memory_sheet::MemorySheet;
pub mod lead_repo;
pub use lead_repo::LeadRepository;
pub mod user_repo;
pub use user_repo::UserRepository;

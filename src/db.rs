pub mod report_repo;
pub use report_repo::{PgReportRepository, ReportRepository};
pub mod admin_repo;
pub use admin_repo::AdminRepository;

#[cfg(test)]
pub mod memory_repo;
#[cfg(test)]
pub use memory_repo::InMemoryReportRepository;

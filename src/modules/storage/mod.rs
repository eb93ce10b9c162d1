#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod report_store;

#[cfg(test)]
pub use memory::InMemoryReportStore;
pub use postgres::PgReportStore;
pub use report_store::ReportStore;

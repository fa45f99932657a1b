pub mod sync_report;
pub mod sync_routine;

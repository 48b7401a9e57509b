pub mod report;
pub mod run_dispatch;

pub use report::{DispatchReport, DispatchSummary, JobReport};
pub use run_dispatch::RunDispatchUseCase;

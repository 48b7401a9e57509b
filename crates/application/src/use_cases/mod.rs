pub mod dispatch;

// Re-export use cases
pub use dispatch::{DispatchReport, DispatchSummary, JobReport, RunDispatchUseCase};

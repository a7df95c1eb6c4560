pub mod generator;
pub mod request;

pub use generator::{GeneratedReport, GenerationHandle, PreparedReport, ReportGenerator};
pub use request::ReportRequest;

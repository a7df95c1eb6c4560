pub mod assembler;
pub mod filter;
pub mod naming;
pub mod renderer;
pub mod scope;
pub mod severity;
pub mod validator;

pub use assembler::assemble_report;
pub use filter::filter_alert_tree;
pub use naming::{report_base_name, report_base_name_at, report_file_name};
pub use renderer::{JsonPayloadRenderer, ReportRenderer};
pub use scope::{resolve_contexts, resolve_sites, SiteScope};
pub use severity::SeverityFilter;
pub use validator::validate_report_target;

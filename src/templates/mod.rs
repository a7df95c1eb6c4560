pub mod registry;

pub use registry::{Template, TemplateRegistry, REPORT_DATA_JSON};

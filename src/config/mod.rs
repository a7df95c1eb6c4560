pub mod parser;
pub mod schema;
pub mod types;
pub mod security;
pub mod store;

pub use types::*;
pub use parser::{parse_settings, parse_settings_str};
pub use store::SettingsStore;

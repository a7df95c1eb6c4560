pub mod provider;
pub mod snapshot;

pub use provider::{AlertStore, SessionProvider};
pub use snapshot::SessionSnapshot;

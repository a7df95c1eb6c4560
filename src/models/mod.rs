pub mod alert;
pub mod criteria;
pub mod report;
pub mod site;

pub use alert::*;
pub use criteria::*;
pub use report::*;
pub use site::*;

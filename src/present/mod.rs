pub mod formatter;
pub mod messages;

pub use formatter::*;
pub use messages::*;

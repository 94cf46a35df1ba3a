pub mod builder;
pub mod models;
pub mod validation;

pub use builder::*;
pub use models::*;
pub use validation::*;

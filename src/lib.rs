pub mod config;
pub mod error;
pub mod fuel;
pub mod present;
pub mod vehicle;
pub mod wizard;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use error::{CalcError, Result};

#[cfg(not(target_arch = "wasm32"))]
pub mod console;
pub mod state;


pub use state::*;

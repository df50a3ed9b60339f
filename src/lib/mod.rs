pub mod constants;
pub mod models;
pub mod modules;
pub mod version;

#[cfg(feature = "python-bindings")]
mod python;

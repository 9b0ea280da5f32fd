/// Tracing subscriber setup.
pub mod logging;
/// TOML configuration (`research.toml`).
pub mod toml_config;

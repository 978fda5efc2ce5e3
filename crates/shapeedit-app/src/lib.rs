//! shapeedit Application
//!
//! Command shell and headless surface around the shapeedit editor core.

mod config;
mod shell;
mod surface;

pub use config::{AppConfig, ConfigError, CONFIG_ENV};
pub use shell::{run, Command, CommandError, Shell};
pub use surface::{HeadlessSurface, VisualRecord};

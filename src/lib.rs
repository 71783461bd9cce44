pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, script_config::ScriptConfig};
pub use crate::core::{
    engine::{RunReport, SalesEngine},
    export::OutputFormat,
    grid::SalesGrid,
    input::ReaderAmountSource,
};
pub use utils::error::{Result, SalesError};

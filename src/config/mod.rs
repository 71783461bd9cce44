pub mod cli;
pub mod script_config;

#[cfg(feature = "cli")]
use crate::core::export::OutputFormat;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "sales-grid")]
#[command(about = "Record, clear and display monthly sales per department")]
pub struct CliConfig {
    /// TOML script to run instead of the built-in demo
    #[arg(short, long)]
    pub config: Option<String>,

    /// Read amounts from this file instead of standard input
    #[arg(short, long)]
    pub input: Option<String>,

    /// Format of the final grid printed to standard output
    #[arg(long, value_parser = parse_format)]
    pub format: Option<OutputFormat>,

    /// Also write the grid in these formats to --output-path
    #[arg(long, value_delimiter = ',', value_parser = parse_format)]
    pub export: Vec<OutputFormat>,

    /// Directory for exported files (defaults to the script's, then ./output)
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
fn parse_format(value: &str) -> std::result::Result<OutputFormat, String> {
    value.parse().map_err(|e: crate::utils::error::SalesError| e.to_string())
}

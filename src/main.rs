use anyhow::Context;
use clap::Parser;
use sales_grid::core::export::{export_all, render_as};
use sales_grid::domain::ports::AmountSource;
use sales_grid::utils::{logger, validation::Validate};
use sales_grid::{
    CliConfig, LocalStorage, OutputFormat, ReaderAmountSource, SalesEngine, SalesError,
    ScriptConfig,
};
use std::io::{BufReader, Write};

const DEFAULT_OUTPUT_PATH: &str = "./output";

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting sales-grid");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        let exit_code = match e.downcast_ref::<SalesError>() {
            Some(err) => {
                tracing::error!(
                    "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                    err,
                    err.category(),
                    err.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", err.recovery_suggestion());
                eprintln!("❌ {}", err.user_friendly_message());
                eprintln!("💡 {}", err.recovery_suggestion());

                // 根據錯誤嚴重程度決定退出碼
                err.exit_code()
            }
            None => {
                tracing::error!("❌ Run failed: {:#}", e);
                eprintln!("❌ {:#}", e);
                1
            }
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run(config: &CliConfig) -> anyhow::Result<()> {
    let script = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading script from: {}", path);
            ScriptConfig::from_file(path)?
        }
        None => ScriptConfig::default(),
    };

    // 驗證腳本
    script.validate()?;
    tracing::info!(
        "✅ Script '{}' ready, {} amounts expected on input",
        script.script.name,
        script.amounts_needed()
    );

    match &config.input {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("failed to open input file '{}'", path))?;
            let mut source = ReaderAmountSource::new(BufReader::new(file));
            execute(config, &script, &mut source)
        }
        None => execute(config, &script, &mut ReaderAmountSource::stdin()),
    }
}

fn execute<A: AmountSource>(
    config: &CliConfig,
    script: &ScriptConfig,
    source: &mut A,
) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut engine = SalesEngine::new(stdout.lock());
    engine.run(script, source)?;
    let (grid, mut out) = engine.into_parts();

    let format = config
        .format
        .or_else(|| script.format())
        .unwrap_or(OutputFormat::Table);
    let rendered = render_as(&grid, format)?;
    if rendered.ends_with('\n') {
        write!(out, "{}", rendered)?;
    } else {
        writeln!(out, "{}", rendered)?;
    }
    out.flush()?;

    let formats = if config.export.is_empty() {
        script.export_formats()
    } else {
        config.export.as_slice()
    };

    if !formats.is_empty() {
        let output_path = config
            .output_path
            .as_deref()
            .or_else(|| script.output_path())
            .unwrap_or(DEFAULT_OUTPUT_PATH);
        let storage = LocalStorage::new(output_path.to_string());
        let written = export_all(&grid, formats, &storage)?;
        tracing::info!("📁 Exported {} to {}", written.join(", "), output_path);
    }

    Ok(())
}

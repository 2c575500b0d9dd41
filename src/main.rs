use brrtmatch::otel::{init_logging_with_config, LogConfig};

fn main() -> anyhow::Result<()> {
    init_logging_with_config(&LogConfig::from_env())?;
    brrtmatch::cli::run_cli()
}

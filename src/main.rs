use alertscope::{cli, config, errors};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let result = match cli.command {
        cli::Commands::Generate(args) => cli::generate::handle_generate(args, cli.quiet).await,
        cli::Commands::Templates(args) => cli::templates::handle_templates(args).await,
        cli::Commands::Validate(args) => handle_validate(args).await,
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("  ({})", e.diagnostic());
            std::process::exit(e.exit_code());
        }
    }
}

async fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), errors::ReportError> {
    let path = std::path::PathBuf::from(&args.settings);
    let _settings = config::parse_settings(&path).await?;
    println!("Settings are valid: {}", args.settings);
    Ok(())
}

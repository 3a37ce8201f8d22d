use anyhow::Context;
use clap::Parser;
use fiducial_eval::{app::App, settings::{Config, ConfigData}, DashboardBuilder};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "fiducial-eval")]
#[command(about = "Terminal dashboard for fiducial tracking evaluation runs")]
struct Cli {
    #[arg(required = true, help = "Run directories containing logger CSV files")]
    data_dirs: Vec<PathBuf>,

    #[arg(short, long, help = "Configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "ekf-cal parameter YAML to read sensor rates from")]
    ekf_config: Option<PathBuf>,

    #[arg(long, help = "Write the dashboard as JSON to this path")]
    export: Option<PathBuf>,

    #[arg(long, help = "Do not start the terminal UI")]
    no_tui: bool,

    #[arg(short, long, help = "Enable debug logging")]
    debug: bool,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    if let Some(path) = &cli.ekf_config {
        config.sensors = ConfigData::from_ekf_yaml(path)?;
    }

    let dashboard = DashboardBuilder::from_config(&config)
        .build(&cli.data_dirs)
        .context("Failed to build dashboard")?;

    if let Some(path) = &cli.export {
        dashboard
            .export_json(path)
            .with_context(|| format!("Failed to export dashboard to {}", path.display()))?;
    }

    if cli.no_tui {
        for title in dashboard.titles() {
            println!("{}", title);
        }
        return Ok(());
    }

    let name = cli
        .data_dirs
        .first()
        .and_then(|dir| dir.file_name())
        .map(|name| format!("{}-plots", name.to_string_lossy()))
        .unwrap_or_else(|| "plots".to_string());

    let mut app = App::new(dashboard, name, &config.ui);
    app.run()
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::init();
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

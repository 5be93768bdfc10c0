//! HRBoard - HR Attrition Dashboard Generator
//!
//! A CLI tool that fetches a tabular HR dataset, cleans it, computes
//! attrition views, and renders them as a single-page Plotly dashboard.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (download, parse, or write failure)

mod analysis;
mod cli;
mod config;
mod data;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use data::{CleanedTable, LoadOptions};
use models::RunMetadata;
use report::charts::ChartStyle;
use report::Dashboard;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("HRBoard v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the pipeline
    match run_dashboard(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Dashboard generation failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .hrboard.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".hrboard.toml");

    if path.exists() {
        eprintln!("⚠️  .hrboard.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .hrboard.toml")?;

    println!("✅ Created .hrboard.toml with default settings.");
    println!("   Edit it to customize the dataset URL, cache, and output.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete pipeline: load, clean, aggregate, present.
async fn run_dashboard(args: Args) -> Result<()> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Step 1: Load the dataset
    println!("📥 Loading dataset...");
    let options = LoadOptions {
        local_file: args.input.clone(),
        cache_file: config.source.cache_file.as_ref().map(PathBuf::from),
        show_progress: !args.quiet,
    };
    let (raw, source) = data::fetch_dataset(&config.source.url, &options)
        .await
        .context("Failed to load the dataset")?;
    let rows_loaded = raw.rows.len();
    info!("Loaded {} rows from {}", rows_loaded, source);

    // Step 2: Clean (rename columns, drop exact duplicates) and type
    let table = data::clean_table(raw);
    if table.duplicates_removed > 0 {
        info!("Removed {} duplicate rows", table.duplicates_removed);
    }
    let records = data::into_records(&table).context("Failed to parse the cleaned table")?;
    if records.is_empty() {
        warn!("Cleaned table is empty; the dashboard will have empty charts");
    }

    // Handle --dry-run: print a table summary and exit
    if args.dry_run {
        return handle_dry_run(&table, rows_loaded);
    }

    // Step 3: Compute the derived views
    println!("📊 Computing derived views...");
    let dashboard_data = analysis::build_dashboard_data(&records);

    let metadata = RunMetadata {
        source: source.to_string(),
        generated_at: Utc::now(),
        rows_loaded,
        duplicates_removed: table.duplicates_removed,
        rows_analyzed: records.len(),
        duration_seconds: start_time.elapsed().as_secs_f64(),
    };

    let dashboard = Dashboard {
        metadata,
        data: dashboard_data,
    };

    // Step 4: Render and save the dashboard
    println!("📝 Rendering dashboard...");
    let style = ChartStyle {
        width: config.report.width,
        height: config.report.height,
        opacity: config.report.opacity,
    };

    let output_path = PathBuf::from(&config.report.output);
    let output = match args.format {
        OutputFormat::Html => report::generate_html_dashboard(&dashboard, style),
        OutputFormat::Json => report::generate_json_export(&dashboard)?,
    };
    report::generator::write_output(&output_path, &output)?;

    // Print summary
    println!("\n📈 Dashboard Summary:");
    println!("   Rows loaded: {}", dashboard.metadata.rows_loaded);
    println!(
        "   Duplicates removed: {}",
        dashboard.metadata.duplicates_removed
    );
    println!("   Rows analyzed: {}", dashboard.metadata.rows_analyzed);
    println!(
        "   Employees: {} ({} left, {} stayed)",
        dashboard.data.attrition_counts.total(),
        dashboard.data.attrition_counts.left,
        dashboard.data.attrition_counts.stayed
    );
    println!("   Duration: {:.1}s", dashboard.metadata.duration_seconds);
    println!(
        "\n✅ Dashboard saved to: {}",
        output_path.display()
    );

    Ok(())
}

/// Handle --dry-run: print what was loaded and cleaned, no rendering.
fn handle_dry_run(table: &CleanedTable, rows_loaded: usize) -> Result<()> {
    println!("\n🔍 Dry run: dataset loaded and cleaned (no charts rendered)\n");

    println!("   Columns ({}):", table.headers.len());
    for name in table.headers.iter() {
        println!("     • {}", name);
    }
    println!("\n   Rows loaded: {}", rows_loaded);
    println!("   Duplicates removed: {}", table.duplicates_removed);
    println!("   Rows kept: {}", table.rows.len());

    println!("\n✅ Dry run complete. No output file was written.");
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .hrboard.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

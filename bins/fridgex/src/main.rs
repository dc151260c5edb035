//! Fridge Settings API binary
//!
//! Entry point for serving the settings API. It provides commands for
//! initializing, validating, and starting the server.

use anyhow::{Context, Result};
use axum::Router;
use cli::{Cli, Commands, LogFormatArg};
use config::{
    generate_default_config, load_config, load_config_or_default, save_config, validate_config,
    AppConfig, CorsConfig, ValidationReport,
};
use observability::{init_logging, init_metrics, ApiMetrics, LogFormat};
use server::{
    health_routes, validate_ports_available, with_standard_layers, CorsPolicy, HealthState,
    HttpServer, ServerConfig, ServerExt,
};
use settings::api::{settings_routes, SettingsApiState};
use settings::{SettingsSource, StaticSettings};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Start { config, host, port } => {
            start_api(config, host, port, cli.log_format).await
        }
        Commands::Validate { config } => {
            init_logging("fridgex", resolve_log_format(cli.log_format, None))?;
            info!("Executing 'validate' command");
            validate_command(config)
        }
        Commands::Init { output } => {
            init_logging("fridgex", resolve_log_format(cli.log_format, None))?;
            info!("Executing 'init' command");
            init_command(output)
        }
    }
}

/// The command-line flag wins over the config file; unknown values fall back to pretty
fn resolve_log_format(flag: Option<LogFormatArg>, configured: Option<&str>) -> LogFormat {
    flag.map(|f| f.as_str())
        .or(configured)
        .and_then(LogFormat::parse)
        .unwrap_or_default()
}

fn apply_overrides(config: &mut AppConfig, host: Option<String>, port: Option<u16>) {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
}

fn cors_policy(cors: &CorsConfig) -> CorsPolicy {
    if !cors.enabled {
        return CorsPolicy::disabled();
    }
    CorsPolicy {
        enabled: true,
        allowed_origins: cors.allowed_origins.clone(),
        allow_credentials: cors.allow_credentials,
    }
}

/// Assemble the full application router: settings API, health, standard layers
fn build_app(config: &AppConfig) -> Result<Router> {
    let source = Arc::new(StaticSettings::sample());
    info!(source = source.name(), records = source.len(), "Loaded settings dataset");

    let state = SettingsApiState::from_config(source, &config.api)
        .context("Invalid api.time_zone")?;
    info!(time_zone = %state.time_zone, "Rendering timestamps");

    let health = Arc::new(HealthState::new(config.service.name.clone()));
    let router = settings_routes(Arc::new(state)).merge(health_routes(health));

    Ok(with_standard_layers(
        router,
        &cors_policy(&config.api.cors),
        ApiMetrics::new(config.service.name.clone()),
    ))
}

fn log_report(report: &ValidationReport) {
    for warning in &report.warnings {
        warn!(field = %warning.field, message = %warning.message, "Configuration warning");
    }
    for default in &report.defaults_applied {
        debug!(field = %default.field, value = %default.value, "Using default");
    }
}

async fn start_api(
    config_path: PathBuf,
    host: Option<String>,
    port: Option<u16>,
    log_format: Option<LogFormatArg>,
) -> Result<()> {
    let mut config = load_config_or_default(&config_path)?;
    apply_overrides(&mut config, host, port);

    init_logging(
        &config.service.name,
        resolve_log_format(log_format, Some(&config.logging.format)),
    )?;
    info!(path = ?config_path, service = %config.service.name, "Fridge Settings API starting");

    let report = validate_config(&config);
    log_report(&report);

    if !report.is_valid() {
        error!(
            error_count = report.errors.len(),
            "Configuration validation failed"
        );
        for err in &report.errors {
            error!("{}", err);
        }
        anyhow::bail!("Cannot start server due to configuration errors");
    }

    let server_config = ServerConfig::new(config.server.host.clone(), config.server.port)
        .with_shutdown_timeout(Duration::from_secs(config.server.shutdown_timeout_seconds));

    let extra_ports: Vec<(&str, u16)> = if config.monitoring.metrics_enabled {
        vec![("metrics", config.monitoring.metrics_port)]
    } else {
        Vec::new()
    };
    validate_ports_available(&server_config, &extra_ports).await?;

    if config.monitoring.metrics_enabled {
        init_metrics(&config.server.host, config.monitoring.metrics_port)
            .context("Failed to start metrics exporter")?;
    }

    let app = build_app(&config)?;

    info!(
        host = %server_config.host,
        port = server_config.http_port,
        "Starting HTTP server"
    );

    HttpServer::new(server_config, app).run_with_ctrl_c().await?;

    info!("Fridge Settings API stopped");
    Ok(())
}

fn validate_command<P: AsRef<Path>>(config_path: P) -> Result<()> {
    info!(path = ?config_path.as_ref(), "Validating configuration");

    let config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!(%e, "Failed to load configuration");
            anyhow::bail!(e);
        }
    };

    let report = validate_config(&config);

    println!("\n=== Configuration Validation Report ===\n");

    if !report.defaults_applied.is_empty() {
        println!("Defaults Applied ({}):", report.defaults_applied.len());
        for default in &report.defaults_applied {
            println!("  [info] {} = {}", default.field, default.value);
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] [{}] {}", warning.field, warning.message);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        println!();
        anyhow::bail!("Configuration validation failed");
    }

    println!("[ok] Configuration is valid!");
    println!();
    println!("Service: {}", config.service.name);
    println!("Listen: {}:{}", config.server.host, config.server.port);
    println!("Time zone: {}", config.api.time_zone);
    if !config.api.cors.enabled {
        println!("CORS: disabled");
    } else if config.api.cors.allowed_origins.is_empty() {
        println!("CORS: any origin");
    } else {
        println!("CORS: {}", config.api.cors.allowed_origins.join(", "));
    }
    if config.monitoring.metrics_enabled {
        println!("Metrics: port {}", config.monitoring.metrics_port);
    } else {
        println!("Metrics: disabled");
    }

    Ok(())
}

fn init_command<P: AsRef<Path>>(output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!(?output_path, "Initializing new configuration file");

    let config = generate_default_config();

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }

    save_config(&config, output_path)?;

    println!("[ok] Configuration file created successfully!");
    println!();
    println!("Location: {:?}", output_path);
    println!();
    println!("Next steps:");
    println!("  1. Edit the configuration file (time zone, CORS origins, ports)");
    println!(
        "  2. Run 'fridgex validate --config {:?}' to check configuration",
        output_path
    );
    println!(
        "  3. Run 'fridgex start --config {:?}' to start the API",
        output_path
    );

    Ok(())
}

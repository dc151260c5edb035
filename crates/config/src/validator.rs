use crate::*;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Service name is required")]
    MissingServiceName,

    #[error("Server host is required")]
    MissingHost,

    #[error("{field} must be a non-zero port")]
    InvalidPort { field: String },

    #[error("monitoring.metrics_port {port} collides with server.port")]
    PortCollision { port: u16 },

    #[error("Invalid time zone '{0}'. Must be UTC, local, or an offset like +05:30")]
    InvalidTimeZone(String),

    #[error("Invalid log format: {0}. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("CORS origin '{0}' must start with http:// or https://")]
    InvalidCorsOrigin(String),

    #[error("Environment variable placeholder left unresolved in {field}: {value}")]
    UnresolvedEnvVar { field: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DefaultApplied {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub defaults_applied: Vec<DefaultApplied>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            defaults_applied: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_default(&mut self, field: &str, value: &str) {
        self.defaults_applied.push(DefaultApplied {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub fn validate_config(config: &AppConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_service(&config.service, &mut report);
    validate_server(&config.server, &mut report);
    validate_api(&config.api, &mut report);
    validate_logging(&config.logging, &mut report);
    validate_monitoring(&config.monitoring, config.server.port, &mut report);

    report
}

fn validate_service(service: &ServiceConfig, report: &mut ValidationReport) {
    if service.name.trim().is_empty() {
        report.add_error(ValidationError::MissingServiceName);
    }
}

fn validate_server(server: &HttpConfig, report: &mut ValidationReport) {
    if server.host.trim().is_empty() {
        report.add_error(ValidationError::MissingHost);
    } else if has_unresolved_env_vars(&server.host) {
        report.add_error(ValidationError::UnresolvedEnvVar {
            field: "server.host".to_string(),
            value: server.host.clone(),
        });
    }

    if server.port == 0 {
        report.add_error(ValidationError::InvalidPort {
            field: "server.port".to_string(),
        });
    }

    if server.host == default_host() {
        report.add_default("server.host", &server.host);
    }
    if server.port == default_http_port() {
        report.add_default("server.port", &server.port.to_string());
    }

    if server.shutdown_timeout_seconds == 0 {
        report.add_warning(
            "server.shutdown_timeout_seconds",
            "In-flight requests will be dropped immediately on shutdown",
        );
    }
}

fn validate_api(api: &ApiConfig, report: &mut ValidationReport) {
    if has_unresolved_env_vars(&api.time_zone) {
        report.add_error(ValidationError::UnresolvedEnvVar {
            field: "api.time_zone".to_string(),
            value: api.time_zone.clone(),
        });
    } else if !is_valid_time_zone(&api.time_zone) {
        report.add_error(ValidationError::InvalidTimeZone(api.time_zone.clone()));
    } else if api.time_zone.trim().eq_ignore_ascii_case("local") {
        report.add_warning(
            "api.time_zone",
            "Timestamps will follow the host time zone and may differ between deployments",
        );
    } else if api.time_zone == default_time_zone() {
        report.add_default("api.time_zone", &api.time_zone);
    }

    validate_cors(&api.cors, report);
}

fn validate_cors(cors: &CorsConfig, report: &mut ValidationReport) {
    if !cors.enabled {
        return;
    }

    for origin in &cors.allowed_origins {
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            report.add_error(ValidationError::InvalidCorsOrigin(origin.clone()));
        }
    }

    if cors.allowed_origins.is_empty() {
        let message = if cors.allow_credentials {
            "Any origin is mirrored back with credentials allowed; restrict allowed_origins outside internal deployments"
        } else {
            "Any origin is mirrored back; restrict allowed_origins outside internal deployments"
        };
        report.add_warning("api.cors.allowed_origins", message);
    }
}

fn validate_logging(logging: &LoggingConfig, report: &mut ValidationReport) {
    let valid_formats = ["pretty", "json", "compact"];
    if !valid_formats.contains(&logging.format.to_lowercase().as_str()) {
        report.add_error(ValidationError::InvalidLogFormat(logging.format.clone()));
    }
}

fn validate_monitoring(monitoring: &MonitoringConfig, server_port: u16, report: &mut ValidationReport) {
    if !monitoring.metrics_enabled {
        return;
    }

    if monitoring.metrics_port == 0 {
        report.add_error(ValidationError::InvalidPort {
            field: "monitoring.metrics_port".to_string(),
        });
    } else if monitoring.metrics_port == server_port {
        report.add_error(ValidationError::PortCollision {
            port: monitoring.metrics_port,
        });
    }
}

/// Shape check for `api.time_zone`: `UTC`, `Z`, `local` or `±HH:MM`.
///
/// Accepts exactly what `settings::TimeZoneSetting::parse` accepts.
pub fn is_valid_time_zone(value: &str) -> bool {
    let value = value.trim();
    if ["utc", "z", "local"].contains(&value.to_lowercase().as_str()) {
        return true;
    }

    offset_pattern().is_match(value)
}

fn offset_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]([01][0-9]|2[0-3]):[0-5][0-9]$").expect("offset pattern is a valid regex")
    })
}

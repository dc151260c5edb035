pub fn default_enabled() -> bool {
    true
}

pub fn default_service_name() -> String {
    "fridge-settings".to_string()
}

pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_http_port() -> u16 {
    8000
}

pub fn default_shutdown_timeout() -> u64 {
    30
}

pub fn default_time_zone() -> String {
    "UTC".to_string()
}

pub fn default_log_format() -> String {
    "pretty".to_string()
}

pub fn default_metrics_port() -> u16 {
    9100
}

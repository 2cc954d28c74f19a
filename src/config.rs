use crate::image_classifier::models::model_config::ModelConfig;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct LookupConfig {
    pub endpoint: String,
    pub result_limit: u32,
    pub page_url_base: String,
    pub user_agent: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://en.wikipedia.org/w/api.php".to_string(),
            result_limit: 20,
            page_url_base: "https://en.wikipedia.org/?curid=".to_string(),
            user_agent: concat!("image-identifier/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub logger_timezone: chrono::FixedOffset,
    pub model: ModelConfig,
    pub lookup: LookupConfig,
    pub http_timeout: Duration,
    pub window_size: [f32; 2],
    pub console_echo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_timezone: mountain_standard_time(),
            model: ModelConfig::default(),
            lookup: LookupConfig::default(),
            http_timeout: Duration::from_secs(30),
            window_size: [960.0, 720.0],
            console_echo: true,
        }
    }
}

fn mountain_standard_time() -> chrono::FixedOffset {
    chrono::FixedOffset::west_opt(7 * 3600).unwrap()
}

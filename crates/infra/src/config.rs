use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// When enabled, a client supplied `now` timestamp is used for
    /// pause/resume/delete recomputation instead of the server clock.
    /// Off by default: client clocks can be skewed or malicious.
    pub trust_client_time: bool,
    /// Base url of the external calendar the notification timeline is
    /// mirrored to. Mirroring is disabled when absent.
    pub calendar_mirror_url: Option<String>,
    pub calendar_mirror_api_key: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let trust_client_time = match std::env::var("TRUST_CLIENT_TIME") {
            Ok(val) => val == "true" || val == "1",
            Err(_) => false,
        };
        if trust_client_time {
            info!("TRUST_CLIENT_TIME is enabled. Client supplied timestamps will be used for reschedule computations.");
        }

        let calendar_mirror_url = std::env::var("CALENDAR_MIRROR_URL").ok();
        let calendar_mirror_api_key = std::env::var("CALENDAR_MIRROR_API_KEY").ok();

        Self {
            port,
            trust_client_time,
            calendar_mirror_url,
            calendar_mirror_api_key,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::dial::mapping::MAX_DURATION;

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "dial-timer")]
#[command(about = "A circular countdown timer with a draggable dial, served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Countdown length in seconds; one full turn of the dial
    #[arg(short, long, default_value = "7200")]
    pub duration: u64,

    /// Milliseconds between ticks of a running countdown
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Reject settings the dial cannot work with
    pub fn validate(&self) -> Result<(), String> {
        if self.duration == 0 {
            return Err("--duration must be at least one second".to_string());
        }
        if self.duration > MAX_DURATION {
            return Err(format!("--duration must not exceed {} seconds", MAX_DURATION));
        }
        if self.tick_ms == 0 {
            return Err("--tick-ms must be greater than zero".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_two_hour_dial() {
        let config = Config::try_parse_from(["dial-timer"]).unwrap();
        assert_eq!(config.duration, 7200);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "dial-timer", "-d", "300", "--tick-ms", "50", "-p", "9000", "-v",
        ])
        .unwrap();
        assert_eq!(config.duration, 300);
        assert_eq!(config.tick_interval(), Duration::from_millis(50));
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn duration_is_capped_at_one_week() {
        let longest = MAX_DURATION.to_string();
        let config = Config::try_parse_from(["dial-timer", "--duration", longest.as_str()]).unwrap();
        assert!(config.validate().is_ok());

        let too_long = (MAX_DURATION + 1).to_string();
        let config = Config::try_parse_from(["dial-timer", "--duration", too_long.as_str()]).unwrap();
        assert!(config.validate().unwrap_err().contains("--duration"));

        let huge = (u64::MAX - 7).to_string();
        let config = Config::try_parse_from(["dial-timer", "--duration", huge.as_str()]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_duration_is_rejected() {
        let config = Config::try_parse_from(["dial-timer", "--duration", "0"]).unwrap();
        assert!(config.validate().unwrap_err().contains("--duration"));

        let config = Config::try_parse_from(["dial-timer", "--tick-ms", "0"]).unwrap();
        assert!(config.validate().unwrap_err().contains("--tick-ms"));
    }
}

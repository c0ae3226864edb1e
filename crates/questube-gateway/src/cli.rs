use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use tracing::level_filters::LevelFilter;

pub const ENV_LISTEN_ADDR: &str = "QUESTUBE_LISTEN_ADDR";
pub const ENV_YTDLP_PATH: &str = "QUESTUBE_YTDLP_PATH";
pub const ENV_URL_ROOT: &str = "QUESTUBE_URL_ROOT";
pub const ENV_NO_CACHE: &str = "QUESTUBE_NO_CACHE";
pub const ENV_CACHE_CAPACITY: &str = "QUESTUBE_CACHE_CAPACITY";
pub const ENV_RESOLVE_TIMEOUT: &str = "QUESTUBE_RESOLVE_TIMEOUT";
pub const ENV_LOG_LEVEL: &str = "QUESTUBE_LOG_LEVEL";

#[derive(Debug, Parser)]
#[command(name = "questube", about = "Redirects video page URLs to direct media streams")]
pub struct CLI {
    /// Address the HTTP listener binds to
    #[arg(long, env = ENV_LISTEN_ADDR, default_value = "0.0.0.0:8000")]
    pub listen_addr: SocketAddr,

    /// Path to the yt-dlp executable
    #[arg(long, env = ENV_YTDLP_PATH, default_value = "/usr/bin/yt-dlp")]
    pub ytdlp_path: String,

    /// Path prefix the redirect route is mounted under
    #[arg(long, env = ENV_URL_ROOT, default_value = "/")]
    pub url_root: String,

    /// Resolve on every request instead of caching by expiry
    #[arg(long, env = ENV_NO_CACHE, default_value_t = false)]
    pub no_cache: bool,

    /// Maximum number of cached redirect targets
    #[arg(long, env = ENV_CACHE_CAPACITY, default_value_t = 512)]
    pub cache_capacity: usize,

    /// Seconds one resolver invocation may run before it is killed
    #[arg(long, env = ENV_RESOLVE_TIMEOUT, default_value_t = 90)]
    pub resolve_timeout: u64,

    /// Log verbosity
    #[arg(long, env = ENV_LOG_LEVEL, default_value_t = LogLevelArg::Info)]
    pub log_level: LogLevelArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl Display for LogLevelArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevelArg::Debug => write!(f, "debug"),
            LogLevelArg::Info => write!(f, "info"),
            LogLevelArg::Warn => write!(f, "warn"),
            LogLevelArg::Error => write!(f, "error"),
            LogLevelArg::Off => write!(f, "off"),
        }
    }
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Off => LevelFilter::OFF,
        }
    }
}

use clap::{Parser, builder::BoolishValueParser};
use lineage_mcp::server::{DEFAULT_SSE_KEEP_ALIVE, HttpTransport};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:4030";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "lineage-mcpd", version, about = "QuickSight lineage MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "LINEAGE_DEFAULT_REGION", default_value = DEFAULT_REGION)]
    default_region: String,

    #[arg(long, env = "LINEAGE_AWS_PROFILE")]
    aws_profile: Option<String>,

    #[arg(long, env = "LINEAGE_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    #[arg(
        long = "stdio",
        env = "LINEAGE_ENABLE_STDIO",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long = "http",
        env = "LINEAGE_HTTP_SERVE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    http_serve: bool,

    #[arg(long, env = "LINEAGE_HTTP_ADDR", default_value = DEFAULT_HTTP_ADDR)]
    http_addr: SocketAddr,

    #[arg(
        long = "http-sessions",
        env = "LINEAGE_HTTP_SESSIONS",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    http_sessions: bool,

    /// Seconds between SSE keep-alive pings; 0 disables them.
    #[arg(
        long = "http-keep-alive-secs",
        env = "LINEAGE_HTTP_KEEP_ALIVE_SECS",
        default_value_t = DEFAULT_SSE_KEEP_ALIVE.as_secs()
    )]
    http_keep_alive_secs: u64,

    #[arg(long, env = "LINEAGE_LOG", default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct LineageConfig {
    pub default_region: String,
    pub aws_profile: Option<String>,
    pub endpoint_url: Option<String>,
    pub enable_stdio: bool,
    pub http_serve: bool,
    pub http_addr: SocketAddr,
    pub http_sessions: bool,
    pub http_keep_alive: Option<Duration>,
    pub log_filter: String,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl LineageConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    /// Streamable HTTP listener settings for the daemon.
    #[must_use]
    pub fn http_transport(&self) -> HttpTransport {
        HttpTransport::new(self.http_addr)
            .with_sessions(self.http_sessions)
            .with_keep_alive(self.http_keep_alive)
    }
}

impl TryFrom<CliArgs> for LineageConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let default_region = args.default_region.trim().to_string();
        if default_region.is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "LINEAGE_DEFAULT_REGION",
                value: args.default_region,
            });
        }

        let aws_profile = args
            .aws_profile
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let endpoint_url = args
            .endpoint_url
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        if let Some(url) = endpoint_url.as_deref() {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidSetting {
                    name: "LINEAGE_ENDPOINT_URL",
                    value: url.to_string(),
                });
            }
        }

        if !args.enable_stdio && !args.http_serve {
            return Err(ConfigError::MissingSetting(
                "LINEAGE_ENABLE_STDIO or LINEAGE_HTTP_SERVE",
            ));
        }

        if EnvFilter::try_new(&args.log_filter).is_err() {
            return Err(ConfigError::InvalidSetting {
                name: "LINEAGE_LOG",
                value: args.log_filter,
            });
        }

        Ok(Self {
            default_region,
            aws_profile,
            endpoint_url,
            enable_stdio: args.enable_stdio,
            http_serve: args.http_serve,
            http_addr: args.http_addr,
            http_sessions: args.http_sessions,
            http_keep_alive: (args.http_keep_alive_secs > 0)
                .then(|| Duration::from_secs(args.http_keep_alive_secs)),
            log_filter: args.log_filter,
        })
    }
}

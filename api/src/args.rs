use clap::Parser;
use devcamper_core::domain::common::{DatabaseConfig, DevcamperConfig, GeocoderConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "devcamper", version, about = "DevCamper API server")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub db: DatabaseArgs,

    #[command(flatten)]
    pub geocoder: GeocoderArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServerArgs {
    #[arg(
        long = "server-host",
        env = "SERVER_HOST",
        name = "SERVER_HOST",
        default_value = "0.0.0.0"
    )]
    pub host: String,

    #[arg(
        long = "server-port",
        env = "PORT",
        name = "PORT",
        default_value_t = 5000
    )]
    pub port: u16,

    #[arg(
        long = "server-root-path",
        env = "SERVER_ROOT_PATH",
        name = "SERVER_ROOT_PATH",
        default_value = "/api/v1"
    )]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        name = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DatabaseArgs {
    #[arg(
        long = "database-host",
        env = "DATABASE_HOST",
        name = "DATABASE_HOST",
        default_value = "localhost"
    )]
    pub host: String,

    #[arg(
        long = "database-port",
        env = "DATABASE_PORT",
        name = "DATABASE_PORT",
        default_value_t = 5432
    )]
    pub port: u16,

    #[arg(
        long = "database-user",
        env = "DATABASE_USER",
        name = "DATABASE_USER",
        default_value = "postgres"
    )]
    pub user: String,

    #[arg(
        long = "database-password",
        env = "DATABASE_PASSWORD",
        name = "DATABASE_PASSWORD",
        default_value = "postgres"
    )]
    pub password: String,

    #[arg(
        long = "database-name",
        env = "DATABASE_NAME",
        name = "DATABASE_NAME",
        default_value = "devcamper"
    )]
    pub name: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GeocoderArgs {
    #[arg(
        long = "geocoder-url",
        env = "GEOCODER_URL",
        name = "GEOCODER_URL",
        default_value = "https://www.mapquestapi.com"
    )]
    pub url: String,

    #[arg(
        long = "geocoder-api-key",
        env = "GEOCODER_API_KEY",
        name = "GEOCODER_API_KEY",
        default_value = ""
    )]
    pub api_key: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LogArgs {
    #[arg(
        long = "log-filter",
        env = "LOG_FILTER",
        name = "LOG_FILTER",
        default_value = "info"
    )]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", name = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for DevcamperConfig {
    fn from(args: Args) -> Self {
        Self {
            database: DatabaseConfig {
                host: args.db.host,
                port: args.db.port,
                username: args.db.user,
                password: args.db.password,
                name: args.db.name,
            },
            geocoder: GeocoderConfig {
                base_url: args.geocoder.url,
                api_key: args.geocoder.api_key,
            },
        }
    }
}

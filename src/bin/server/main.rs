use anyhow::{Context, Result};
use clap::Parser;
use customer_service::{
    adapters::inbound::http::router::{create_router, AppState},
    adapters::outbound::storage::S3Config,
    app::{AppBuilder, AppConfig, RepositoryBackend, StorageBackend},
    domain::value_objects::{BucketName, DEFAULT_CUSTOMER_BUCKET},
    services::Buckets,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "customer-server")]
#[command(about = "Customer registry with profile image storage", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value = "8080")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Repository backend: memory, sql or orm
    #[arg(long, env = "REPOSITORY_BACKEND", default_value = "memory")]
    repository_backend: String,

    /// Database URL for the sql and orm backends
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Connection pool size
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value = "5")]
    database_max_connections: u32,

    /// Storage backend: memory or s3
    #[arg(long, env = "STORAGE_BACKEND", default_value = "memory")]
    storage_backend: String,

    /// S3 endpoint URL, for MinIO and other S3-compatible services
    #[arg(long, env = "S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// S3 region
    #[arg(long, env = "S3_REGION", default_value = "us-east-1")]
    s3_region: String,

    /// S3 access key
    #[arg(long, env = "S3_ACCESS_KEY")]
    s3_access_key: Option<String>,

    /// S3 secret key
    #[arg(long, env = "S3_SECRET_KEY")]
    s3_secret_key: Option<String>,

    /// Allow plain HTTP to the S3 endpoint
    #[arg(long, env = "S3_ALLOW_HTTP", default_value = "false")]
    s3_allow_http: bool,

    /// Bucket holding customer profile images
    #[arg(long, env = "CUSTOMER_BUCKET", default_value = DEFAULT_CUSTOMER_BUCKET)]
    customer_bucket: String,

    /// Log level, overridden by RUST_LOG
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let storage_backend = match self.storage_backend.as_str() {
            "memory" => StorageBackend::InMemory,
            "s3" => StorageBackend::S3(S3Config {
                region: self.s3_region.clone(),
                access_key: self.s3_access_key.clone(),
                secret_key: self.s3_secret_key.clone(),
                endpoint: self.s3_endpoint.clone(),
                allow_http: self.s3_allow_http,
            }),
            _ => anyhow::bail!("Unknown storage backend: {}", self.storage_backend),
        };

        let repository_backend = match self.repository_backend.as_str() {
            "memory" => RepositoryBackend::InMemory,
            "sql" | "orm" => {
                let url = self
                    .database_url
                    .clone()
                    .context("DATABASE_URL is required for database backends")?;
                let max_connections = self.database_max_connections;

                if self.repository_backend == "sql" {
                    RepositoryBackend::Sql {
                        url,
                        max_connections,
                    }
                } else {
                    RepositoryBackend::Orm {
                        url,
                        max_connections,
                    }
                }
            }
            _ => anyhow::bail!("Unknown repository backend: {}", self.repository_backend),
        };

        let customer: BucketName = self
            .customer_bucket
            .parse()
            .with_context(|| format!("Invalid CUSTOMER_BUCKET '{}'", self.customer_bucket))?;

        Ok(AppConfig {
            storage_backend,
            repository_backend,
            buckets: Buckets { customer },
        })
    }

    fn init_logging(&self) -> Result<()> {
        let level = match self.log_level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "warn" => "warn",
            "error" => "error",
            _ => "info",
        };

        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(format!("customer_service={level},tower_http={level}")))
            .context("Invalid log filter")?;

        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("Failed to install tracing subscriber")?;

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging()?;

    info!("Starting customer server");
    info!("Repository backend: {}", cli.repository_backend);
    info!("Storage backend: {}", cli.storage_backend);

    let config = cli.to_app_config()?;

    let app_services = AppBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;

    let state = AppState {
        customer_service: Arc::new(app_services.customer_service),
    };
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .context("Failed to start server")?;

    Ok(())
}

use clap::Parser;
use lus_core::LeasePolicy;
use tracing::info;

#[derive(Parser)]
#[command(name = "lus-registry")]
#[command(about = "LUS registry: leased service discovery over HTTP/JSON")]
struct Args {
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: String,

    #[arg(long, default_value_t = 120_000)]
    max_lease_ms: i64,

    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt().with_env_filter(&args.log_level).init();

    let bind_addr: std::net::SocketAddr = args.bind.parse()?;
    let registry = lus_registry::spawn(LeasePolicy::new(args.max_lease_ms));
    let state = lus_registry::AppState {
        registry,
        base_url: format!("http://{bind_addr}"),
    };
    let app = lus_registry::router(state);

    info!("LUS registry listening on http://{bind_addr}");
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

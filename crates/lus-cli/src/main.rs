use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lus")]
#[command(about = "Command-line client for the LUS lookup service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, default_value = "http://127.0.0.1:3000/", global = true)]
    root: String,

    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a service descriptor
    Register {
        /// Key=value pairs describing the service, repeatable
        #[arg(long = "key", value_name = "KEY=VALUE")]
        keys: Vec<String>,

        #[arg(long, default_value_t = 60_000)]
        lease_ms: i64,

        #[arg(long, default_value = "")]
        data: String,

        /// Keep the registration alive with a background auto-renew task
        #[arg(long)]
        auto_renew: bool,

        #[arg(long)]
        json: bool,
    },
    /// Find services matching a key=value template
    Find {
        #[arg(long = "key", value_name = "KEY=VALUE")]
        keys: Vec<String>,

        #[arg(long)]
        json: bool,
    },
    /// Renew (or, with --lease-ms 0, remove) a registration
    Renew {
        entry_url: String,

        #[arg(long, default_value_t = 60_000)]
        lease_ms: i64,

        #[arg(long)]
        json: bool,
    },
    /// Fetch a single entry by its URL
    Get {
        entry_url: String,

        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_env_filter(&cli.log_level).init();

    match cli.command {
        Commands::Register { keys, lease_ms, data, auto_renew, json } => {
            let keys = commands::parse_keys(&keys)?;
            commands::register(&cli.root, keys, lease_ms, data, auto_renew, json).await?;
        }
        Commands::Find { keys, json } => {
            let template = commands::parse_keys(&keys)?;
            commands::find(&cli.root, template, json).await?;
        }
        Commands::Renew { entry_url, lease_ms, json } => {
            commands::renew(&cli.root, &entry_url, lease_ms, json).await?;
        }
        Commands::Get { entry_url, json } => {
            commands::get(&cli.root, &entry_url, json).await?;
        }
    }

    Ok(())
}

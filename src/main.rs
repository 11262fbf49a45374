use clap::Parser;
use propsearch::{config, server};

/// Propsearch - natural-language search API for property listings
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// HTTP server host address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// HTTP server port
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

impl From<Cli> for config::CliConfig {
    fn from(cli: Cli) -> Self {
        config::CliConfig {
            http_host: cli.host,
            http_port: cli.port,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize logger - defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    println!("\nPropsearch v{}\n", env!("CARGO_PKG_VERSION"));

    let config = match config::ServerConfig::from_env() {
        Ok(mut config) => {
            config.apply_cli(cli.into());
            config
        }
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    server::run_with_config(config).await;
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use duplex::model::{DEFAULT_STUN_ADDR, IceServerConfig};
use duplex::server::{RelayConfig, serve};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "duplex")]
#[command(bin_name = "duplex")]
#[command(about = "Signaling relay for one-to-one WebRTC calls")]
struct Cli {
    /// Used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signaling relay.
    Serve {
        #[arg(long, env = "DUPLEX_BIND", default_value = "0.0.0.0:9000")]
        bind: SocketAddr,

        /// STUN server advertised to endpoints.
        #[arg(long, env = "STUN_URL", default_value = DEFAULT_STUN_ADDR)]
        stun: String,

        #[arg(long, env = "TURN_URL")]
        turn_url: Option<String>,

        #[arg(long, env = "TURN_USERNAME", requires = "turn_url")]
        turn_username: Option<String>,

        #[arg(long, env = "TURN_CREDENTIAL", requires = "turn_url")]
        turn_credential: Option<String>,
    },
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Serve {
            bind,
            stun,
            turn_url,
            turn_username,
            turn_credential,
        } => {
            let mut ice_servers = vec![IceServerConfig::stun(stun)];
            if let Some(url) = turn_url {
                ice_servers.push(IceServerConfig {
                    urls: vec![url],
                    username: turn_username,
                    credential: turn_credential,
                });
            }

            println!("{}", "📡 Starting duplex relay...".green().bold());
            println!("   🔌 Endpoint: ws://{}/ws", bind);
            for server in &ice_servers {
                println!("   🧭 ICE:      {}", server.urls.join(", ").cyan());
            }

            serve(RelayConfig { bind, ice_servers }).await?;

            println!("{}", "👋 Relay stopped.".yellow());
        }
    }

    Ok(())
}

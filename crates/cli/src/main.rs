use clap::Parser;
use dockdns_domain::CliOverrides;
use dockdns_infrastructure::dns::DnsServerHandler;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "dockdns")]
#[command(version)]
#[command(about = "dockdns - local DNS resolver for static names and Docker containers")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream resolver (repeatable); only the first one is queried
    #[arg(short = 'u', long = "upstream", value_name = "ADDR")]
    upstream: Vec<String>,

    /// Do not watch the Docker daemon
    #[arg(long)]
    no_containers: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        log_level: cli.log_level,
        upstream_servers: cli.upstream,
        no_containers: cli.no_containers,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting dockdns v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();

    let mut services = di::Services::new(&config)?;
    services.job_runner(shutdown.clone()).start().await;

    let dns_addr = config.server.listen_address();
    let dns_handler = DnsServerHandler::new(services.resolve_request);

    let mut dns_server = tokio::spawn(server::start_dns_server(dns_addr, dns_handler));

    tokio::select! {
        result = &mut dns_server => {
            shutdown.cancel();
            match result {
                Ok(Ok(())) => info!("DNS server stopped"),
                Ok(Err(e)) => {
                    error!(error = %e, "DNS server error");
                    return Err(e);
                }
                Err(e) => {
                    error!(error = %e, "DNS server task failed");
                    return Err(e.into());
                }
            }
        }
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
            shutdown.cancel();
            dns_server.abort();
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

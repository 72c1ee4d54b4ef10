use clap::Parser;
use ruledns_application::ports::DnsListenerPort;
use ruledns_domain::CliOverrides;
use std::net::{IpAddr, SocketAddr};
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "ruledns")]
#[command(version)]
#[command(about = "RuleDNS - rule-based DNS responder with an HTTP control plane")]
struct Cli {
    /// Service settings file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Web server port
    #[arg(short = 'w', long)]
    web_port: Option<u16>,

    /// Bind address for the web server and the DNS listener
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Rules file (INI)
    #[arg(short = 'r', long, value_name = "FILE")]
    rules: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        web_port: cli.web_port,
        bind_address: cli.bind.clone(),
        rules_path: cli.rules.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting RuleDNS v{}", env!("CARGO_PKG_VERSION"));

    let bind_ip: IpAddr = config.server.bind_address.parse().map_err(|e| {
        anyhow::anyhow!(
            "Invalid bind address {}: {}",
            config.server.bind_address,
            e
        )
    })?;

    let services = di::Services::new(&config, bind_ip);

    // The control plane stays up on bind failure so a corrected rule set
    // can be posted.
    if let Err(e) = services.listener.start().await {
        error!(error = %e, "DNS listener did not start");
    }

    let web_addr = SocketAddr::new(bind_ip, config.server.web_port);
    let result = server::start_web_server(web_addr, services.app_state.clone()).await;

    services.listener.stop().await;
    info!("Server shutdown complete");

    result
}

//! Command-line and environment configuration for the binaries.
//!
//! Every option can be given as a flag or through the environment; binaries
//! load a `.env` file (if any) before parsing.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::{Args, Parser};

use crate::reply::{PricePolicy, ReplyConvention, ReplyPolicy};
use crate::store::StoreUri;

/// Older variable names still honoured, as `(legacy, current)`. A legacy
/// name only applies when the current one is unset.
pub const ENV_ALIASES: [(&str, &str); 2] = [("MONGODB_URI", "MENU_STORE_URI"), ("PORT", "GRPC_PORT")];

/// Copy legacy variables onto their current names. Call before parsing.
pub fn apply_env_aliases() {
    for (name, value) in env_alias_assignments(|key| std::env::var(key).ok()) {
        std::env::set_var(name, value);
    }
}

fn env_alias_assignments(lookup: impl Fn(&str) -> Option<String>) -> Vec<(&'static str, String)> {
    ENV_ALIASES
        .iter()
        .filter(|(_, current)| lookup(current).is_none())
        .filter_map(|(legacy, current)| lookup(legacy).map(|value| (*current, value)))
        .collect()
}

/// Shared by every binary that needs to agree on the wire schema.
#[derive(Debug, Clone, Args)]
pub struct ConventionArgs {
    /// Reply convention (and therefore gRPC schema) to serve or speak.
    #[arg(long = "convention", env = "REPLY_CONVENTION", value_enum, default_value_t = ReplyConvention::Status)]
    pub convention: ReplyConvention,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "menu-server", about = "Menu catalog gRPC server")]
pub struct ServerConfig {
    /// `memory://` or `file://<path>`.
    #[arg(long, env = "MENU_STORE_URI", default_value = "file://menu_db.json")]
    pub store_uri: StoreUri,

    #[arg(long, env = "GRPC_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub grpc_host: IpAddr,

    #[arg(long, env = "GRPC_PORT", default_value_t = 50051)]
    pub grpc_port: u16,

    #[command(flatten)]
    pub convention: ConventionArgs,

    /// Defaults to `truncate` for the status convention and `preserve` for
    /// the envelope convention.
    #[arg(long, env = "PRICE_POLICY", value_enum)]
    pub price_policy: Option<PricePolicy>,

    /// Seconds in-flight calls get to finish after a shutdown signal.
    #[arg(long, env = "SHUTDOWN_GRACE_SECS", default_value_t = 3)]
    pub shutdown_grace_secs: u64,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.grpc_host, self.grpc_port)
    }

    pub fn reply_policy(&self) -> ReplyPolicy {
        ReplyPolicy::new(self.convention.convention, self.price_policy)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "menu-web", about = "HTML front end for the menu catalog")]
pub struct WebConfig {
    #[arg(long, env = "WEB_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub web_host: IpAddr,

    #[arg(long, env = "WEB_PORT", default_value_t = 3000)]
    pub web_port: u16,

    /// Address of the menu gRPC server.
    #[arg(long, env = "RPC_ENDPOINT", default_value = "http://127.0.0.1:50051")]
    pub rpc_endpoint: String,

    #[command(flatten)]
    pub convention: ConventionArgs,

    #[arg(long, env = "SHUTDOWN_GRACE_SECS", default_value_t = 3)]
    pub shutdown_grace_secs: u64,
}

impl WebConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.web_host, self.web_port)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "menu-demo", about = "Run a CRUD walkthrough against a menu server")]
pub struct DemoConfig {
    #[arg(long, env = "RPC_ENDPOINT", default_value = "http://127.0.0.1:50051")]
    pub rpc_endpoint: String,

    #[command(flatten)]
    pub convention: ConventionArgs,
}

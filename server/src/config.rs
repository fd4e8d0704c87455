use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_FUNCTION_PREFIX: &str = "/.netlify/functions/server";
pub const DEFAULT_MAX_BODY_BYTES: usize = 100 * 1024;

#[derive(Parser, Debug, Clone)]
#[command(name = "drr-server")]
#[command(about = "In-memory record API for the Daily Run Rate calculator", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Address to listen on
    #[arg(long, env = "DRR_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Keep records in a JSON file under this directory instead of memory
    #[arg(long, env = "DRR_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Reject POST bodies that are not well-formed records
    #[arg(long, env = "DRR_STRICT")]
    pub strict: bool,

    /// Path prefix stripped from serverless invocation events
    #[arg(long, env = "DRR_FUNCTION_PREFIX", default_value = DEFAULT_FUNCTION_PREFIX)]
    pub function_prefix: String,

    /// Largest accepted JSON body, in bytes
    #[arg(long, env = "DRR_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Answer one serverless invocation event and exit
    Invoke {
        /// Event JSON file; read from stdin when omitted
        #[arg(long)]
        event: Option<PathBuf>,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub data_dir: Option<PathBuf>,
    pub strict: bool,
    pub function_prefix: String,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            data_dir: None,
            strict: false,
            function_prefix: DEFAULT_FUNCTION_PREFIX.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    pub fn load(args: &Args) -> anyhow::Result<Self> {
        if !args.function_prefix.starts_with('/') {
            bail!("function prefix must start with '/', got '{}'", args.function_prefix);
        }
        if args.max_body_bytes == 0 {
            bail!("max body size must be greater than zero");
        }

        Ok(Self {
            addr: SocketAddr::new(args.host, args.port),
            data_dir: args.data_dir.clone(),
            strict: args.strict,
            function_prefix: args.function_prefix.trim_end_matches('/').to_string(),
            max_body_bytes: args.max_body_bytes,
        })
    }
}

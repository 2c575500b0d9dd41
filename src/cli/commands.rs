use crate::dispatcher::Dispatcher;
use crate::echo::EchoResolver;
use crate::route_file::RouteFile;
use crate::router::Router;
use crate::runtime_config::RuntimeConfig;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Command-line interface for brrtmatch
#[derive(Parser)]
#[command(name = "brrtmatch")]
#[command(about = "Inspect and exercise route files", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the routing table
    Routes {
        /// Path to the route file (YAML, JSON or TOML)
        #[arg(short, long)]
        routes: PathBuf,
    },
    /// Print every route matching a request, in order
    Match {
        /// Path to the route file (YAML, JSON or TOML)
        #[arg(short, long)]
        routes: PathBuf,

        /// HTTP method, case-insensitive
        method: String,

        /// Request URI; query string and fragment are ignored
        uri: String,
    },
    /// Dispatch a request through echo handlers and print the result
    Dispatch {
        /// Path to the route file (YAML, JSON or TOML)
        #[arg(short, long)]
        routes: PathBuf,

        /// HTTP method, case-insensitive
        method: String,

        /// Request URI; query string and fragment are ignored
        uri: String,
    },
}

fn load_router(path: &Path) -> Result<Router<Value>> {
    let file = RouteFile::load(path)?;
    file.build_router_with_config(&RuntimeConfig::from_env())
        .with_context(|| format!("invalid route in {}", path.display()))
}

/// Run one command and return what it prints
pub fn run_command(command: &Commands) -> Result<String> {
    match command {
        Commands::Routes { routes } => Ok(load_router(routes)?.dump_routes()),
        Commands::Match {
            routes,
            method,
            uri,
        } => {
            let router = load_router(routes)?;
            let found = router.matches(method, uri);
            if found.is_empty() {
                return Ok(format!(
                    "no match for {} /{}\n",
                    method.trim().to_ascii_uppercase(),
                    router.clean_request_uri(uri)
                ));
            }
            let mut out = String::new();
            for (index, m) in found.iter().enumerate() {
                writeln!(
                    out,
                    "{index}: /{} -> {} params={}",
                    m.route.pattern(),
                    m.route.handler().describe(),
                    serde_json::to_string(&m.params)?
                )?;
            }
            Ok(out)
        }
        Commands::Dispatch {
            routes,
            method,
            uri,
        } => {
            let dispatcher = Dispatcher::new(load_router(routes)?).with_resolver(EchoResolver);
            let result = dispatcher.dispatch(method, uri)?;
            Ok(format!("{}\n", serde_json::to_string_pretty(&result)?))
        }
    }
}

/// Parse arguments from the process and run the selected command
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let output = run_command(&cli.command)?;
    print!("{output}");
    Ok(())
}

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use waypath_cli::output::OutputFormat;
use waypath_lib::{Point, RouteAlgorithm};

mod commands;

use commands::route::RouteCommandArgs;

#[derive(Parser, Debug)]
#[command(name = "waypath", author, version, about = "Route graph snapping and shortest paths")]
struct Cli {
    /// Route file with one `(x, y), (x, y), ...` polyline per line.
    /// Falls back to the WAYPATH_ROUTES environment variable.
    #[arg(long, global = true)]
    routes: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest route between two points.
    Route {
        /// Starting point as `x,y`.
        #[arg(long = "from", allow_hyphen_values = true)]
        from: Point,
        /// Destination point as `x,y`.
        #[arg(long = "to", allow_hyphen_values = true)]
        to: Point,
        /// Search algorithm.
        #[arg(long, default_value = "dijkstra")]
        algorithm: RouteAlgorithm,
    },
    /// Report the graph vertex nearest to a point.
    Snap {
        /// Point as `x,y`.
        #[arg(long, allow_hyphen_values = true)]
        point: Point,
    },
    /// Summarise the graph built from the route file.
    Graph,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let routes = cli.routes.as_deref();

    match cli.command {
        Command::Route {
            from,
            to,
            algorithm,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                algorithm,
            };
            commands::route::handle_route_command(routes, cli.format, &args)
        }
        Command::Snap { point } => commands::snap::handle_snap_command(routes, cli.format, point),
        Command::Graph => commands::graph::handle_graph_command(routes, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

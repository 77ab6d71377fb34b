//! rwalk: inspect ESTree syntax trees.
//!
//! Usage:
//!   rwalk [-v...] scopes <FILE> [--format text|json]
//!   rwalk [-v...] stats <FILE> [--format text|json]
//!   rwalk [-v...] find <FILE> --pos <OFFSET> [--type <KEY>] [--format text|json]
//!
//! `FILE` is an ESTree JSON document as emitted by acorn or esprima; `-`
//! reads it from stdin.

mod report;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use miette::{miette, IntoDiagnostic, Result, WrapErr};
use report::{FoundNode, ScopeReport, StatsReport};
use rwalk_ast::Node;
use rwalk_walker::{find_node_around, scope_tree};
use serde::Serialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "rwalk", version, about = "Walk ESTree syntax trees")]
struct Cli {
    /// Log more (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the scope tree and the names bound in each scope.
    Scopes {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Count visits per node type and category.
    Stats {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the innermost node containing an offset.
    Find {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Source offset to look up.
        #[arg(long)]
        pos: u32,
        /// Only accept nodes dispatched under this type or category.
        #[arg(long = "type", value_name = "KEY")]
        node_type: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Scopes { file, format } => {
            let tree = load(&file)?;
            let global = scope_tree(&tree).into_diagnostic().wrap_err("scope walk failed")?;
            print(&ScopeReport::from_scope(&global), format)
        }
        Command::Stats { file, format } => {
            let tree = load(&file)?;
            let stats = StatsReport::collect(&tree)
                .into_diagnostic()
                .wrap_err("walk failed")?;
            print(&stats, format)
        }
        Command::Find {
            file,
            pos,
            node_type,
            format,
        } => {
            let tree = load(&file)?;
            let test = |key: &str, _: &Node| node_type.as_deref().map_or(true, |wanted| wanted == key);
            let found = find_node_around(&tree, pos, test, None, &())
                .into_diagnostic()
                .wrap_err("walk failed")?;
            match found {
                Some(node) => print(&FoundNode::new(node), format),
                None => Err(miette!("no matching node contains offset {}", pos)),
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load(path: &Path) -> Result<Node> {
    let tree = if path.as_os_str() == "-" {
        Node::from_reader(std::io::stdin().lock())
    } else {
        Node::from_file(path)
    };
    let tree = tree
        .into_diagnostic()
        .wrap_err_with(|| format!("could not load '{}'", path.display()))?;
    tracing::debug!(root = tree.type_name(), "loaded tree");
    Ok(tree)
}

fn print<T: Serialize + Display>(report: &T, format: Format) -> Result<()> {
    match format {
        Format::Text => println!("{}", report),
        Format::Json => {
            let json = serde_json::to_string_pretty(report).into_diagnostic()?;
            println!("{}", json);
        }
    }
    Ok(())
}

//! trie CLI - Command line interface for trie_node
//!
//! Each command reads tree files (JSON or snapshot, detected on load),
//! applies one operation, and reports the result as JSON. Tree values are
//! strings.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use trie_node::{store, Format, Node};

type Tree = Node<String>;

#[derive(Parser)]
#[command(name = "trie")]
#[command(about = "Build, inspect and merge ordered labeled trees")]
#[command(version)]
struct Cli {
    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a tree file holding a single node
    New {
        /// Path of the tree file (".snap" writes a snapshot)
        file: PathBuf,
        /// Value of the root node
        value: String,
    },

    /// Display a tree
    Show {
        /// Path of the tree file
        file: PathBuf,
    },

    /// Show size, child count and digest of a tree
    Stats {
        /// Path of the tree file
        file: PathBuf,
    },

    /// Add a child under the root
    Add {
        /// Path of the tree file
        file: PathBuf,
        /// Value of the new child
        value: String,
    },

    /// Remove a child of the root
    Remove {
        /// Path of the tree file
        file: PathBuf,
        /// Value of the child to remove
        value: String,
    },

    /// Merge one tree into another
    Merge {
        /// Tree to merge into
        base: PathBuf,
        /// Tree to merge from (left unchanged)
        other: PathBuf,
        /// Where to write the result (defaults to overwriting base)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare two trees structurally
    Equal {
        /// First tree file
        left: PathBuf,
        /// Second tree file
        right: PathBuf,
    },

    /// Re-encode a tree file; the output extension picks the format
    Convert {
        /// Source tree file
        input: PathBuf,
        /// Destination tree file
        output: PathBuf,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        tracing::error!("{err:#}");
        output(
            &cli.format,
            &serde_json::json!({
                "status": "error",
                "message": format!("{err:#}")
            }),
        );
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("TRIE_LOG").unwrap_or_else(|_| EnvFilter::new("trie_node=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::New { file, value } => {
            let tree = Tree::new(value.clone());
            save_tree(&tree, file)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "message": format!("Created tree at {}", file.display())
                }),
            );
        }

        Commands::Show { file } => {
            let tree = load_tree(file)?;
            match cli.format {
                OutputFormat::Text => print!("{tree}"),
                OutputFormat::Json => output(
                    &cli.format,
                    &serde_json::json!({
                        "status": "ok",
                        "size": tree.size(),
                        "tree": tree
                    }),
                ),
            }
        }

        Commands::Stats { file } => {
            let tree = load_tree(file)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "value": *tree.value(),
                    "size": tree.size(),
                    "children": tree.num_children(),
                    "singleton": tree.is_singleton(),
                    "digest": tree.digest()?.to_hex()
                }),
            );
        }

        Commands::Add { file, value } => {
            let tree = load_tree(file)?;
            let added = tree.insert_value(value.clone());
            if added {
                save_tree(&tree, file)?;
            }
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "added": added,
                    "size": tree.size()
                }),
            );
        }

        Commands::Remove { file, value } => {
            let tree = load_tree(file)?;
            let removed = tree.remove_child(value);
            if removed.is_some() {
                save_tree(&tree, file)?;
            }
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "removed": removed.is_some(),
                    "removed_size": removed.as_ref().map_or(0, Node::size),
                    "size": tree.size()
                }),
            );
        }

        Commands::Merge {
            base,
            other,
            output: target,
        } => {
            let tree = load_tree(base)?;
            let incoming = load_tree(other)?;
            tree.merge(&incoming);
            let target = target.as_deref().unwrap_or(base);
            save_tree(&tree, target)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "path": target.display().to_string(),
                    "value": *tree.value(),
                    "size": tree.size(),
                    "children": tree.num_children()
                }),
            );
        }

        Commands::Equal { left, right } => {
            let lhs = load_tree(left)?;
            let rhs = load_tree(right)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "equal": lhs == rhs,
                    "left": lhs.digest()?.to_hex(),
                    "right": rhs.digest()?.to_hex()
                }),
            );
        }

        Commands::Convert {
            input,
            output: target,
        } => {
            let tree = load_tree(input)?;
            save_tree(&tree, target)?;
            let format = match Format::from_path(target) {
                Format::Json => "json",
                Format::Snapshot => "snapshot",
            };
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "path": target.display().to_string(),
                    "format": format
                }),
            );
        }
    }

    Ok(())
}

fn load_tree(path: &Path) -> anyhow::Result<Tree> {
    store::load(path).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
}

fn save_tree(tree: &Tree, path: &Path) -> anyhow::Result<()> {
    store::save(tree, path, Format::from_path(path))?;
    Ok(())
}

fn output(format: &OutputFormat, value: &serde_json::Value) {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::Text => serde_json::to_string_pretty(value),
    };
    match rendered {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("failed to encode output: {e}"),
    }
}

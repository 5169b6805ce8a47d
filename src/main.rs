//! `lineage`: highlight a node's lineage in a graph description and print
//! the resulting render snapshot as JSON.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use lineage::graph::focus::{focus_on, FitRequest, RecordingViewport};
use lineage::render::{snapshot, RenderSnapshot};
use lineage::{load_graph_json, Direction, GraphModel, Highlighter, LineageConfig, Result};

#[derive(Parser, Debug)]
#[command(name = "lineage", version, about = "Explore ancestor/descendant lineage in a directed graph")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Select a node, highlight its lineage, and print the snapshot
    Highlight {
        /// Graph description (JSON)
        graph: PathBuf,

        /// Id of the node to select
        #[arg(long, short)]
        node: String,

        #[arg(long, short, value_enum, default_value_t = DirectionArg::Descendants)]
        direction: DirectionArg,

        /// Generations to walk (defaults to the config value)
        #[arg(long, short)]
        generations: Option<u32>,

        /// YAML or JSON config file
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Also report the viewport fit for the highlighted elements
        #[arg(long)]
        focus: bool,
    },
    /// Print node and edge counts
    Stats {
        /// Graph description (JSON)
        graph: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DirectionArg {
    Ancestors,
    Descendants,
    Both,
}

#[derive(Serialize)]
struct HighlightOutput {
    node: String,
    direction: &'static str,
    generations: u32,
    reached: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    focus: Option<FitRequest>,
    snapshot: RenderSnapshot,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose && std::env::var_os("RUST_LOG").is_none() {
        Some("lineage=debug")
    } else {
        None
    };
    lineage::observability::init_logging_with(filter);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Highlight {
            graph,
            node,
            direction,
            generations,
            config,
            focus,
        } => {
            let config = load_config(config.as_deref())?;
            let mut model = read_graph(&graph)?;
            let generations = generations.unwrap_or(config.default_generations);
            let highlighter = Highlighter::new(config);

            let (reached, elements) = match direction {
                DirectionArg::Both => {
                    let pair = highlighter.highlight_lineage(&mut model, &node, generations)?;
                    (
                        pair.ancestors.node_count() + pair.descendants.node_count(),
                        pair.elements_with_focal(),
                    )
                }
                DirectionArg::Ancestors | DirectionArg::Descendants => {
                    let dir = if direction == DirectionArg::Ancestors {
                        Direction::Ancestors
                    } else {
                        Direction::Descendants
                    };
                    let lineage =
                        highlighter.select_and_highlight(&mut model, &node, dir, generations)?;
                    (lineage.node_count(), lineage.elements_with_focal())
                }
            };

            let focus = if focus {
                let mut viewport = RecordingViewport::default();
                focus_on(
                    &model,
                    &elements,
                    &mut viewport,
                    highlighter.config().focus_padding,
                );
                viewport.last().copied()
            } else {
                None
            };

            let output = HighlightOutput {
                node,
                direction: match direction {
                    DirectionArg::Ancestors => "ancestors",
                    DirectionArg::Descendants => "descendants",
                    DirectionArg::Both => "both",
                },
                generations,
                reached,
                focus,
                snapshot: snapshot(&model, highlighter.config()),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Stats { graph } => {
            let model = read_graph(&graph)?;
            let stats = model.stats();
            println!(
                "{}",
                serde_json::json!({ "nodes": stats.nodes, "edges": stats.edges })
            );
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<LineageConfig> {
    let mut config = match path {
        Some(p) => LineageConfig::load_file(p)?,
        None => LineageConfig::default(),
    };
    config.apply_env_overrides()?;
    Ok(config)
}

fn read_graph(path: &Path) -> Result<GraphModel> {
    let text = std::fs::read_to_string(path)?;
    load_graph_json(&text)
}

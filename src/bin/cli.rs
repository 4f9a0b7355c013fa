//! notegraph CLI
//!
//! Loads a note/tag/image snapshot and runs graph queries over it.

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notegraph::error::{GraphError, Result};
use notegraph::graph::{
    build_graph_with, clustering_coefficient, detect_clusters, filter_graph, neighborhood,
    neighbors, GraphFilters, GraphStats,
};
use notegraph::search::search_nodes;
use notegraph::{GraphConfig, GraphData, Snapshot};

#[derive(Parser)]
#[command(name = "notegraph")]
#[command(about = "Knowledge graph queries over notes, tags and images")]
#[command(version)]
struct Cli {
    /// Snapshot file (JSON with notes, tags and images)
    #[arg(long, env = "NOTEGRAPH_SNAPSHOT")]
    snapshot: String,

    /// Config file (TOML)
    #[arg(long, env = "NOTEGRAPH_CONFIG")]
    config: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, env = "NOTEGRAPH_LOG_JSON")]
    log_json: bool,

    #[command(flatten)]
    facets: FacetArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Facet overrides applied on top of the configured filters
#[derive(Args, Debug, Default)]
struct FacetArgs {
    #[arg(long, global = true)]
    hide_notes: bool,
    #[arg(long, global = true)]
    hide_tags: bool,
    #[arg(long, global = true)]
    hide_images: bool,
    #[arg(long, global = true)]
    hide_wikilinks: bool,
    #[arg(long, global = true)]
    hide_tag_links: bool,
    #[arg(long, global = true)]
    hide_image_links: bool,
}

impl FacetArgs {
    fn apply(&self, filters: GraphFilters) -> GraphFilters {
        GraphFilters {
            show_notes: filters.show_notes && !self.hide_notes,
            show_tags: filters.show_tags && !self.hide_tags,
            show_images: filters.show_images && !self.hide_images,
            show_wikilinks: filters.show_wikilinks && !self.hide_wikilinks,
            show_tag_links: filters.show_tag_links && !self.hide_tag_links,
            show_image_links: filters.show_image_links && !self.hide_image_links,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the filtered graph as JSON
    Graph {
        /// Restrict to the neighborhood of this node id
        #[arg(long)]
        center: Option<String>,
        /// Neighborhood depth
        #[arg(long, default_value = "1")]
        depth: usize,
    },
    /// Find nodes by name
    Search {
        /// Case-insensitive substring
        term: String,
    },
    /// List neighbors of a node
    Neighbors {
        /// Node id, e.g. note-7
        id: String,
    },
    /// Local clustering coefficient of a node
    Coefficient {
        /// Node id, e.g. note-7
        id: String,
    },
    /// Connected components, largest first
    Clusters,
    /// Show graph statistics
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    let config = match &cli.config {
        Some(path) => GraphConfig::load(path)?,
        None => GraphConfig::default(),
    };
    let filters = cli.facets.apply(config.filters);

    let snapshot_path = shellexpand::tilde(&cli.snapshot).to_string();
    let snapshot = Snapshot::from_path(&snapshot_path)?;
    tracing::info!(
        notes = snapshot.notes.len(),
        tags = snapshot.tags.len(),
        images = snapshot.images.len(),
        "Loaded snapshot from {}",
        snapshot_path
    );

    let built = build_graph_with(
        &snapshot.notes,
        &snapshot.tags,
        &snapshot.images,
        &config.sizing,
    );
    let graph = filter_graph(&built, &filters);

    match cli.command {
        Commands::Graph { center, depth } => {
            let output = match center {
                Some(center) => {
                    require_node(&graph, &center)?;
                    neighborhood(&graph, &center, depth)
                }
                None => graph.into_owned(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Search { term } => {
            for node in search_nodes(&graph.nodes, &term) {
                println!("{}\t{}", node.id, node.name);
            }
        }
        Commands::Neighbors { id } => {
            require_node(&graph, &id)?;
            let mut ids: Vec<String> = neighbors(&id, &graph.links).into_iter().collect();
            ids.sort();
            for id in ids {
                println!("{}", id);
            }
        }
        Commands::Coefficient { id } => {
            require_node(&graph, &id)?;
            println!("{:.4}", clustering_coefficient(&id, &graph.links));
        }
        Commands::Clusters => {
            for (i, cluster) in detect_clusters(&graph).iter().enumerate() {
                println!("#{} ({} nodes): {}", i + 1, cluster.len(), cluster.join(", "));
            }
        }
        Commands::Stats => {
            let stats = GraphStats::compute(&graph);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}

/// Logs go to stderr; stdout is for command output
fn init_logging(json: bool) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);
    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::from_default_env());

    if json {
        registry.with(fmt_layer.json()).init();
    } else {
        registry.with(fmt_layer).init();
    }
}

fn require_node(graph: &GraphData, id: &str) -> Result<()> {
    match graph.node(id) {
        Some(_) => Ok(()),
        None => Err(GraphError::InvalidInput(format!(
            "No visible node with id {}",
            id
        ))),
    }
}

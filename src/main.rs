//! `dtlrec` command-line tool.
//!
//! Reads a Newick file whose first tree is the species tree and whose
//! remaining trees are gene trees, reconciles every gene tree with the
//! species tree and prints the optimal cost, the optimal species vertex and
//! the gene tree with internal vertices named by their events.
//!
//! Exit code 1 on any error.

use clap::{ArgAction, Parser};
use dtlrec::model::{CompactTree, LeafLabelMap, VertexIndex};
use dtlrec::newick::compact_to_newick;
use dtlrec::parser::{ParsingError, ParsingErrorType};
use dtlrec::reconcile::ReconciliationSummary;
use dtlrec::{DtlCosts, Error, Reconciliation, parse_newick_file, reconcile_batch};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

/// Most parsimonious Duplication-Transfer-Loss reconciliation
#[derive(Parser)]
#[command(name = "dtlrec")]
#[command(version)]
#[command(about = "Reconcile gene trees with a species tree under the DTL model")]
struct Cli {
    /// Newick file: species tree first, followed by one or more gene trees
    input: PathBuf,

    /// Cost of a gene duplication
    #[arg(short, long, default_value_t = 2.0, allow_negative_numbers = true)]
    duplication: f64,

    /// Cost of a horizontal gene transfer
    #[arg(short, long, default_value_t = 1.0, allow_negative_numbers = true)]
    transfer: f64,

    /// Cost of a gene loss
    #[arg(short, long, default_value_t = 3.0, allow_negative_numbers = true)]
    loss: f64,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Result for one gene tree, as printed.
#[derive(Serialize)]
struct GeneReport {
    gene_tree: usize,
    #[serde(flatten)]
    summary: ReconciliationSummary,
    optimal_species_name: Option<String>,
    annotated: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_target(true).with_writer(std::io::stderr).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let (trees, labels) = parse_newick_file(&cli.input)?;
    info!(path = %cli.input.display(), trees = trees.len(), taxa = labels.num_labels(), "parsed input");

    let Some((species, genes)) = trees.split_first().filter(|(_, genes)| !genes.is_empty()) else {
        return Err(ParsingError::without_context(ParsingErrorType::WrongTreeCount {
            expected: 2,
            found: trees.len(),
        })
        .into());
    };

    let costs = DtlCosts::new(cli.duplication, cli.transfer, cli.loss);
    let results = reconcile_batch(species, genes, &costs)?;

    let reports: Vec<GeneReport> = genes
        .iter()
        .zip(&results)
        .enumerate()
        .map(|(i, (gene, result))| report(i + 1, species, gene, &labels, result))
        .collect();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            let species_name = report.optimal_species_name.as_deref().unwrap_or("-");
            println!("gene tree {}", report.gene_tree);
            println!("  optimal cost:    {}", report.summary.optimal_cost);
            println!("  optimal species: {species_name}");
            println!("  {}", report.annotated);
        }
    }
    Ok(())
}

fn report(
    gene_tree: usize,
    species: &CompactTree,
    gene: &CompactTree,
    labels: &LeafLabelMap,
    result: &Reconciliation,
) -> GeneReport {
    let names: Vec<Option<String>> = result
        .events()
        .into_iter()
        .map(|event| event.map(|e| e.to_string()))
        .collect();

    let summary = result.summary();
    GeneReport {
        gene_tree,
        optimal_species_name: summary.optimal_species.map(|s| species_vertex_name(species, labels, s)),
        annotated: compact_to_newick(gene, labels, Some(&names)),
        summary,
    }
}

/// Leaf label, internal name, or `#index` for unnamed internal species vertices.
fn species_vertex_name(species: &CompactTree, labels: &LeafLabelMap, s: VertexIndex) -> String {
    let vertex = &species[s];
    vertex
        .label()
        .and_then(|&label| labels.get_label(label))
        .or(vertex.name())
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{s}"))
}

mod input;
mod model;
mod pipeline;
mod report;
mod tracing;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::input::genes::parse_gene_names;
use crate::input::meta::MetaColumns;
use crate::input::{InputBundle, InputPaths, load_input};
use crate::model::decoder::Activation;
use crate::model::scorer::NearestCentroidScorer;
use crate::model::subtypes::{Contrast, HGSC_SUBTYPES, default_contrasts};
use crate::model::thresholds::SelectionProfile;
use crate::pipeline::AnalysisError;
use crate::pipeline::runner::{Analysis, AnalysisInputs, TailNaming};
use crate::pipeline::stage6_compare::{
    ComparisonRow, compare, default_reference_plan, load_plan, run_comparisons,
};
use crate::pipeline::stage7_report::write_reports;
use crate::report::SummaryData;
use crate::report::gene_list::DirGeneListStore;

fn main() {
    crate::tracing::init_tracing();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "subtype-latentdiff",
    version,
    about = "Differential gene selection and cluster quality over a learned latent space"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Centroids, contrasts, high-weight genes, cluster quality and reference comparison.
    Run(RunArgs),
    /// Decoded centroid differentials for one or more subtype pairs.
    Contrast(ContrastArgs),
    /// Per-subtype latent centroid table.
    Centroids(InputArgs),
    /// Genes beyond the empirical SD band of a single decoded centroid.
    HighWeight(HighWeightArgs),
    /// How well each subtype separates from the rest, in latent and raw space.
    ClusterQuality(InputArgs),
    /// Overlap between our gene lists and reference lists.
    Compare(CompareArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ActivationArg {
    Sigmoid,
    Linear,
}

impl From<ActivationArg> for Activation {
    fn from(value: ActivationArg) -> Self {
        match value {
            ActivationArg::Sigmoid => Activation::Sigmoid,
            ActivationArg::Linear => Activation::Linear,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct InputArgs {
    /// Samples x latent dims (TSV, first column sample id).
    #[arg(long)]
    latent: PathBuf,
    /// Sample metadata with id and subtype columns (TSV).
    #[arg(long)]
    meta: PathBuf,
    /// Samples x genes expression matrix; its header doubles as gene names.
    #[arg(long)]
    raw: Option<PathBuf>,
    /// One gene name per line, in decoder output order.
    #[arg(long)]
    genes: Option<PathBuf>,
    /// Decoder kernel, latent dims x genes.
    #[arg(long)]
    decoder_weights: Option<PathBuf>,
    /// Decoder bias, one value per gene.
    #[arg(long)]
    decoder_bias: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = ActivationArg::Sigmoid)]
    activation: ActivationArg,
    #[arg(long, default_value = "sample_id")]
    id_column: String,
    #[arg(long, default_value = "SUBTYPE")]
    label_column: String,
    /// Subtype vocabulary, comma separated (default: the four HGSC subtypes).
    #[arg(long, value_delimiter = ',')]
    subtypes: Vec<String>,
    #[arg(long)]
    out: PathBuf,
}

impl InputArgs {
    fn paths(&self) -> InputPaths {
        InputPaths {
            latent: self.latent.clone(),
            meta: self.meta.clone(),
            raw: self.raw.clone(),
            genes: self.genes.clone(),
            decoder_weights: self.decoder_weights.clone(),
            decoder_bias: self.decoder_bias.clone(),
        }
    }

    fn columns(&self) -> MetaColumns {
        MetaColumns {
            id_column: self.id_column.clone(),
            label_column: self.label_column.clone(),
        }
    }

    fn vocabulary(&self) -> Vec<String> {
        if self.subtypes.is_empty() {
            HGSC_SUBTYPES.iter().map(|s| s.to_string()).collect()
        } else {
            self.subtypes.clone()
        }
    }

    fn profile(&self) -> SelectionProfile {
        SelectionProfile {
            decoder_activation: self.activation.into(),
            ..SelectionProfile::default_v1()
        }
    }
}

#[derive(Debug, Clone, Args)]
struct ContrastArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Subtype pair as FIRST:SECOND; repeatable.
    #[arg(long = "contrast", value_name = "A:B")]
    contrasts: Vec<Contrast>,
    #[arg(long, default_value_t = 2.5)]
    sd_level: f64,
    #[arg(long, default_value_t = 20)]
    bins: usize,
    /// Skip the latent attribute-axis projection.
    #[arg(long)]
    no_projection: bool,
}

impl ContrastArgs {
    fn contrasts(&self) -> Vec<Contrast> {
        if self.contrasts.is_empty() {
            return default_contrasts();
        }
        let mut out: Vec<Contrast> = Vec::with_capacity(self.contrasts.len());
        for c in &self.contrasts {
            if out.contains(c) {
                crate::warn!("contrast {} given more than once; running it once", c);
            } else {
                out.push(c.clone());
            }
        }
        out
    }

    fn profile(&self) -> SelectionProfile {
        SelectionProfile {
            quantile_sd: self.sd_level,
            histogram_bins: self.bins,
            ..self.input.profile()
        }
    }
}

#[derive(Debug, Clone, Args)]
struct HighWeightArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Subtype whose decoded centroid is thresholded; repeatable.
    #[arg(long = "subtype", required = true)]
    targets: Vec<String>,
    #[arg(long, default_value_t = 2.0)]
    sd_level: f64,
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    #[command(flatten)]
    contrast: ContrastArgs,
    /// Subtypes for the single-centroid selection (default: the contrasted subtypes).
    #[arg(long = "high-weight")]
    high_weight: Vec<String>,
    #[arg(long, default_value_t = 2.0)]
    high_weight_sd: f64,
    #[arg(long)]
    skip_cluster: bool,
    /// Directory holding the reference gene lists.
    #[arg(long)]
    reference_dir: Option<PathBuf>,
    /// `ours<TAB>theirs` pairs; defaults to the HGSC node plan.
    #[arg(long)]
    plan: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct CompareArgs {
    #[arg(long, requires = "theirs", conflicts_with = "plan")]
    ours: Option<PathBuf>,
    #[arg(long, requires = "ours")]
    theirs: Option<PathBuf>,
    #[arg(long)]
    plan: Option<PathBuf>,
    /// Directory holding our lists (default: --out).
    #[arg(long)]
    ours_dir: Option<PathBuf>,
    #[arg(long)]
    reference_dir: Option<PathBuf>,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Default)]
struct Tally {
    attempted: usize,
    failed: usize,
}

impl Tally {
    fn keep<T>(&mut self, what: &str, result: Result<T, AnalysisError>) -> Option<T> {
        self.attempted += 1;
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                crate::error!("{} failed: {}", what, err);
                self.failed += 1;
                None
            }
        }
    }

    fn finish(self) -> Result<(), AnalysisError> {
        if self.failed > 0 {
            return Err(AnalysisError::Incomplete(self.failed, self.attempted));
        }
        Ok(())
    }
}

fn run() -> Result<(), AnalysisError> {
    match Cli::parse().command {
        Command::Run(args) => run_full(&args),
        Command::Contrast(args) => run_contrasts(&args),
        Command::Centroids(args) => run_centroids(&args),
        Command::HighWeight(args) => run_high_weight(&args),
        Command::ClusterQuality(args) => run_cluster(&args),
        Command::Compare(args) => run_compare(&args),
    }
}

fn load(args: &InputArgs, profile: &SelectionProfile) -> Result<InputBundle, AnalysisError> {
    Ok(load_input(
        &args.paths(),
        &args.columns(),
        profile.decoder_activation,
    )?)
}

fn summary_for(command: &str, bundle: &InputBundle) -> SummaryData {
    let mut summary = SummaryData::new(command, bundle.n_samples(), bundle.latent_dim());
    summary.n_genes = bundle.genes.as_ref().map(Vec::len);
    summary
}

fn run_full(args: &RunArgs) -> Result<(), AnalysisError> {
    let input = &args.contrast.input;
    let profile = SelectionProfile {
        empirical_sd: args.high_weight_sd,
        ..args.contrast.profile()
    };
    let bundle = load(input, &profile)?;
    let vocabulary = input.vocabulary();
    let store = DirGeneListStore::new(&input.out);
    let analysis = Analysis {
        inputs: AnalysisInputs::from_bundle(&bundle),
        profile: &profile,
        subtypes: &vocabulary,
        store: &store,
        out_dir: &input.out,
    };

    let mut summary = summary_for("run", &bundle);
    summary.subtypes = analysis.group_sizes()?;
    analysis.run_centroids()?;

    let contrasts = args.contrast.contrasts();
    let naming = tail_naming(&contrasts);
    let mut tally = Tally::default();
    for contrast in &contrasts {
        let result = analysis.run_contrast(contrast, naming, !args.contrast.no_projection);
        if let Some(row) = tally.keep(&format!("contrast {contrast}"), result) {
            summary.contrasts.push(row);
        }
    }

    let targets = if args.high_weight.is_empty() {
        let mut seen = Vec::new();
        for c in &contrasts {
            for name in [&c.first, &c.second] {
                if !seen.contains(name) {
                    seen.push(name.clone());
                }
            }
        }
        seen
    } else {
        args.high_weight.clone()
    };
    for subtype in &targets {
        let result = analysis.run_high_weight(subtype);
        if let Some(row) = tally.keep(&format!("high-weight {subtype}"), result) {
            summary.high_weight.push(row);
        }
    }

    if !args.skip_cluster {
        let result = analysis.run_cluster_quality(&NearestCentroidScorer);
        if let Some(rows) = tally.keep("cluster quality", result) {
            summary.cluster_scores = rows;
        }
    }

    if let Some(reference_dir) = &args.reference_dir {
        if naming == TailNaming::ByContrast && args.plan.is_none() {
            crate::warn!(
                "contrast gene lists carry contrast prefixes; the default reference plan expects <subtype>_genes_sd.txt"
            );
        }
        let result = compare_with_plan(&input.out, reference_dir, args.plan.as_deref());
        if let Some(rows) = tally.keep("reference comparison", result) {
            summary.comparisons = rows;
        }
    }

    write_reports(&summary, &input.out)?;
    tally.finish()
}

fn tail_naming(contrasts: &[Contrast]) -> TailNaming {
    let naming = TailNaming::for_contrasts(contrasts);
    if naming == TailNaming::ByContrast {
        crate::warn!("a subtype appears in several contrasts; gene lists are prefixed with the contrast");
    }
    naming
}

fn run_contrasts(args: &ContrastArgs) -> Result<(), AnalysisError> {
    let profile = args.profile();
    let bundle = load(&args.input, &profile)?;
    let vocabulary = args.input.vocabulary();
    let store = DirGeneListStore::new(&args.input.out);
    let analysis = Analysis {
        inputs: AnalysisInputs::from_bundle(&bundle),
        profile: &profile,
        subtypes: &vocabulary,
        store: &store,
        out_dir: &args.input.out,
    };

    let mut summary = summary_for("contrast", &bundle);
    let contrasts = args.contrasts();
    let naming = tail_naming(&contrasts);
    let mut tally = Tally::default();
    for contrast in &contrasts {
        let result = analysis.run_contrast(contrast, naming, !args.no_projection);
        if let Some(row) = tally.keep(&format!("contrast {contrast}"), result) {
            summary.contrasts.push(row);
        }
    }
    write_reports(&summary, &args.input.out)?;
    tally.finish()
}

fn run_centroids(args: &InputArgs) -> Result<(), AnalysisError> {
    let profile = args.profile();
    let bundle = load(args, &profile)?;
    let vocabulary = args.vocabulary();
    let store = DirGeneListStore::new(&args.out);
    let analysis = Analysis {
        inputs: AnalysisInputs::from_bundle(&bundle),
        profile: &profile,
        subtypes: &vocabulary,
        store: &store,
        out_dir: &args.out,
    };
    let mut summary = summary_for("centroids", &bundle);
    summary.subtypes = analysis.group_sizes()?;
    analysis.run_centroids()?;
    write_reports(&summary, &args.out)
}

fn run_high_weight(args: &HighWeightArgs) -> Result<(), AnalysisError> {
    let profile = SelectionProfile {
        empirical_sd: args.sd_level,
        ..args.input.profile()
    };
    let bundle = load(&args.input, &profile)?;
    let vocabulary = args.input.vocabulary();
    let store = DirGeneListStore::new(&args.input.out);
    let analysis = Analysis {
        inputs: AnalysisInputs::from_bundle(&bundle),
        profile: &profile,
        subtypes: &vocabulary,
        store: &store,
        out_dir: &args.input.out,
    };

    let mut summary = summary_for("high-weight", &bundle);
    let mut tally = Tally::default();
    for subtype in &args.targets {
        let result = analysis.run_high_weight(subtype);
        if let Some(row) = tally.keep(&format!("high-weight {subtype}"), result) {
            summary.high_weight.push(row);
        }
    }
    write_reports(&summary, &args.input.out)?;
    tally.finish()
}

fn run_cluster(args: &InputArgs) -> Result<(), AnalysisError> {
    let profile = args.profile();
    let bundle = load(args, &profile)?;
    let vocabulary = args.vocabulary();
    let store = DirGeneListStore::new(&args.out);
    let analysis = Analysis {
        inputs: AnalysisInputs::from_bundle(&bundle),
        profile: &profile,
        subtypes: &vocabulary,
        store: &store,
        out_dir: &args.out,
    };
    let mut summary = summary_for("cluster-quality", &bundle);
    summary.subtypes = analysis.group_sizes()?;
    summary.cluster_scores = analysis.run_cluster_quality(&NearestCentroidScorer)?;
    write_reports(&summary, &args.out)
}

fn run_compare(args: &CompareArgs) -> Result<(), AnalysisError> {
    let mut summary = SummaryData::new("compare", 0, 0);
    summary.comparisons = match (&args.ours, &args.theirs) {
        (Some(ours), Some(theirs)) => vec![compare_files(ours, theirs)?],
        _ => {
            let reference_dir = args.reference_dir.as_ref().ok_or_else(|| {
                crate::input::InputError::MissingInput(
                    "--reference-dir is required without --ours/--theirs".to_string(),
                )
            })?;
            let ours_dir = args.ours_dir.as_ref().unwrap_or(&args.out);
            compare_with_plan(ours_dir, reference_dir, args.plan.as_deref())?
        }
    };
    write_reports(&summary, &args.out)
}

fn compare_files(ours: &Path, theirs: &Path) -> Result<ComparisonRow, AnalysisError> {
    let overlap = compare(&parse_gene_names(ours)?, &parse_gene_names(theirs)?);
    crate::info!(
        "overlap | ours | theirs: {} | {} | {}",
        overlap.overlap,
        overlap.ours_size,
        overlap.theirs_size
    );
    Ok(ComparisonRow {
        ours: ours.display().to_string(),
        theirs: theirs.display().to_string(),
        overlap,
    })
}

fn compare_with_plan(
    ours_dir: &Path,
    reference_dir: &Path,
    plan: Option<&Path>,
) -> Result<Vec<ComparisonRow>, AnalysisError> {
    let plan = match plan {
        Some(path) => load_plan(path)?,
        None => default_reference_plan(),
    };
    let ours = DirGeneListStore::new(ours_dir);
    let theirs = DirGeneListStore::new(reference_dir);
    Ok(run_comparisons(&ours, &theirs, &plan)?)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;

pub mod gene_list;
pub mod json;
pub mod text;

use serde::Serialize;

use crate::pipeline::stage5_cluster::ClusterScoreRow;
use crate::pipeline::stage6_compare::ComparisonRow;

#[derive(Debug, Clone, Serialize)]
pub struct GroupSize {
    pub subtype: String,
    pub n_samples: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContrastSummary {
    pub first: String,
    pub second: String,
    pub n_first: usize,
    pub n_second: usize,
    pub n_genes: usize,
    pub sd_level: f64,
    pub cutoff: usize,
    pub skewness: f64,
    pub diff_mean: f64,
    pub diff_sd: f64,
    pub positive_count: usize,
    pub negative_count: usize,
    pub positive_file: String,
    pub negative_file: String,
    pub histogram_file: String,
    pub projection_file: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HighWeightSummary {
    pub subtype: String,
    pub sd_level: f64,
    pub mean: f64,
    pub sd: f64,
    pub positive_count: usize,
    pub negative_count: usize,
    pub file: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: String,
    pub version: String,
    pub command: String,
    pub n_samples: usize,
    pub latent_dim: usize,
    pub n_genes: Option<usize>,
    pub subtypes: Vec<GroupSize>,
    pub contrasts: Vec<ContrastSummary>,
    pub high_weight: Vec<HighWeightSummary>,
    pub cluster_scores: Vec<ClusterScoreRow>,
    pub comparisons: Vec<ComparisonRow>,
}

impl SummaryData {
    pub fn new(command: &str, n_samples: usize, latent_dim: usize) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: command.to_string(),
            n_samples,
            latent_dim,
            n_genes: None,
            subtypes: Vec::new(),
            contrasts: Vec::new(),
            high_weight: Vec::new(),
            cluster_scores: Vec::new(),
            comparisons: Vec::new(),
        }
    }
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

use serde::Serialize;

use crate::model::CapabilityError;
use crate::model::matrix::DenseMatrix;
use crate::model::scorer::ClusterScorer;
use crate::model::subtypes::SubtypeGroup;
use crate::pipeline::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureSpace {
    Latent,
    Raw,
}

impl FeatureSpace {
    pub fn label(self) -> &'static str {
        match self {
            FeatureSpace::Latent => "z space",
            FeatureSpace::Raw => "raw X",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterScoreRow {
    pub subtype: String,
    pub space: FeatureSpace,
    pub n_samples: usize,
    pub score: f64,
}

pub fn score_group(
    scorer: &dyn ClusterScorer,
    group: &SubtypeGroup,
    features: &DenseMatrix,
) -> Result<f64, AnalysisError> {
    if group.is_empty() {
        return Err(AnalysisError::EmptyGroup(group.name.clone()));
    }
    if let Some(&bad) = group.indices.iter().find(|&&i| i >= features.n_rows) {
        return Err(AnalysisError::DimensionMismatch(format!(
            "row index {} out of range for {} rows",
            bad, features.n_rows
        )));
    }
    let score = scorer.score(&group.indices, features)?;
    if !score.is_finite() || !(0.0..=1.0).contains(&score) {
        return Err(CapabilityError::new(
            "cluster scorer",
            format!("score {} for {} is outside [0, 1]", score, group.name),
        )
        .into());
    }
    Ok(score)
}

pub fn run_cluster_quality(
    scorer: &dyn ClusterScorer,
    groups: &[SubtypeGroup],
    spaces: &[(FeatureSpace, &DenseMatrix)],
) -> Result<Vec<ClusterScoreRow>, AnalysisError> {
    let mut rows = Vec::with_capacity(groups.len() * spaces.len());
    for (space, features) in spaces {
        crate::info!("cluster score in {} ({}):", space.label(), scorer.name());
        for group in groups {
            let score = score_group(scorer, group, features)?;
            crate::info!("{}: {}%", group.name, percent(score));
            rows.push(ClusterScoreRow {
                subtype: group.name.clone(),
                space: *space,
                n_samples: group.len(),
                score,
            });
        }
    }
    Ok(rows)
}

pub fn percent(score: f64) -> u32 {
    (score * 100.0) as u32
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_cluster.rs"]
mod tests;

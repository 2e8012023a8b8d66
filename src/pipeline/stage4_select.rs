use crate::model::stats::{mean, population_sd, standard_normal_cdf};
use crate::pipeline::AnalysisError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TailSelection {
    pub cutoff: usize,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SdSelection {
    pub mean: f64,
    pub sd: f64,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

// Number of genes expected beyond `sd_level` SDs under a normal model:
// `n - trunc(n * Phi(sd_level))`.
pub fn quantile_cutoff(n: usize, sd_level: f64) -> usize {
    let below = (n as f64 * standard_normal_cdf(sd_level)) as usize;
    n - below.min(n)
}

pub fn high_weight_genes_quantile(
    values: &[f64],
    header: &[String],
    sd_level: f64,
) -> Result<TailSelection, AnalysisError> {
    check_header(values, header)?;
    let n = values.len();
    let cutoff = quantile_cutoff(n, sd_level);
    if cutoff == 0 {
        return Ok(TailSelection::default());
    }

    let mut order = (0..n).collect::<Vec<_>>();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let negative = order[..cutoff]
        .iter()
        .map(|&i| header[i].clone())
        .collect();
    let positive = order[n - cutoff..]
        .iter()
        .rev()
        .map(|&i| header[i].clone())
        .collect();

    Ok(TailSelection {
        cutoff,
        positive,
        negative,
    })
}

pub fn high_weight_genes_by_sd(
    values: &[f64],
    header: &[String],
    sd_level: f64,
) -> Result<SdSelection, AnalysisError> {
    check_header(values, header)?;
    let m = mean(values);
    let sd = population_sd(values);
    let upper = m + sd_level * sd;
    let lower = m - sd_level * sd;

    let mut positive = Vec::new();
    let mut negative = Vec::new();
    for (value, gene) in values.iter().zip(header) {
        if *value > upper {
            positive.push(gene.clone());
        }
        if *value < lower {
            negative.push(gene.clone());
        }
    }

    Ok(SdSelection {
        mean: m,
        sd,
        positive,
        negative,
    })
}

fn check_header(values: &[f64], header: &[String]) -> Result<(), AnalysisError> {
    if values.len() != header.len() {
        return Err(AnalysisError::DimensionMismatch(format!(
            "vector has {} values, gene header has {} names",
            values.len(),
            header.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_select.rs"]
mod tests;

use crate::model::CapabilityError;
use crate::model::decoder::Decoder;
use crate::model::matrix::DenseMatrix;
use crate::model::stats::l2_norm;
use crate::model::subtypes::{Contrast, SubtypeGroup};
use crate::pipeline::AnalysisError;

#[derive(Debug, Clone)]
pub struct Differential {
    pub decoded_a: Vec<f64>,
    pub decoded_b: Vec<f64>,
    pub diff: Vec<f64>,
}

pub fn differential(
    centroid_a: &[f64],
    centroid_b: &[f64],
    decoder: &dyn Decoder,
) -> Result<Differential, AnalysisError> {
    if centroid_a.len() != centroid_b.len() {
        return Err(AnalysisError::DimensionMismatch(format!(
            "centroids have {} and {} dims",
            centroid_a.len(),
            centroid_b.len()
        )));
    }
    let mut decoded = decoder.decode_batch(&[centroid_a.to_vec(), centroid_b.to_vec()])?;
    if decoded.len() != 2 {
        return Err(CapabilityError::new(
            "decoder",
            format!("batch of 2 returned {} vectors", decoded.len()),
        )
        .into());
    }
    let decoded_b = decoded.pop().unwrap_or_default();
    let decoded_a = decoded.pop().unwrap_or_default();
    check_decoded(&decoded_a, decoder.output_dim())?;
    check_decoded(&decoded_b, decoder.output_dim())?;

    let diff = decoded_a
        .iter()
        .zip(&decoded_b)
        .map(|(a, b)| a - b)
        .collect();
    Ok(Differential {
        decoded_a,
        decoded_b,
        diff,
    })
}

pub fn decode_centroid(centroid: &[f64], decoder: &dyn Decoder) -> Result<Vec<f64>, AnalysisError> {
    let decoded = decoder.decode(centroid)?;
    check_decoded(&decoded, decoder.output_dim())?;
    Ok(decoded)
}

fn check_decoded(values: &[f64], expected: usize) -> Result<(), AnalysisError> {
    if values.len() != expected {
        return Err(CapabilityError::new(
            "decoder",
            format!("returned {} genes, expected {}", values.len(), expected),
        )
        .into());
    }
    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        return Err(CapabilityError::new(
            "decoder",
            format!("non-finite output at gene position {pos}"),
        )
        .into());
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ProjectedSample {
    pub subtype: String,
    pub sample_index: usize,
    pub value: f64,
}

pub fn attribute_projection(
    contrast: &Contrast,
    latent: &DenseMatrix,
    centroid_a: &[f64],
    centroid_b: &[f64],
    groups: &[SubtypeGroup],
) -> Result<Vec<ProjectedSample>, AnalysisError> {
    let axis = centroid_a
        .iter()
        .zip(centroid_b)
        .map(|(a, b)| a - b)
        .collect::<Vec<_>>();
    let norm = l2_norm(&axis);
    if norm == 0.0 || !norm.is_finite() {
        return Err(AnalysisError::DegenerateAxis(contrast.to_string()));
    }
    if axis.len() != latent.n_cols {
        return Err(AnalysisError::DimensionMismatch(format!(
            "attribute axis has {} dims, latent matrix has {}",
            axis.len(),
            latent.n_cols
        )));
    }
    let unit = axis.iter().map(|v| v / norm).collect::<Vec<_>>();

    let mut out = Vec::new();
    for group in groups {
        for &idx in &group.indices {
            if idx >= latent.n_rows {
                return Err(AnalysisError::DimensionMismatch(format!(
                    "row index {} out of range for {} rows",
                    idx, latent.n_rows
                )));
            }
            let value = latent
                .row(idx)
                .iter()
                .zip(&unit)
                .map(|(&z, u)| z as f64 * u)
                .sum();
            out.push(ProjectedSample {
                subtype: group.name.clone(),
                sample_index: idx,
                value,
            });
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_decode.rs"]
mod tests;

use crate::model::matrix::DenseMatrix;
use crate::model::subtypes::SubtypeGroup;
use crate::pipeline::AnalysisError;

#[derive(Debug, Clone)]
pub struct Centroid {
    pub subtype: String,
    pub n_samples: usize,
    pub values: Vec<f64>,
}

pub fn centroid(matrix: &DenseMatrix, indices: &[usize]) -> Result<Vec<f64>, AnalysisError> {
    if indices.is_empty() {
        return Err(AnalysisError::EmptyGroup(
            "centroid requested over zero rows".to_string(),
        ));
    }
    let mut sums = vec![0.0f64; matrix.n_cols];
    for &idx in indices {
        if idx >= matrix.n_rows {
            return Err(AnalysisError::DimensionMismatch(format!(
                "row index {} out of range for {} rows",
                idx, matrix.n_rows
            )));
        }
        for (acc, &v) in sums.iter_mut().zip(matrix.row(idx)) {
            *acc += v as f64;
        }
    }
    let n = indices.len() as f64;
    Ok(sums.into_iter().map(|s| s / n).collect())
}

pub fn group_centroid(
    matrix: &DenseMatrix,
    group: &SubtypeGroup,
) -> Result<Centroid, AnalysisError> {
    let values = centroid(matrix, &group.indices).map_err(|err| match err {
        AnalysisError::EmptyGroup(_) => AnalysisError::EmptyGroup(group.name.clone()),
        other => other,
    })?;
    Ok(Centroid {
        subtype: group.name.clone(),
        n_samples: group.len(),
        values,
    })
}

pub fn group_centroids(
    matrix: &DenseMatrix,
    groups: &[SubtypeGroup],
    preview_dims: usize,
) -> Result<Vec<Centroid>, AnalysisError> {
    let mut out = Vec::with_capacity(groups.len());
    for group in groups {
        let c = group_centroid(matrix, group)?;
        crate::info!("{} {}", c.subtype, format_preview(&c.values, preview_dims));
        out.push(c);
    }
    Ok(out)
}

pub fn format_preview(values: &[f64], dims: usize) -> String {
    let parts = values
        .iter()
        .take(dims)
        .map(|v| format!("{:.3}", v))
        .collect::<Vec<_>>();
    format!("[{}]", parts.join(" "))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_centroids.rs"]
mod tests;

use crate::model::CapabilityError;
use crate::model::matrix::DenseMatrix;

pub trait ClusterScorer {
    fn name(&self) -> &'static str;
    fn score(&self, indices: &[usize], features: &DenseMatrix) -> Result<f64, CapabilityError>;
}

// Balanced accuracy of assigning each row to the nearer of two centroids:
// the group's and the rest's (squared Euclidean distance, ties go to the rest).
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestCentroidScorer;

impl ClusterScorer for NearestCentroidScorer {
    fn name(&self) -> &'static str {
        "nearest-centroid balanced accuracy"
    }

    fn score(&self, indices: &[usize], features: &DenseMatrix) -> Result<f64, CapabilityError> {
        let n = features.n_rows;
        let dim = features.n_cols;
        let mut member = vec![false; n];
        for &i in indices {
            if i >= n {
                return Err(CapabilityError::new(
                    "cluster scorer",
                    format!("row index {i} out of range for {n} rows"),
                ));
            }
            member[i] = true;
        }
        let n_in = member.iter().filter(|&&m| m).count();
        let n_out = n - n_in;
        if n_in == 0 || n_out == 0 {
            return Err(CapabilityError::new(
                "cluster scorer",
                format!("need rows on both sides of the split (group {n_in}, rest {n_out})"),
            ));
        }

        let mut sum_in = vec![0.0f64; dim];
        let mut sum_out = vec![0.0f64; dim];
        for (row, &is_member) in member.iter().enumerate() {
            let target = if is_member { &mut sum_in } else { &mut sum_out };
            for (acc, &v) in target.iter_mut().zip(features.row(row)) {
                *acc += v as f64;
            }
        }
        let c_in = sum_in.iter().map(|s| s / n_in as f64).collect::<Vec<_>>();
        let c_out = sum_out.iter().map(|s| s / n_out as f64).collect::<Vec<_>>();

        let mut hit_in = 0usize;
        let mut hit_out = 0usize;
        for (row, &is_member) in member.iter().enumerate() {
            let values = features.row(row);
            let d_in = squared_distance(values, &c_in);
            let d_out = squared_distance(values, &c_out);
            let predicted_in = d_in < d_out;
            if predicted_in && is_member {
                hit_in += 1;
            } else if !predicted_in && !is_member {
                hit_out += 1;
            }
        }

        let score = 0.5 * (hit_in as f64 / n_in as f64 + hit_out as f64 / n_out as f64);
        Ok(score.clamp(0.0, 1.0))
    }
}

fn squared_distance(row: &[f32], centroid: &[f64]) -> f64 {
    row.iter()
        .zip(centroid)
        .map(|(&v, &c)| {
            let d = v as f64 - c;
            d * d
        })
        .sum()
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/scorer.rs"]
mod tests;

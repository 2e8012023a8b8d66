#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    pub n_rows: usize,
    pub n_cols: usize,
    pub values: Vec<f32>,
}

impl DenseMatrix {
    pub fn from_rows(rows: &[Vec<f32>]) -> Option<Self> {
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut values = Vec::with_capacity(rows.len() * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return None;
            }
            values.extend_from_slice(row);
        }
        Some(Self {
            n_rows: rows.len(),
            n_cols,
            values,
        })
    }

    pub fn row(&self, idx: usize) -> &[f32] {
        let start = idx * self.n_cols;
        &self.values[start..start + self.n_cols]
    }

    // Reorders rows; `order[i]` is the source row of output row `i`.
    pub fn select_rows(&self, order: &[usize]) -> Self {
        let mut values = Vec::with_capacity(order.len() * self.n_cols);
        for &src in order {
            values.extend_from_slice(self.row(src));
        }
        Self {
            n_rows: order.len(),
            n_cols: self.n_cols,
            values,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LabeledMatrix {
    pub sample_ids: Vec<String>,
    pub features: Vec<String>,
    pub matrix: DenseMatrix,
}

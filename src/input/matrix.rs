use std::collections::HashSet;
use std::path::Path;

use crate::input::InputError;
use crate::input::reader::{parse_f32, read_lines};
use crate::model::matrix::{DenseMatrix, LabeledMatrix};

// The header may or may not carry a name for the id column.
pub fn parse_sample_matrix(path: &Path) -> Result<LabeledMatrix, InputError> {
    let lines = read_lines(path)?;
    let mut iter = lines.into_iter();
    let (_, header_line) = iter
        .next()
        .ok_or_else(|| InputError::Parse(format!("{}: matrix file is empty", path.display())))?;
    let header: Vec<String> = header_line
        .split('\t')
        .map(|s| s.trim().to_string())
        .collect();

    let mut sample_ids = Vec::new();
    let mut rows: Vec<Vec<f32>> = Vec::new();
    let mut features: Option<Vec<String>> = None;
    let mut seen = HashSet::new();

    for (line_no, line) in iter {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 2 {
            return Err(InputError::Parse(format!(
                "{}: line {} has no values",
                path.display(),
                line_no
            )));
        }
        let n_values = fields.len() - 1;
        if features.is_none() {
            let names = if header.len() == n_values + 1 {
                header[1..].to_vec()
            } else if header.len() == n_values {
                header.clone()
            } else {
                return Err(InputError::DimensionMismatch(format!(
                    "{}: header has {} columns but line {} has {} values",
                    path.display(),
                    header.len(),
                    line_no,
                    n_values
                )));
            };
            features = Some(names);
        }
        let expected = features.as_ref().map_or(0, |names| names.len());
        if n_values != expected {
            return Err(InputError::DimensionMismatch(format!(
                "{}: line {} has {} values, expected {}",
                path.display(),
                line_no,
                n_values,
                expected
            )));
        }

        let sample_id = fields[0].trim().to_string();
        if sample_id.is_empty() {
            return Err(InputError::Parse(format!(
                "{}: empty sample id at line {}",
                path.display(),
                line_no
            )));
        }
        if !seen.insert(sample_id.clone()) {
            return Err(InputError::Parse(format!(
                "{}: duplicate sample id '{}' at line {}",
                path.display(),
                sample_id,
                line_no
            )));
        }

        let mut row = Vec::with_capacity(n_values);
        for raw in &fields[1..] {
            row.push(parse_f32(raw, path, line_no)?);
        }
        sample_ids.push(sample_id);
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(InputError::Parse(format!(
            "{}: matrix has no sample rows",
            path.display()
        )));
    }

    let features = features.unwrap_or_default();
    let matrix = DenseMatrix::from_rows(&rows).ok_or_else(|| {
        InputError::DimensionMismatch(format!("{}: ragged matrix rows", path.display()))
    })?;

    Ok(LabeledMatrix {
        sample_ids,
        features,
        matrix,
    })
}

pub fn parse_numeric_rows(path: &Path) -> Result<DenseMatrix, InputError> {
    let mut rows = Vec::new();
    for (line_no, line) in read_lines(path)? {
        if line.trim_start().starts_with('#') {
            continue;
        }
        let mut row = Vec::new();
        for raw in line.split(|c: char| c == '\t' || c == ',' || c == ' ') {
            if raw.trim().is_empty() {
                continue;
            }
            row.push(parse_f32(raw, path, line_no)?);
        }
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(InputError::Parse(format!(
            "{}: no numeric rows",
            path.display()
        )));
    }
    DenseMatrix::from_rows(&rows).ok_or_else(|| {
        InputError::DimensionMismatch(format!("{}: rows have different widths", path.display()))
    })
}

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

pub mod decoder;
pub mod genes;
pub mod matrix;
pub mod meta;
pub mod reader;

use decoder::load_dense_decoder;
use genes::{parse_gene_header, warn_duplicates};
use matrix::parse_sample_matrix;
use meta::{MetaColumns, Metadata, load_meta};

use crate::model::decoder::{Activation, DenseDecoder, Decoder};
use crate::model::matrix::{DenseMatrix, LabeledMatrix};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
}

#[derive(Debug, Clone, Default)]
pub struct InputPaths {
    pub latent: PathBuf,
    pub meta: PathBuf,
    pub raw: Option<PathBuf>,
    pub genes: Option<PathBuf>,
    pub decoder_weights: Option<PathBuf>,
    pub decoder_bias: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct InputBundle {
    pub sample_ids: Vec<String>,
    pub meta: Metadata,
    pub latent: DenseMatrix,
    pub raw: Option<DenseMatrix>,
    pub genes: Option<Vec<String>>,
    pub decoder: Option<DenseDecoder>,
}

impl InputBundle {
    pub fn n_samples(&self) -> usize {
        self.sample_ids.len()
    }

    pub fn latent_dim(&self) -> usize {
        self.latent.n_cols
    }
}

pub fn load_input(
    paths: &InputPaths,
    columns: &MetaColumns,
    activation: Activation,
) -> Result<InputBundle, InputError> {
    let latent = parse_sample_matrix(&paths.latent)?;
    crate::info!(
        "latent matrix: {} samples x {} dims ({})",
        latent.matrix.n_rows,
        latent.matrix.n_cols,
        paths.latent.display()
    );

    let meta = load_meta(&paths.meta, columns, &latent.sample_ids)?;
    if meta.is_empty() {
        return Err(InputError::MissingInput(format!(
            "{}: no samples",
            paths.latent.display()
        )));
    }
    check_rows("metadata", meta.len(), latent.matrix.n_rows)?;

    let raw = match &paths.raw {
        Some(path) => {
            let raw = parse_sample_matrix(path)?;
            crate::info!(
                "raw matrix: {} samples x {} features ({})",
                raw.matrix.n_rows,
                raw.matrix.n_cols,
                path.display()
            );
            Some(align_rows(raw, &latent.sample_ids)?)
        }
        None => None,
    };

    let genes = match (&paths.genes, &raw) {
        (Some(path), _) => Some(parse_gene_header(path)?),
        (None, Some(raw)) => {
            warn_duplicates(&raw.features);
            Some(raw.features.clone())
        }
        (None, None) => None,
    };

    let decoder = match &paths.decoder_weights {
        Some(path) => Some(load_dense_decoder(
            path,
            paths.decoder_bias.as_deref(),
            activation,
        )?),
        None => None,
    };

    if let Some(decoder) = &decoder {
        if decoder.input_dim() != latent.matrix.n_cols {
            return Err(InputError::DimensionMismatch(format!(
                "decoder expects {} latent dims, latent matrix has {}",
                decoder.input_dim(),
                latent.matrix.n_cols
            )));
        }
        if let Some(genes) = &genes {
            if genes.len() != decoder.output_dim() {
                return Err(InputError::DimensionMismatch(format!(
                    "gene header has {} names, decoder outputs {} genes",
                    genes.len(),
                    decoder.output_dim()
                )));
            }
        }
    }

    Ok(InputBundle {
        sample_ids: latent.sample_ids,
        meta,
        latent: latent.matrix,
        raw: raw.map(|r| r.matrix),
        genes,
        decoder,
    })
}

fn check_rows(what: &str, got: usize, expected: usize) -> Result<(), InputError> {
    if got != expected {
        return Err(InputError::DimensionMismatch(format!(
            "{what} has {got} rows, latent matrix has {expected}"
        )));
    }
    Ok(())
}

pub fn align_rows(
    matrix: LabeledMatrix,
    sample_ids: &[String],
) -> Result<LabeledMatrix, InputError> {
    check_rows("raw matrix", matrix.sample_ids.len(), sample_ids.len())?;
    if matrix.sample_ids == sample_ids {
        return Ok(matrix);
    }
    let position: HashMap<&str, usize> = matrix
        .sample_ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();
    let mut order = Vec::with_capacity(sample_ids.len());
    for id in sample_ids {
        let idx = position.get(id.as_str()).ok_or_else(|| {
            InputError::DimensionMismatch(format!("sample '{id}' missing from raw matrix"))
        })?;
        order.push(*idx);
    }
    Ok(LabeledMatrix {
        sample_ids: sample_ids.to_vec(),
        features: matrix.features,
        matrix: matrix.matrix.select_rows(&order),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;

use std::path::Path;

use crate::input::InputError;
use crate::input::matrix::parse_numeric_rows;
use crate::model::decoder::{Activation, DenseDecoder};

pub fn load_dense_decoder(
    weights_path: &Path,
    bias_path: Option<&Path>,
    activation: Activation,
) -> Result<DenseDecoder, InputError> {
    let kernel = parse_numeric_rows(weights_path)?;
    let bias = match bias_path {
        Some(path) => parse_numeric_rows(path)?.values,
        None => vec![0.0; kernel.n_cols],
    };
    crate::info!(
        "decoder: {} latent dims -> {} genes ({})",
        kernel.n_rows,
        kernel.n_cols,
        activation.name()
    );
    DenseDecoder::new(kernel, bias, activation)
        .map_err(|e| InputError::DimensionMismatch(e.to_string()))
}

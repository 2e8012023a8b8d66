use crate::model::CapabilityError;
use crate::model::matrix::DenseMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Sigmoid,
    Linear,
}

impl Activation {
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Linear => x,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Activation::Sigmoid => "sigmoid",
            Activation::Linear => "linear",
        }
    }
}

pub trait Decoder {
    fn input_dim(&self) -> usize;
    fn output_dim(&self) -> usize;
    fn decode(&self, latent: &[f64]) -> Result<Vec<f64>, CapabilityError>;

    fn decode_batch(&self, latents: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, CapabilityError> {
        latents.iter().map(|z| self.decode(z)).collect()
    }
}

#[derive(Debug, Clone)]
pub struct DenseDecoder {
    pub kernel: DenseMatrix,
    pub bias: Vec<f32>,
    pub activation: Activation,
}

impl DenseDecoder {
    pub fn new(
        kernel: DenseMatrix,
        bias: Vec<f32>,
        activation: Activation,
    ) -> Result<Self, CapabilityError> {
        if bias.len() != kernel.n_cols {
            return Err(CapabilityError::new(
                "decoder",
                format!(
                    "bias length {} does not match kernel width {}",
                    bias.len(),
                    kernel.n_cols
                ),
            ));
        }
        Ok(Self {
            kernel,
            bias,
            activation,
        })
    }
}

impl Decoder for DenseDecoder {
    fn input_dim(&self) -> usize {
        self.kernel.n_rows
    }

    fn output_dim(&self) -> usize {
        self.kernel.n_cols
    }

    fn decode(&self, latent: &[f64]) -> Result<Vec<f64>, CapabilityError> {
        if latent.len() != self.kernel.n_rows {
            return Err(CapabilityError::new(
                "decoder",
                format!(
                    "latent vector has {} dims, decoder expects {}",
                    latent.len(),
                    self.kernel.n_rows
                ),
            ));
        }
        let mut out = self.bias.iter().map(|&b| b as f64).collect::<Vec<_>>();
        for (d, &z) in latent.iter().enumerate() {
            if z == 0.0 {
                continue;
            }
            for (acc, &w) in out.iter_mut().zip(self.kernel.row(d)) {
                *acc += z * w as f64;
            }
        }
        for v in &mut out {
            *v = self.activation.apply(*v);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/decoder.rs"]
mod tests;

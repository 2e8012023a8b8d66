use crate::model::decoder::Activation;

#[derive(Debug, Clone)]
pub struct SelectionProfile {
    pub quantile_sd: f64,
    pub empirical_sd: f64,
    pub histogram_bins: usize,
    pub centroid_preview_dims: usize,
    pub decoder_activation: Activation,
}

impl SelectionProfile {
    pub fn default_v1() -> Self {
        Self {
            quantile_sd: 2.5,
            empirical_sd: 2.0,
            histogram_bins: 20,
            centroid_preview_dims: 10,
            decoder_activation: Activation::Sigmoid,
        }
    }
}

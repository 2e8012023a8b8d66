use crate::pipeline::AnalysisError;
use crate::pipeline::stage4_select::{
    high_weight_genes_by_sd, high_weight_genes_quantile, quantile_cutoff,
};

fn header(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("G{i}")).collect()
}

#[test]
fn test_quantile_cutoff_values() {
    assert_eq!(quantile_cutoff(100, 2.5), 1);
    assert_eq!(quantile_cutoff(1000, 2.0), 23);
    assert_eq!(quantile_cutoff(100, 0.0), 50);
    assert_eq!(quantile_cutoff(0, 2.5), 0);
}

#[test]
fn test_quantile_cutoff_truncates_instead_of_rounding() {
    // 10 * Phi(2.5) = 9.938 -> 9, so one gene per tail (rounding would give 0)
    assert_eq!(quantile_cutoff(10, 2.5), 1);
}

#[test]
fn test_quantile_cutoff_extremes() {
    assert_eq!(quantile_cutoff(100, 40.0), 0);
    assert_eq!(quantile_cutoff(100, -40.0), 100);
}

#[test]
fn test_rank_selection_picks_single_extremes_for_n100() {
    let genes = header(100);
    let mut values = (0..100).map(|i| ((i * 37) % 100) as f64 / 10.0 - 5.0).collect::<Vec<_>>();
    values[42] = 100.0;
    values[7] = -100.0;
    let sel = high_weight_genes_quantile(&values, &genes, 2.5).unwrap();
    assert_eq!(sel.cutoff, 1);
    assert_eq!(sel.positive, vec!["G42".to_string()]);
    assert_eq!(sel.negative, vec!["G7".to_string()]);
}

#[test]
fn test_rank_selection_order_most_extreme_first() {
    let genes = header(6);
    let values = vec![0.5, -3.0, 2.0, -1.0, 4.0, 0.0];
    // 6 * Phi(0.5) = 4.15 -> 4, cutoff 2
    let sel = high_weight_genes_quantile(&values, &genes, 0.5).unwrap();
    assert_eq!(sel.cutoff, 2);
    assert_eq!(sel.positive, vec!["G4".to_string(), "G2".to_string()]);
    assert_eq!(sel.negative, vec!["G1".to_string(), "G3".to_string()]);
}

#[test]
fn test_rank_selection_zero_cutoff_is_empty_not_error() {
    let genes = header(100);
    let values = (0..100).map(|i| i as f64).collect::<Vec<_>>();
    let sel = high_weight_genes_quantile(&values, &genes, 50.0).unwrap();
    assert_eq!(sel.cutoff, 0);
    assert!(sel.positive.is_empty());
    assert!(sel.negative.is_empty());
}

#[test]
fn test_rank_selection_header_mismatch() {
    let err = high_weight_genes_quantile(&[1.0, 2.0], &header(3), 2.5).unwrap_err();
    assert!(matches!(err, AnalysisError::DimensionMismatch(_)));
    let err = high_weight_genes_by_sd(&[1.0, 2.0], &header(1), 2.0).unwrap_err();
    assert!(matches!(err, AnalysisError::DimensionMismatch(_)));
}

#[test]
fn test_sd_selection_excludes_value_exactly_at_threshold() {
    // mean 0, population SD exactly 1
    let values = vec![2.0, -2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    let sel = high_weight_genes_by_sd(&values, &header(8), 2.0).unwrap();
    assert_eq!(sel.mean, 0.0);
    assert_eq!(sel.sd, 1.0);
    assert!(sel.positive.is_empty());
    assert!(sel.negative.is_empty());
}

#[test]
fn test_sd_selection_includes_value_just_beyond_threshold() {
    let values = vec![2.0, -2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    let sel = high_weight_genes_by_sd(&values, &header(8), 1.99).unwrap();
    assert_eq!(sel.positive, vec!["G0".to_string()]);
    assert_eq!(sel.negative, vec!["G1".to_string()]);
}

#[test]
fn test_sd_selection_is_variable_sized() {
    let values = vec![2.01, -2.01, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    let sel = high_weight_genes_by_sd(&values, &header(10), 2.0).unwrap();
    assert!(2.01 > sel.mean + 2.0 * sel.sd);
    assert_eq!(sel.positive, vec!["G0".to_string()]);
    assert_eq!(sel.negative, vec!["G1".to_string()]);

    let flat = vec![1.0; 10];
    let sel = high_weight_genes_by_sd(&flat, &header(10), 2.0).unwrap();
    assert!(sel.positive.is_empty() && sel.negative.is_empty());
}

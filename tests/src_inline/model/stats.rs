use crate::model::stats::{
    histogram, l2_norm, mean, population_sd, skewness, standard_normal_cdf,
};

#[test]
fn test_normal_cdf_reference_values() {
    assert!((standard_normal_cdf(0.0) - 0.5).abs() < 1e-12);
    assert!((standard_normal_cdf(2.5) - 0.993_790_334_674_224).abs() < 1e-9);
    assert!((standard_normal_cdf(-1.0) - 0.158_655_253_931_457).abs() < 1e-9);
    assert_eq!(standard_normal_cdf(40.0), 1.0);
}

#[test]
fn test_mean_and_population_sd() {
    let v = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    assert_eq!(mean(&v), 5.0);
    assert_eq!(population_sd(&v), 2.0);
    assert_eq!(mean(&[]), 0.0);
    assert_eq!(population_sd(&[]), 0.0);
}

#[test]
fn test_skewness_sign_and_symmetry() {
    assert!(skewness(&[1.0, 2.0, 3.0, 4.0, 5.0]).abs() < 1e-12);
    assert!(skewness(&[0.0, 0.0, 0.0, 0.0, 10.0]) > 0.0);
    assert!(skewness(&[0.0, 10.0, 10.0, 10.0, 10.0]) < 0.0);
    assert_eq!(skewness(&[3.0, 3.0, 3.0]), 0.0);
}

#[test]
fn test_skewness_known_value() {
    let v = vec![1.0, 2.0, 3.0, 10.0];
    let m = 4.0;
    let m2 = ((1.0f64 - m).powi(2) + (2.0f64 - m).powi(2) + (3.0f64 - m).powi(2) + 36.0) / 4.0;
    let m3 = ((1.0f64 - m).powi(3) + (2.0f64 - m).powi(3) + (3.0f64 - m).powi(3) + 216.0) / 4.0;
    assert!((skewness(&v) - m3 / m2.powf(1.5)).abs() < 1e-12);
}

#[test]
fn test_histogram_counts_cover_all_values() {
    let v = vec![0.0, 0.1, 0.5, 0.9, 1.0];
    let h = histogram(&v, 2);
    assert_eq!(h.edges, vec![0.0, 0.5, 1.0]);
    assert_eq!(h.counts, vec![2, 3]);
    assert_eq!(h.counts.iter().sum::<usize>(), v.len());
}

#[test]
fn test_histogram_constant_input() {
    let h = histogram(&[2.0, 2.0, 2.0], 4);
    assert_eq!(h.counts.iter().sum::<usize>(), 3);
    assert!(histogram(&[], 4).counts.is_empty());
}

#[test]
fn test_l2_norm() {
    assert_eq!(l2_norm(&[3.0, 4.0]), 5.0);
}

use super::*;
use crate::model::stats::histogram;
use crate::report::ContrastSummary;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!(
        "latentdiff_report_test_{}_{}",
        std::process::id(),
        id
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_centroids_tsv_layout() {
    let dir = make_temp_dir();
    let path = dir.join(CENTROIDS_TSV);
    let centroids = vec![
        Centroid {
            subtype: "Mesenchymal".to_string(),
            n_samples: 2,
            values: vec![0.5, -1.0],
        },
        Centroid {
            subtype: "Immunoreactive".to_string(),
            n_samples: 3,
            values: vec![0.0, 2.25],
        },
    ];
    write_centroids_tsv(&path, &centroids).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "subtype\tn_samples\tz1\tz2");
    assert_eq!(lines[1], "Mesenchymal\t2\t0.500000\t-1.000000");
    assert_eq!(lines[2], "Immunoreactive\t3\t0.000000\t2.250000");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_histogram_tsv_has_one_row_per_bin() {
    let dir = make_temp_dir();
    let path = dir.join("hist.tsv");
    let hist = histogram(&[0.0, 0.25, 0.5, 1.0], 2);
    write_histogram_tsv(&path, &hist).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "bin_start\tbin_end\tcount");
    assert_eq!(lines.len(), 3);
    let total: usize = lines[1..]
        .iter()
        .map(|l| l.split('\t').nth(2).unwrap().parse::<usize>().unwrap())
        .sum();
    assert_eq!(total, 4);
    assert!(lines[1].starts_with("0.000000\t0.500000\t"));
}

#[test]
fn test_projection_tsv_uses_sample_ids() {
    let dir = make_temp_dir();
    let path = dir.join("proj.tsv");
    let projection = vec![
        ProjectedSample {
            subtype: "Mesenchymal".to_string(),
            sample_index: 1,
            value: 1.5,
        },
        ProjectedSample {
            subtype: "Proliferative".to_string(),
            sample_index: 0,
            value: -0.25,
        },
    ];
    let ids = vec!["TCGA-01".to_string(), "TCGA-02".to_string()];
    write_projection_tsv(&path, &projection, &ids).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "subtype\tsample\tvalue\nMesenchymal\tTCGA-02\t1.500000\nProliferative\tTCGA-01\t-0.250000\n"
    );
}

#[test]
fn test_write_reports_creates_both_files() {
    let dir = make_temp_dir().join("nested");
    let mut summary = SummaryData::new("contrast", 6, 3);
    summary.n_genes = Some(5);
    summary.contrasts.push(ContrastSummary {
        first: "Mesenchymal".to_string(),
        second: "Immunoreactive".to_string(),
        n_first: 3,
        n_second: 3,
        n_genes: 5,
        sd_level: 2.5,
        cutoff: 0,
        skewness: 0.0,
        diff_mean: 0.0,
        diff_sd: 0.0,
        positive_count: 0,
        negative_count: 0,
        positive_file: "mesenchymal_genes_sd.txt".to_string(),
        negative_file: "immunoreactive_genes_sd.txt".to_string(),
        histogram_file: "mesenchymal_immunoreactive_diff_hist.tsv".to_string(),
        projection_file: None,
    });
    write_reports(&summary, &dir).unwrap();

    let json = std::fs::read_to_string(dir.join(SUMMARY_JSON)).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["contrasts"][0]["cutoff"], 0);
    assert_eq!(v["n_genes"], 5);

    let report = std::fs::read_to_string(dir.join(REPORT_TXT)).unwrap();
    assert!(report.contains("Contrast Mesenchymal - Immunoreactive"));
    assert!(report.contains("0 mesenchymal, 0 immunoreactive"));
}

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::stats::Histogram;
use crate::pipeline::AnalysisError;
use crate::pipeline::stage2_centroids::Centroid;
use crate::pipeline::stage3_decode::ProjectedSample;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{SummaryData, format_f64_6};

pub const SUMMARY_JSON: &str = "summary.json";
pub const REPORT_TXT: &str = "report.txt";
pub const CENTROIDS_TSV: &str = "centroids.tsv";

pub fn write_reports(summary: &SummaryData, out_dir: &Path) -> Result<(), AnalysisError> {
    fs::create_dir_all(out_dir)?;

    let json = render_summary_json(summary)?;
    write_text(&out_dir.join(SUMMARY_JSON), &json)?;

    let report = render_report_text(summary);
    write_text(&out_dir.join(REPORT_TXT), &report)?;

    crate::info!(
        "wrote {} and {} to {}",
        SUMMARY_JSON,
        REPORT_TXT,
        out_dir.display()
    );
    Ok(())
}

pub fn write_centroids_tsv(path: &Path, centroids: &[Centroid]) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let dims = centroids.first().map(|c| c.values.len()).unwrap_or(0);
    let mut header = vec!["subtype".to_string(), "n_samples".to_string()];
    header.extend((1..=dims).map(|d| format!("z{d}")));
    writeln!(w, "{}", header.join("\t"))?;
    for c in centroids {
        let mut row = vec![c.subtype.clone(), c.n_samples.to_string()];
        row.extend(c.values.iter().map(|&v| format_f64_6(v)));
        writeln!(w, "{}", row.join("\t"))?;
    }
    w.flush()
}

pub fn write_histogram_tsv(path: &Path, hist: &Histogram) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "bin_start\tbin_end\tcount")?;
    for (i, count) in hist.counts.iter().enumerate() {
        writeln!(
            w,
            "{}\t{}\t{}",
            format_f64_6(hist.edges[i]),
            format_f64_6(hist.edges[i + 1]),
            count
        )?;
    }
    w.flush()
}

pub fn write_projection_tsv(
    path: &Path,
    projection: &[ProjectedSample],
    sample_ids: &[String],
) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "subtype\tsample\tvalue")?;
    for p in projection {
        let sample = sample_ids
            .get(p.sample_index)
            .map(String::as_str)
            .unwrap_or("");
        writeln!(w, "{}\t{}\t{}", p.subtype, sample, format_f64_6(p.value))?;
    }
    w.flush()
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage7_report.rs"]
mod tests;

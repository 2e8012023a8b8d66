use crate::pipeline::stage5_cluster::{FeatureSpace, percent};
use crate::report::{SummaryData, format_f64_6};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Latent Subtype Differential Report\n");
    out.push_str("==================================\n\n");
    out.push_str(&format!("Tool: {} {}\n", data.tool, data.version));
    out.push_str(&format!("Command: {}\n", data.command));
    out.push_str(&format!(
        "Samples: {}  Latent dims: {}  Genes: {}\n\n",
        data.n_samples,
        data.latent_dim,
        data.n_genes
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string())
    ));

    if !data.subtypes.is_empty() {
        out.push_str("Subtypes\n");
        for g in &data.subtypes {
            out.push_str(&format!("{}: {} samples\n", g.subtype, g.n_samples));
        }
        out.push('\n');
    }

    for c in &data.contrasts {
        out.push_str(&format!("Contrast {} - {}\n", c.first, c.second));
        out.push_str(&format!(
            "Groups: {} vs {} samples, {} genes\n",
            c.n_first, c.n_second, c.n_genes
        ));
        out.push_str(&format!(
            "Diff mean: {}  SD: {}\n",
            format_f64_6(c.diff_mean),
            format_f64_6(c.diff_sd)
        ));
        out.push_str(&format!("Skewness: {}\n", format_f64_6(c.skewness)));
        out.push_str(&format!(
            "Total genes {} standard deviation away (cutoff {}):\n",
            c.sd_level, c.cutoff
        ));
        out.push_str(&format!(
            "{} {}, {} {}\n",
            c.positive_count,
            c.first.to_ascii_lowercase(),
            c.negative_count,
            c.second.to_ascii_lowercase()
        ));
        out.push_str(&format!("Files: {}, {}\n\n", c.positive_file, c.negative_file));
    }

    if !data.high_weight.is_empty() {
        out.push_str("High-weight genes per decoded centroid\n");
        for h in &data.high_weight {
            out.push_str(&format!(
                "{}: mean {} SD {} -> {} above, {} below {} SD ({})\n",
                h.subtype,
                format_f64_6(h.mean),
                format_f64_6(h.sd),
                h.positive_count,
                h.negative_count,
                h.sd_level,
                h.file
            ));
        }
        out.push('\n');
    }

    for space in [FeatureSpace::Latent, FeatureSpace::Raw] {
        let rows = data
            .cluster_scores
            .iter()
            .filter(|r| r.space == space)
            .collect::<Vec<_>>();
        if rows.is_empty() {
            continue;
        }
        out.push_str(&format!("Cluster score in {}\n", space.label()));
        for r in rows {
            out.push_str(&format!("{}: {}%\n", r.subtype, percent(r.score)));
        }
        out.push('\n');
    }

    if !data.comparisons.is_empty() {
        out.push_str("Reference comparison (overlap | ours | theirs)\n");
        for c in &data.comparisons {
            out.push_str(&format!(
                "{} vs {}: {} | {} | {}\n",
                c.ours, c.theirs, c.overlap.overlap, c.overlap.ours_size, c.overlap.theirs_size
            ));
        }
    }

    out
}

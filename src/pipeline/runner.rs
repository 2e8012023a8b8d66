use std::collections::HashSet;
use std::path::Path;

use crate::input::InputBundle;
use crate::input::meta::Metadata;
use crate::model::decoder::Decoder;
use crate::model::matrix::DenseMatrix;
use crate::model::scorer::ClusterScorer;
use crate::model::stats::{histogram, mean, population_sd, skewness};
use crate::model::subtypes::{Contrast, SubtypeGroup, file_stem};
use crate::model::thresholds::SelectionProfile;
use crate::pipeline::AnalysisError;
use crate::pipeline::stage1_index::{groups_for, indices_for};
use crate::pipeline::stage2_centroids::{Centroid, group_centroid, group_centroids};
use crate::pipeline::stage3_decode::{attribute_projection, decode_centroid, differential};
use crate::pipeline::stage4_select::{high_weight_genes_by_sd, high_weight_genes_quantile};
use crate::pipeline::stage5_cluster::{ClusterScoreRow, FeatureSpace, run_cluster_quality};
use crate::pipeline::stage7_report::{
    CENTROIDS_TSV, write_centroids_tsv, write_histogram_tsv, write_projection_tsv,
};
use crate::report::gene_list::GeneListStore;
use crate::report::{ContrastSummary, GroupSize, HighWeightSummary};

#[derive(Clone, Copy)]
pub struct AnalysisInputs<'a> {
    pub sample_ids: &'a [String],
    pub meta: &'a Metadata,
    pub latent: &'a DenseMatrix,
    pub raw: Option<&'a DenseMatrix>,
    pub genes: Option<&'a [String]>,
    pub decoder: Option<&'a dyn Decoder>,
}

impl<'a> AnalysisInputs<'a> {
    pub fn from_bundle(bundle: &'a InputBundle) -> Self {
        Self {
            sample_ids: &bundle.sample_ids,
            meta: &bundle.meta,
            latent: &bundle.latent,
            raw: bundle.raw.as_ref(),
            genes: bundle.genes.as_deref(),
            decoder: bundle.decoder.as_ref().map(|d| d as &dyn Decoder),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailNaming {
    // `<first>_genes_sd.txt` and `<second>_genes_sd.txt`; the reference plan reads these.
    BySubtype,
    // Prefixed with the contrast slug, for runs where a subtype sits in several contrasts.
    ByContrast,
}

impl TailNaming {
    pub fn for_contrasts(contrasts: &[Contrast]) -> Self {
        let mut seen = HashSet::new();
        for c in contrasts {
            for name in [&c.first, &c.second] {
                if !seen.insert(file_stem(name)) {
                    return TailNaming::ByContrast;
                }
            }
        }
        TailNaming::BySubtype
    }

    pub fn tail_files(self, contrast: &Contrast) -> (String, String) {
        let first = file_stem(&contrast.first);
        let second = file_stem(&contrast.second);
        match self {
            TailNaming::BySubtype => (
                format!("{first}_genes_sd.txt"),
                format!("{second}_genes_sd.txt"),
            ),
            TailNaming::ByContrast => {
                let slug = contrast.slug();
                (
                    format!("{slug}_{first}_genes_sd.txt"),
                    format!("{slug}_{second}_genes_sd.txt"),
                )
            }
        }
    }
}

pub struct Analysis<'a> {
    pub inputs: AnalysisInputs<'a>,
    pub profile: &'a SelectionProfile,
    pub subtypes: &'a [String],
    pub store: &'a dyn GeneListStore,
    pub out_dir: &'a Path,
}

impl<'a> Analysis<'a> {
    fn decoder(&self) -> Result<(&'a dyn Decoder, &'a [String]), AnalysisError> {
        let decoder = self.inputs.decoder.ok_or_else(|| {
            crate::input::InputError::MissingInput("--decoder-weights is required".to_string())
        })?;
        let genes = self.inputs.genes.ok_or_else(|| {
            crate::input::InputError::MissingInput(
                "gene header (--genes or --raw) is required".to_string(),
            )
        })?;
        Ok((decoder, genes))
    }

    pub fn group_sizes(&self) -> Result<Vec<GroupSize>, AnalysisError> {
        Ok(groups_for(self.inputs.meta, self.subtypes)?
            .into_iter()
            .map(|g| GroupSize {
                n_samples: g.len(),
                subtype: g.name,
            })
            .collect())
    }

    pub fn run_centroids(&self) -> Result<Vec<Centroid>, AnalysisError> {
        let groups = groups_for(self.inputs.meta, self.subtypes)?;
        let centroids = group_centroids(
            self.inputs.latent,
            &groups,
            self.profile.centroid_preview_dims,
        )?;
        std::fs::create_dir_all(self.out_dir)?;
        write_centroids_tsv(&self.out_dir.join(CENTROIDS_TSV), &centroids)?;
        Ok(centroids)
    }

    pub fn run_contrast(
        &self,
        contrast: &Contrast,
        naming: TailNaming,
        project: bool,
    ) -> Result<ContrastSummary, AnalysisError> {
        let (decoder, genes) = self.decoder()?;
        crate::info!("contrast {}", contrast);

        let groups = groups_for(
            self.inputs.meta,
            &[contrast.first.as_str(), contrast.second.as_str()],
        )?;
        let a = group_centroid(self.inputs.latent, &groups[0])?;
        let b = group_centroid(self.inputs.latent, &groups[1])?;

        let diff = differential(&a.values, &b.values, decoder)?;
        crate::info!(
            "decoded centroid means: {} {:.4}, {} {:.4}",
            contrast.first,
            mean(&diff.decoded_a),
            contrast.second,
            mean(&diff.decoded_b)
        );
        let skew = skewness(&diff.diff);
        let diff_mean = mean(&diff.diff);
        let diff_sd = population_sd(&diff.diff);
        crate::info!("skewness: {}", skew);

        std::fs::create_dir_all(self.out_dir)?;
        let slug = contrast.slug();
        let histogram_file = format!("{slug}_diff_hist.tsv");
        let hist = histogram(&diff.diff, self.profile.histogram_bins);
        write_histogram_tsv(&self.out_dir.join(&histogram_file), &hist)?;

        let projection_file = if project {
            let groups = self.projection_groups()?;
            let projection =
                attribute_projection(contrast, self.inputs.latent, &a.values, &b.values, &groups)?;
            let name = format!("{slug}_projection.tsv");
            write_projection_tsv(
                &self.out_dir.join(&name),
                &projection,
                self.inputs.sample_ids,
            )?;
            Some(name)
        } else {
            None
        };

        let sd_level = self.profile.quantile_sd;
        let selection = high_weight_genes_quantile(&diff.diff, genes, sd_level)?;
        let (positive_file, negative_file) = naming.tail_files(contrast);
        self.store.write(&positive_file, &selection.positive)?;
        self.store.write(&negative_file, &selection.negative)?;

        crate::info!("total genes {} standard deviation away:", sd_level);
        crate::info!(
            "{} {}, {} {}",
            selection.positive.len(),
            file_stem(&contrast.first),
            selection.negative.len(),
            file_stem(&contrast.second)
        );

        Ok(ContrastSummary {
            first: contrast.first.clone(),
            second: contrast.second.clone(),
            n_first: a.n_samples,
            n_second: b.n_samples,
            n_genes: diff.diff.len(),
            sd_level,
            cutoff: selection.cutoff,
            skewness: skew,
            diff_mean,
            diff_sd,
            positive_count: selection.positive.len(),
            negative_count: selection.negative.len(),
            positive_file,
            negative_file,
            histogram_file,
            projection_file,
        })
    }

    pub fn run_high_weight(&self, subtype: &str) -> Result<HighWeightSummary, AnalysisError> {
        let (decoder, genes) = self.decoder()?;
        let group = SubtypeGroup {
            name: subtype.to_string(),
            indices: indices_for(self.inputs.meta, subtype)?,
        };
        let c = group_centroid(self.inputs.latent, &group)?;
        let decoded = decode_centroid(&c.values, decoder)?;

        let sd_level = self.profile.empirical_sd;
        let selection = high_weight_genes_by_sd(&decoded, genes, sd_level)?;
        crate::info!("{}: mean {}, SD {}", subtype, selection.mean, selection.sd);

        let file = format!("{}_genes.txt", file_stem(subtype));
        self.store.write(&file, &selection.positive)?;

        Ok(HighWeightSummary {
            subtype: subtype.to_string(),
            sd_level,
            mean: selection.mean,
            sd: selection.sd,
            positive_count: selection.positive.len(),
            negative_count: selection.negative.len(),
            file,
        })
    }

    pub fn run_cluster_quality(
        &self,
        scorer: &dyn ClusterScorer,
    ) -> Result<Vec<ClusterScoreRow>, AnalysisError> {
        let groups = groups_for(self.inputs.meta, self.subtypes)?;
        let mut spaces = vec![(FeatureSpace::Latent, self.inputs.latent)];
        match self.inputs.raw {
            Some(raw) => spaces.push((FeatureSpace::Raw, raw)),
            None => crate::warn!("no raw matrix given; cluster scores in latent space only"),
        }
        run_cluster_quality(scorer, &groups, &spaces)
    }

    fn projection_groups(&self) -> Result<Vec<SubtypeGroup>, AnalysisError> {
        let mut groups = Vec::with_capacity(self.subtypes.len());
        for name in self.subtypes {
            match indices_for(self.inputs.meta, name) {
                Ok(indices) => groups.push(SubtypeGroup {
                    name: name.clone(),
                    indices,
                }),
                Err(AnalysisError::UnknownSubtype(_)) => {
                    crate::warn!("subtype {} has no samples; left out of projection", name);
                }
                Err(other) => return Err(other),
            }
        }
        Ok(groups)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/runner.rs"]
mod tests;

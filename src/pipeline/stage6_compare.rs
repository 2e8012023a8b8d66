use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;

use crate::input::InputError;
use crate::input::reader::read_lines;
use crate::report::gene_list::GeneListStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overlap {
    pub overlap: usize,
    pub ours_size: usize,
    pub theirs_size: usize,
}

pub fn compare(ours: &[String], theirs: &[String]) -> Overlap {
    let lookup: HashSet<&str> = theirs.iter().map(String::as_str).collect();
    let ours_set: HashSet<&str> = ours.iter().map(String::as_str).collect();
    let overlap = ours_set.iter().filter(|g| lookup.contains(*g)).count();
    Overlap {
        overlap,
        ours_size: ours.len(),
        theirs_size: theirs.len(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonPair {
    pub ours: String,
    pub theirs: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub ours: String,
    pub theirs: String,
    #[serde(flatten)]
    pub overlap: Overlap,
}

pub fn default_reference_plan() -> Vec<ComparisonPair> {
    let ours = ["mesenchymal", "immunoreactive", "proliferative", "differentiated"];
    let nodes = ["87", "56", "56", "87", "79", "38", "38", "79"];
    let tails = ["pos", "neg"];
    (0..nodes.len())
        .map(|i| ComparisonPair {
            ours: format!("{}_genes_sd.txt", ours[i / 2]),
            theirs: format!("hgsc_node{}genes_{}.tsv", nodes[i], tails[i % 2]),
        })
        .collect()
}

pub fn load_plan(path: &Path) -> Result<Vec<ComparisonPair>, InputError> {
    let mut plan = Vec::new();
    for (line_no, line) in read_lines(path)? {
        if line.trim_start().starts_with('#') {
            continue;
        }
        let mut fields = line.split('\t').map(str::trim);
        match (fields.next(), fields.next()) {
            (Some(ours), Some(theirs)) if !ours.is_empty() && !theirs.is_empty() => {
                plan.push(ComparisonPair {
                    ours: ours.to_string(),
                    theirs: theirs.to_string(),
                });
            }
            _ => {
                return Err(InputError::Parse(format!(
                    "{}: line {} needs two tab-separated names",
                    path.display(),
                    line_no
                )));
            }
        }
    }
    Ok(plan)
}

pub fn run_comparisons(
    ours_store: &dyn GeneListStore,
    theirs_store: &dyn GeneListStore,
    plan: &[ComparisonPair],
) -> Result<Vec<ComparisonRow>, InputError> {
    let mut rows = Vec::with_capacity(plan.len());
    for pair in plan {
        let ours = ours_store.read(&pair.ours)?;
        let theirs = theirs_store.read(&pair.theirs)?;
        let overlap = compare(&ours, &theirs);
        crate::info!("comparing {} and {}:", pair.ours, pair.theirs);
        crate::info!(
            "overlap | ours | theirs: {} | {} | {}",
            overlap.overlap,
            overlap.ours_size,
            overlap.theirs_size
        );
        rows.push(ComparisonRow {
            ours: pair.ours.clone(),
            theirs: pair.theirs.clone(),
            overlap,
        });
    }
    Ok(rows)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_compare.rs"]
mod tests;

use std::collections::HashSet;
use std::path::Path;

use crate::input::InputError;
use crate::input::reader::read_lines;

pub fn parse_gene_names(path: &Path) -> Result<Vec<String>, InputError> {
    let mut genes = Vec::new();
    for (_, line) in read_lines(path)? {
        let name = line.split('\t').next().unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        genes.push(name.to_string());
    }
    Ok(genes)
}

pub fn parse_gene_header(path: &Path) -> Result<Vec<String>, InputError> {
    let genes = parse_gene_names(path)?;
    if genes.is_empty() {
        return Err(InputError::Parse(format!(
            "{}: gene header is empty",
            path.display()
        )));
    }
    warn_duplicates(&genes);
    Ok(genes)
}

pub fn warn_duplicates(genes: &[String]) {
    let mut seen = HashSet::new();
    for (idx, gene) in genes.iter().enumerate() {
        if !seen.insert(gene.as_str()) {
            crate::warn!(
                "duplicate gene name in header: position={}, gene={}",
                idx,
                gene
            );
        }
    }
}

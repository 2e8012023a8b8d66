use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::input::InputError;
use crate::input::genes::parse_gene_names;

pub trait GeneListStore {
    fn write(&self, name: &str, genes: &[String]) -> Result<PathBuf, InputError>;
    fn read(&self, name: &str) -> Result<Vec<String>, InputError>;
}

#[derive(Debug, Clone)]
pub struct DirGeneListStore {
    pub dir: PathBuf,
}

impl DirGeneListStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl GeneListStore for DirGeneListStore {
    fn write(&self, name: &str, genes: &[String]) -> Result<PathBuf, InputError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_of(name);
        write_gene_list(&path, genes)?;
        Ok(path)
    }

    fn read(&self, name: &str) -> Result<Vec<String>, InputError> {
        parse_gene_names(&self.path_of(name))
    }
}

pub fn write_gene_list(path: &Path, genes: &[String]) -> Result<(), InputError> {
    // Reads keep the trimmed first tab field, so anything else would not round-trip.
    if let Some(bad) = genes
        .iter()
        .find(|g| g.is_empty() || g.trim() != g.as_str() || g.contains(['\t', '\n', '\r']))
    {
        return Err(InputError::Parse(format!(
            "{}: gene name {:?} cannot be stored one per line",
            path.display(),
            bad
        )));
    }
    let mut w = BufWriter::new(File::create(path)?);
    for gene in genes {
        writeln!(w, "{}", gene)?;
    }
    w.flush()?;
    Ok(())
}

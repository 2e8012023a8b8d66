use std::collections::HashMap;
use std::path::Path;

use crate::input::InputError;
use crate::input::reader::read_lines;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRecord {
    pub sample_id: String,
    pub label: String,
}

#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub records: Vec<SampleRecord>,
}

impl Metadata {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.label.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct MetaColumns {
    pub id_column: String,
    pub label_column: String,
}

impl Default for MetaColumns {
    fn default() -> Self {
        Self {
            id_column: "sample_id".to_string(),
            label_column: "SUBTYPE".to_string(),
        }
    }
}

pub fn load_meta(
    path: &Path,
    columns: &MetaColumns,
    sample_ids: &[String],
) -> Result<Metadata, InputError> {
    let lines = read_lines(path)?;
    let mut iter = lines.into_iter();
    let (_, header_line) = iter
        .next()
        .ok_or_else(|| InputError::Parse("meta file is empty".to_string()))?;
    let header_cols: Vec<String> = header_line
        .split('\t')
        .map(|s| s.trim().to_string())
        .collect();

    let id_col = find_column(&header_cols, &columns.id_column).unwrap_or_else(|| {
        crate::warn!(
            "meta column '{}' not found; using first column as sample id",
            columns.id_column
        );
        0
    });
    let label_col = find_column(&header_cols, &columns.label_column).ok_or_else(|| {
        InputError::MissingInput(format!(
            "meta column '{}' not found in {}",
            columns.label_column,
            path.display()
        ))
    })?;

    let mut map: HashMap<String, String> = HashMap::new();
    for (line_no, line) in iter {
        let fields: Vec<&str> = line.split('\t').collect();
        let Some(sample_id) = fields.get(id_col).map(|s| s.trim()) else {
            crate::warn!("meta line has no sample id column; skipping (line {})", line_no);
            continue;
        };
        if sample_id.is_empty() {
            crate::warn!("meta line has empty sample id; skipping (line {})", line_no);
            continue;
        }
        if map.contains_key(sample_id) {
            crate::warn!(
                "duplicate sample id in metadata; keeping first (line {}, sample {})",
                line_no,
                sample_id
            );
            continue;
        }
        let label = fields.get(label_col).map(|s| s.trim()).unwrap_or("");
        map.insert(sample_id.to_string(), label.to_string());
    }

    let mut records = Vec::with_capacity(sample_ids.len());
    let mut missing = Vec::new();
    for id in sample_ids {
        match map.get(id) {
            Some(label) => records.push(SampleRecord {
                sample_id: id.clone(),
                label: label.clone(),
            }),
            None => missing.push(id.as_str()),
        }
    }
    if !missing.is_empty() {
        let preview = missing.iter().take(5).copied().collect::<Vec<_>>().join(", ");
        return Err(InputError::DimensionMismatch(format!(
            "{} of {} matrix samples have no metadata row (first: {})",
            missing.len(),
            sample_ids.len(),
            preview
        )));
    }
    if map.len() > records.len() {
        crate::warn!(
            "{} metadata rows have no matching matrix sample; ignoring them",
            map.len() - records.len()
        );
    }

    Ok(Metadata { records })
}

fn find_column(header: &[String], name: &str) -> Option<usize> {
    header
        .iter()
        .position(|col| col.eq_ignore_ascii_case(name))
}

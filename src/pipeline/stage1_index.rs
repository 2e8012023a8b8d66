use crate::input::meta::Metadata;
use crate::model::subtypes::SubtypeGroup;
use crate::pipeline::AnalysisError;

pub fn indices_for(meta: &Metadata, subtype: &str) -> Result<Vec<usize>, AnalysisError> {
    let indices = meta
        .labels()
        .enumerate()
        .filter(|(_, label)| *label == subtype)
        .map(|(i, _)| i)
        .collect::<Vec<_>>();
    if indices.is_empty() {
        return Err(AnalysisError::UnknownSubtype(subtype.to_string()));
    }
    Ok(indices)
}

pub fn groups_for<S: AsRef<str>>(
    meta: &Metadata,
    names: &[S],
) -> Result<Vec<SubtypeGroup>, AnalysisError> {
    let mut groups = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        let indices = indices_for(meta, name)?;
        crate::info!("subtype {}: {} samples", name, indices.len());
        groups.push(SubtypeGroup {
            name: name.to_string(),
            indices,
        });
    }
    Ok(groups)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_index.rs"]
mod tests;

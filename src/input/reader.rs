use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::input::InputError;

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path).map_err(|e| InputError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn read_lines(path: &Path) -> Result<Vec<(usize, String)>, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut lines = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end();
        if line.trim().is_empty() {
            continue;
        }
        lines.push((line_no, line.to_string()));
    }

    Ok(lines)
}

pub fn parse_f32(raw: &str, path: &Path, line_no: usize) -> Result<f32, InputError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(InputError::Parse(format!(
            "{}: non-finite value '{}' at line {}",
            path.display(),
            trimmed,
            line_no
        ))),
        Err(_) => Err(InputError::Parse(format!(
            "{}: invalid number '{}' at line {}",
            path.display(),
            trimmed,
            line_no
        ))),
    }
}

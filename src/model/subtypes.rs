use std::fmt;
use std::str::FromStr;

pub const HGSC_SUBTYPES: [&str; 4] = [
    "Mesenchymal",
    "Immunoreactive",
    "Proliferative",
    "Differentiated",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtypeGroup {
    pub name: String,
    pub indices: Vec<usize>,
}

impl SubtypeGroup {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

// Ordered subtype pair. Every differential is `first - second`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contrast {
    pub first: String,
    pub second: String,
}

impl Contrast {
    pub fn new(first: &str, second: &str) -> Self {
        Self {
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    pub fn slug(&self) -> String {
        format!("{}_{}", file_stem(&self.first), file_stem(&self.second))
    }
}

impl fmt::Display for Contrast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.first, self.second)
    }
}

impl FromStr for Contrast {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (first, second) = s
            .split_once(':')
            .ok_or_else(|| format!("invalid contrast '{s}' (use FIRST:SECOND)"))?;
        let first = first.trim();
        let second = second.trim();
        if first.is_empty() || second.is_empty() {
            return Err(format!("invalid contrast '{s}' (empty subtype name)"));
        }
        if first == second {
            return Err(format!("invalid contrast '{s}' (subtypes must differ)"));
        }
        Ok(Self::new(first, second))
    }
}

pub fn default_contrasts() -> Vec<Contrast> {
    vec![
        Contrast::new("Mesenchymal", "Immunoreactive"),
        Contrast::new("Proliferative", "Differentiated"),
    ]
}

pub fn file_stem(subtype: &str) -> String {
    subtype
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

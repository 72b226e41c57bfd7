use serde::Serialize;

use crate::error::BiomassError;

/// Ordered list of unique category labels.
///
/// Diagram node indices and report rows follow this order, so it is carried
/// explicitly instead of being recovered from map iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryOrder(Vec<String>);

impl CategoryOrder {
    pub fn new<I, S>(labels: I) -> Result<Self, BiomassError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into();
            if label.trim().is_empty() {
                return Err(BiomassError::InvalidData("empty category label".into()));
            }
            if out.contains(&label) {
                return Err(BiomassError::InvalidData(format!(
                    "duplicate category label: {label}"
                )));
            }
            out.push(label);
        }
        Ok(Self(out))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.0.iter().position(|l| l == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

use serde::{Deserialize, Serialize};

/// A concept as returned by `GET /conceptschemes/{scheme}/c/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawConcept {
    pub id: u64,
    pub uri: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub labels: Vec<RawLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLabel {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub language: String,
}

impl RawConcept {
    /// prefLabel in `language`, else any prefLabel, else the display label, else the id.
    pub fn preferred_label(&self, language: &str) -> String {
        let pref = || self.labels.iter().filter(|l| l.kind == "prefLabel");
        pref()
            .find(|l| l.language == language)
            .or_else(|| pref().next())
            .map(|l| l.label.clone())
            .or_else(|| self.label.clone())
            .unwrap_or_else(|| self.id.to_string())
    }
}

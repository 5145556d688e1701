use super::{analyze, SpeciesAnalysis, TraitSnapshot};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum NarratorError {
    #[error("remote narrator unavailable: {0}")]
    Unavailable(String),
    #[error("remote narrator credential missing")]
    MissingCredential,
    #[error("malformed remote analysis: {0}")]
    Malformed(String),
}

/// An optional remote text generator that may substitute its own species text.
pub trait Narrator {
    fn describe(&self, snapshot: &TraitSnapshot) -> Result<SpeciesAnalysis, NarratorError>;
}

/// Parse and validate a remote JSON payload. Every field must be present and non-blank.
pub fn parse_remote_analysis(json: &str) -> Result<SpeciesAnalysis, NarratorError> {
    let analysis: SpeciesAnalysis =
        serde_json::from_str(json).map_err(|e| NarratorError::Malformed(e.to_string()))?;
    let fields = [
        ("scientificName", &analysis.scientific_name),
        ("speciesName", &analysis.common_name),
        ("description", &analysis.description),
        ("temperament", &analysis.temperament),
    ];
    if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(NarratorError::Malformed(format!("`{name}` is empty")));
    }
    Ok(analysis)
}

/// Ask `narrator` first; any failure falls back to the local generator.
pub fn describe_with_fallback(
    narrator: Option<&dyn Narrator>,
    snapshot: &TraitSnapshot,
) -> SpeciesAnalysis {
    match narrator.map(|n| n.describe(snapshot)) {
        Some(Ok(analysis)) => analysis,
        Some(Err(err)) => {
            warn!(error = %err, "remote narrator failed, using local taxonomy");
            analyze(snapshot)
        }
        None => analyze(snapshot),
    }
}

//! Deterministic species naming.
//!
//! An agent's traits are bucketed into a [`SpeciesIdentity`] (colour family,
//! size and pitch tiers, genus theme), then rendered to text by choosing among
//! fixed templates with a salted hash of the quantized traits. No randomness:
//! identical inputs always yield byte-identical output.

mod classify;
mod lexicon;
mod names;
mod narrator;

pub use classify::{color_family, GenusTheme, PitchCategory, SizeCategory, SpeciesIdentity};
pub use lexicon::ColorFamily;
pub use narrator::{describe_with_fallback, parse_remote_analysis, Narrator, NarratorError};

use crate::agent::{Agent, BirdState};
use crate::color::Rgb;
use classify::TraitKey;
use serde::{Deserialize, Serialize};

/// The trait values that feed the classifier and synthesizer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraitSnapshot {
    pub color: Rgb,
    pub scale: f64,
    pub pitch: f64,
    pub state: BirdState,
    pub energy: f64,
}

impl From<&Agent> for TraitSnapshot {
    fn from(agent: &Agent) -> Self {
        Self {
            color: agent.traits.color,
            scale: agent.traits.scale,
            pitch: agent.traits.pitch,
            state: agent.state,
            energy: agent.energy,
        }
    }
}

/// Text identity of one agent. Field names on the wire match the remote
/// narrator's payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesAnalysis {
    pub scientific_name: String,
    #[serde(rename = "speciesName")]
    pub common_name: String,
    pub description: String,
    pub temperament: String,
}

/// Local generator. Pure and total.
pub fn analyze(snapshot: &TraitSnapshot) -> SpeciesAnalysis {
    let identity = SpeciesIdentity::classify(snapshot);
    let key = TraitKey::from(snapshot);
    SpeciesAnalysis {
        scientific_name: names::scientific_name(&identity, &key),
        common_name: names::common_name(&identity, &key),
        description: names::description(&identity, snapshot, &key),
        temperament: names::temperament(&identity, snapshot, &key),
    }
}

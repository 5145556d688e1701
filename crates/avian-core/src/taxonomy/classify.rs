use super::lexicon::{self, ColorFamily, COLOR_FAMILIES, FALLBACK_FAMILY};
use super::TraitSnapshot;
use crate::agent::BirdState;
use crate::color::Rgb;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
}

impl SizeCategory {
    pub fn of(scale: f64) -> Self {
        if scale < 0.8 {
            SizeCategory::Small
        } else if scale > 1.2 {
            SizeCategory::Large
        } else {
            SizeCategory::Medium
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SizeCategory::Small => "small",
            SizeCategory::Medium => "medium",
            SizeCategory::Large => "large",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchCategory {
    Low,
    Mid,
    High,
}

impl PitchCategory {
    pub fn of(pitch: f64) -> Self {
        if pitch < 500.0 {
            PitchCategory::Low
        } else if pitch > 1000.0 {
            PitchCategory::High
        } else {
            PitchCategory::Mid
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PitchCategory::Low => "low",
            PitchCategory::Mid => "mid",
            PitchCategory::High => "high",
        }
    }
}

/// Behavioural genus group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenusTheme {
    Vocal,
    Aerial,
    Ground,
    Temporal,
    Social,
    Speed,
}

impl GenusTheme {
    /// Themes with no priority rule; picked by hash.
    const HASHED: [GenusTheme; 3] = [GenusTheme::Temporal, GenusTheme::Social, GenusTheme::Speed];

    pub fn genera(self) -> &'static [&'static str; 4] {
        match self {
            GenusTheme::Vocal => &lexicon::VOCAL_GENERA,
            GenusTheme::Aerial => &lexicon::AERIAL_GENERA,
            GenusTheme::Ground => &lexicon::GROUND_GENERA,
            GenusTheme::Temporal => &lexicon::TEMPORAL_GENERA,
            GenusTheme::Social => &lexicon::SOCIAL_GENERA,
            GenusTheme::Speed => &lexicon::SPEED_GENERA,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GenusTheme::Vocal => "vocal",
            GenusTheme::Aerial => "aerial",
            GenusTheme::Ground => "ground",
            GenusTheme::Temporal => "temporal",
            GenusTheme::Social => "social",
            GenusTheme::Speed => "speed",
        }
    }
}

/// Discrete identity derived from continuous traits. Never stored.
#[derive(Clone, Copy)]
pub struct SpeciesIdentity {
    pub color_family: &'static ColorFamily,
    pub size: SizeCategory,
    pub pitch: PitchCategory,
    pub genus: GenusTheme,
}

impl SpeciesIdentity {
    pub fn classify(snapshot: &TraitSnapshot) -> Self {
        let size = SizeCategory::of(snapshot.scale);
        let pitch = PitchCategory::of(snapshot.pitch);
        let genus = if pitch == PitchCategory::High {
            GenusTheme::Vocal
        } else if snapshot.state == BirdState::Foraging {
            GenusTheme::Ground
        } else if size == SizeCategory::Large && snapshot.state == BirdState::Flying {
            GenusTheme::Aerial
        } else {
            let hashed = &GenusTheme::HASHED;
            hashed[TraitKey::from(snapshot).pick(Salt::Genus, hashed.len())]
        };
        Self {
            color_family: color_family(snapshot.color),
            size,
            pitch,
            genus,
        }
    }
}

fn family(name: &str) -> &'static ColorFamily {
    COLOR_FAMILIES
        .iter()
        .find(|f| f.name == name)
        .or_else(|| COLOR_FAMILIES.iter().find(|f| f.name == FALLBACK_FAMILY))
        .unwrap_or(&COLOR_FAMILIES[0])
}

/// Bucket a colour by HSL: greys by lightness, muted warm darks as earth
/// tones, bright pastels as iridescent, everything else by hue.
pub fn color_family(color: Rgb) -> &'static ColorFamily {
    let hsl = color.to_hsl();
    let (h, s, l) = (hsl.h, hsl.s, hsl.l);

    if s < 0.15 {
        return family(if l > 0.85 {
            "Snow"
        } else if l > 0.7 {
            "Ivory"
        } else if l > 0.55 {
            "Pearl"
        } else if l > 0.4 {
            "Ash"
        } else if l > 0.25 {
            "Charcoal"
        } else {
            "Obsidian"
        });
    }

    if s < 0.5 && l < 0.45 && (h < 60.0 || h >= 345.0) {
        return family(if h >= 345.0 || h < 20.0 {
            "Umber"
        } else if h < 30.0 {
            "Sienna"
        } else if h < 45.0 {
            "Copper"
        } else {
            "Ochre"
        });
    }

    if l > 0.8 && s > 0.3 {
        return family("Opal");
    }

    let name = match h {
        h if h >= 345.0 || h < 15.0 => "Crimson",
        h if h < 25.0 => "Vermilion",
        h if h < 45.0 => "Amber",
        h if h < 60.0 => "Citrine",
        h if h < 75.0 => "Chartreuse",
        h if h < 105.0 => "Emerald",
        h if h < 135.0 => "Viridian",
        h if h < 165.0 => "Teal",
        h if h < 195.0 => "Cerulean",
        h if h < 225.0 => "Cobalt",
        h if h < 255.0 => "Indigo",
        h if h < 275.0 => "Violet",
        h if h < 295.0 => "Magenta",
        h if h < 345.0 => "Rose",
        _ => FALLBACK_FAMILY,
    };
    family(name)
}

/// Hash salts, one per independent choice.
#[derive(Clone, Copy, Debug)]
#[repr(u32)]
pub(crate) enum Salt {
    Genus = 0x9e37_79b9,
    GenusName = 0x85eb_ca6b,
    EpithetMode = 0xc2b2_ae35,
    SizeEpithet = 0x27d4_eb2f,
    PitchEpithet = 0x1656_67b1,
    BehaviorEpithet = 0xd3a2_646c,
    ColorDescriptor = 0xfd70_46c5,
    BehaviorDescriptor = 0xb55a_4f09,
    BirdType = 0x6c8e_9cf5,
    CommonPattern = 0x4f1b_bcdc,
    Template = 0x2545_f491,
    Temperament = 0x7a64_6e4d,
}

/// Quantized trait tuple: packed colour, pitch in centi-Hz, scale in thousandths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TraitKey {
    color: u32,
    pitch: i64,
    scale: i64,
}

impl From<&TraitSnapshot> for TraitKey {
    fn from(snapshot: &TraitSnapshot) -> Self {
        Self {
            color: snapshot.color.packed(),
            pitch: (snapshot.pitch * 100.0).round() as i64,
            scale: (snapshot.scale * 1000.0).round() as i64,
        }
    }
}

fn mix32(mut x: u32) -> u32 {
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}

fn fold(v: i64) -> u32 {
    let bits = v as u64;
    (bits ^ (bits >> 32)) as u32
}

impl TraitKey {
    pub(crate) fn hash(&self, salt: Salt) -> u32 {
        let h = mix32(self.color ^ salt as u32);
        let h = mix32(h ^ fold(self.pitch));
        mix32(h ^ fold(self.scale))
    }

    /// Index in `0..len`. `len` must be non-zero.
    pub(crate) fn pick(&self, salt: Salt, len: usize) -> usize {
        self.hash(salt) as usize % len
    }
}

use super::classify::{GenusTheme, PitchCategory, Salt, SizeCategory, SpeciesIdentity, TraitKey};
use super::lexicon;
use super::TraitSnapshot;
use crate::agent::BirdState;

fn size_epithets(size: SizeCategory) -> &'static [&'static str] {
    match size {
        SizeCategory::Small => &lexicon::SMALL_EPITHETS,
        SizeCategory::Medium => &lexicon::MEDIUM_EPITHETS,
        SizeCategory::Large => &lexicon::LARGE_EPITHETS,
    }
}

fn pitch_epithets(pitch: PitchCategory) -> &'static [&'static str] {
    match pitch {
        PitchCategory::Low => &lexicon::LOW_EPITHETS,
        PitchCategory::Mid => &lexicon::MID_EPITHETS,
        PitchCategory::High => &lexicon::HIGH_EPITHETS,
    }
}

fn temperaments(genus: GenusTheme) -> &'static [&'static str] {
    match genus {
        GenusTheme::Vocal => &lexicon::VOCAL_TEMPERAMENTS,
        GenusTheme::Aerial => &lexicon::AERIAL_TEMPERAMENTS,
        GenusTheme::Ground => &lexicon::GROUND_TEMPERAMENTS,
        GenusTheme::Temporal => &lexicon::TEMPORAL_TEMPERAMENTS,
        GenusTheme::Social => &lexicon::SOCIAL_TEMPERAMENTS,
        GenusTheme::Speed => &lexicon::SPEED_TEMPERAMENTS,
    }
}

fn choose(key: &TraitKey, salt: Salt, options: &[&'static str]) -> &'static str {
    options[key.pick(salt, options.len())]
}

/// `Genus epithet`, where the epithet is either the colour's Latin root or a
/// hyphenated pair drawn from size, pitch and behaviour vocabularies.
pub fn scientific_name(identity: &SpeciesIdentity, key: &TraitKey) -> String {
    let genus = choose(key, Salt::GenusName, identity.genus.genera());
    let pitch = choose(key, Salt::PitchEpithet, pitch_epithets(identity.pitch));
    match key.pick(Salt::EpithetMode, 3) {
        0 => format!("{genus} {}", identity.color_family.latin_root),
        1 => {
            let behavior = choose(key, Salt::BehaviorEpithet, &lexicon::BEHAVIOR_EPITHETS);
            format!("{genus} {pitch}-{behavior}")
        }
        _ => {
            let size = choose(key, Salt::SizeEpithet, size_epithets(identity.size));
            format!("{genus} {size}-{pitch}")
        }
    }
}

pub fn common_name(identity: &SpeciesIdentity, key: &TraitKey) -> String {
    let color = choose(key, Salt::ColorDescriptor, &identity.color_family.descriptors);
    let behavior = choose(key, Salt::BehaviorDescriptor, &lexicon::BEHAVIOR_DESCRIPTORS);
    let kind = choose(key, Salt::BirdType, &lexicon::BIRD_TYPES);
    match key.pick(Salt::CommonPattern, 4) {
        0 => format!("{color} {kind}"),
        1 => format!("{color} {behavior}"),
        2 => format!("{behavior} {kind}"),
        _ => {
            let head = behavior.split('-').next().unwrap_or(behavior);
            format!("{color}-{head} {kind}")
        }
    }
}

fn register(pitch: PitchCategory) -> &'static str {
    match pitch {
        PitchCategory::High => "a bright, elevated",
        PitchCategory::Mid => "a middle",
        PitchCategory::Low => "a deep, resonant",
    }
}

fn activity(state: BirdState) -> &'static str {
    match state {
        BirdState::Flying => "long stretches of sustained flight",
        BirdState::Foraging => "patient foraging close to the ground",
        BirdState::Singing => "extended bouts of song",
        BirdState::Idle => "quiet perching between short flights",
    }
}

fn frame(size: SizeCategory) -> &'static str {
    match size {
        SizeCategory::Large => "holds its ground against most rivals",
        SizeCategory::Medium => "balances agility and endurance",
        SizeCategory::Small => "slips easily through dense foliage",
    }
}

fn vigor(energy: f64) -> &'static str {
    if energy > 60.0 {
        "vigorous"
    } else if energy > 30.0 {
        "steady"
    } else {
        "conservative"
    }
}

/// Short field-guide entry. Plain text; only trait-derived values are substituted.
pub fn description(identity: &SpeciesIdentity, snapshot: &TraitSnapshot, key: &TraitKey) -> String {
    let family = identity.color_family.name;
    let family_lower = family.to_lowercase();
    let size = identity.size.as_str();
    let pitch_tier = identity.pitch.as_str();
    let hz = snapshot.pitch.round();
    match key.pick(Salt::Template, 4) {
        0 => format!(
            "{family} plumage marks this {size}-bodied bird against the canopy. Its calls sit \
             near {hz} Hz, in {} register. It is most often seen during {}, with {} energy use.",
            register(identity.pitch),
            activity(snapshot.state),
            vigor(snapshot.energy),
        ),
        1 => format!(
            "A {size} bird with {family_lower} feathering ({}). Its {pitch_tier}-frequency calls \
             around {hz} Hz point to a {} lineage. Specimens measure about {:.2}x the reference size.",
            snapshot.color.to_hex(),
            identity.genus.as_str(),
            snapshot.scale,
        ),
        2 => format!(
            "Only recently catalogued, this {family_lower}-hued species calls at {hz} Hz. Its {size} \
             frame {}. Currently at {}% energy reserves and {}.",
            frame(identity.size),
            snapshot.energy.floor(),
            snapshot.state.as_str().to_lowercase(),
        ),
        _ => format!(
            "Plumage with {family_lower} undertones catches the light as this {size} specimen \
             vocalizes near {hz} Hz. Field notes record {} as its main activity.",
            activity(snapshot.state),
        ),
    }
}

pub fn temperament(identity: &SpeciesIdentity, snapshot: &TraitSnapshot, key: &TraitKey) -> String {
    let options = temperaments(identity.genus);
    let energy_bucket = snapshot.energy.floor().max(0.0) as usize;
    let index = key.pick(Salt::Temperament, options.len()) + energy_bucket % options.len();
    let base = options[index % options.len()];
    let mut text = String::from(base);
    if snapshot.energy > 70.0 {
        text.push_str(", displaying high vitality");
    } else if snapshot.energy < 30.0 {
        text.push_str(", currently conserving energy");
    }
    match snapshot.state {
        BirdState::Singing => text.push_str(". Frequently engages in vocal displays"),
        BirdState::Foraging => text.push_str(". Spends considerable time foraging"),
        BirdState::Idle | BirdState::Flying => {}
    }
    text.push('.');
    text
}

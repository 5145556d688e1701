// Vocabulary used by the name synthesizer. Order matters: indices are chosen by hash.

pub struct ColorFamily {
    pub name: &'static str,
    pub latin_root: &'static str,
    pub descriptors: [&'static str; 4],
}

macro_rules! families {
    ($($name:literal, $root:literal, [$($d:literal),*]);* $(;)?) => {
        &[$(ColorFamily { name: $name, latin_root: $root, descriptors: [$($d),*] }),*]
    };
}

pub static COLOR_FAMILIES: &[ColorFamily] = families! {
    "Crimson", "rubeus", ["Ruby", "Crimson", "Scarlet", "Carmine"];
    "Vermilion", "miniatus", ["Vermilion", "Coral", "Flame", "Burnt-Orange"];
    "Amber", "aureus", ["Amber", "Honey", "Golden", "Saffron"];
    "Citrine", "citrinus", ["Lemon", "Citrine", "Sulfur", "Pale-Gold"];
    "Chartreuse", "flavoviridis", ["Chartreuse", "Lime", "Spring", "Acid-Green"];
    "Emerald", "smaragdinus", ["Emerald", "Forest", "Verdant", "Jade"];
    "Viridian", "viridis", ["Viridian", "Moss", "Olive", "Sage"];
    "Teal", "cyanoviridis", ["Teal", "Turquoise", "Aqua", "Seafoam"];
    "Cerulean", "caeruleus", ["Cerulean", "Azure", "Sky", "Powder-Blue"];
    "Cobalt", "cobalinus", ["Cobalt", "Sapphire", "Royal", "Deep-Blue"];
    "Indigo", "indicus", ["Indigo", "Navy", "Midnight", "Prussian"];
    "Violet", "violaceus", ["Violet", "Lavender", "Periwinkle", "Lilac"];
    "Magenta", "purpureus", ["Magenta", "Fuchsia", "Orchid", "Plum"];
    "Rose", "roseus", ["Rose", "Pink", "Blush", "Salmon"];
    "Umber", "brunneus", ["Umber", "Sepia", "Rust", "Chestnut"];
    "Sienna", "ferrugineus", ["Sienna", "Copper", "Burnt-Sienna", "Terra-Cotta"];
    "Ochre", "ochraceus", ["Ochre", "Tan", "Sand", "Buff"];
    "Ash", "cinereus", ["Ash", "Slate", "Storm", "Smoke"];
    "Pearl", "argenteus", ["Pearl", "Silver", "Platinum", "Moonlit"];
    "Ivory", "eburneus", ["Ivory", "Cream", "Bone", "Alabaster"];
    "Snow", "niveus", ["Snow", "Frost", "Ice", "Pale"];
    "Charcoal", "anthracinus", ["Charcoal", "Graphite", "Iron", "Steel"];
    "Obsidian", "niger", ["Obsidian", "Onyx", "Raven", "Ink"];
    "Copper", "cupreus", ["Copper", "Bronze", "Brass", "Metallic"];
    "Opal", "iridescens", ["Opal", "Iridescent", "Prismatic", "Rainbow"];
};

/// Family returned when no bucket matches.
pub const FALLBACK_FAMILY: &str = "Pearl";

pub static VOCAL_GENERA: [&str; 4] = ["Sonolumen", "Cantorus", "Melodius", "Vocalis"];
pub static AERIAL_GENERA: [&str; 4] = ["Altivolans", "Aerius", "Nimbovis", "Caelifer"];
pub static GROUND_GENERA: [&str; 4] = ["Terrestrior", "Solumvis", "Humicolus", "Rasorus"];
pub static TEMPORAL_GENERA: [&str; 4] = ["Crepusculis", "Aurornis", "Vesperus", "Tenebris"];
pub static SOCIAL_GENERA: [&str; 4] = ["Gregarius", "Sociabilis", "Solitarius", "Dispersus"];
pub static SPEED_GENERA: [&str; 4] = ["Rapidus", "Velox", "Tranquillus", "Lentus"];

pub static SMALL_EPITHETS: [&str; 5] = ["minimus", "parvus", "gracilis", "tenuissimus", "delicatus"];
pub static MEDIUM_EPITHETS: [&str; 5] = ["medius", "communis", "typicus", "ordinarius", "moderatus"];
pub static LARGE_EPITHETS: [&str; 5] = ["maximus", "grandis", "robustus", "magnificus", "imperialis"];

pub static LOW_EPITHETS: [&str; 4] = ["gravis", "profundus", "bassus", "sonorus"];
pub static MID_EPITHETS: [&str; 4] = ["melodicus", "harmonius", "dulcis", "cantans"];
pub static HIGH_EPITHETS: [&str; 4] = ["acutus", "stridulus", "crystallinus", "argentus"];

pub static BEHAVIOR_EPITHETS: [&str; 10] = [
    "volans", "cantrix", "forans", "perchis", "erratus", "vagans", "saltans", "exploratus",
    "vigilans", "choralis",
];

pub static BEHAVIOR_DESCRIPTORS: [&str; 30] = [
    "Chime", "Warbler", "Singer", "Caller", "Whistler", "Songster", "Crooner",
    "Flitter", "Dancer", "Glider", "Darter", "Soarer", "Hopper", "Wanderer",
    "Sky-Dweller", "Canopy-Walker", "Ground-Runner", "Forest-Ghost", "Treetop-Visitor",
    "Dawn-Caller", "Dusk-Singer", "Twilight-Wanderer", "Morning-Voice", "Evening-Chime",
    "Jewel", "Gem", "Shimmer", "Gleam", "Sparkle", "Flash",
];

pub static BIRD_TYPES: [&str; 20] = [
    "Thrush", "Finch", "Warbler", "Sparrow", "Bunting", "Tanager", "Wren", "Pipit", "Wagtail",
    "Lark", "Chat", "Blackbird", "Robin", "Starling", "Wing", "Feather", "Plume", "Bird",
    "Flier", "Aviator",
];

pub static VOCAL_TEMPERAMENTS: [&str; 4] = [
    "Vociferous and territorial",
    "Melodious yet assertive",
    "Gregarious and communicative",
    "Animated and expressive",
];
pub static AERIAL_TEMPERAMENTS: [&str; 4] = [
    "Restless and exploratory",
    "Graceful yet independent",
    "Aloof and high-ranging",
    "Confident in open spaces",
];
pub static GROUND_TEMPERAMENTS: [&str; 4] = [
    "Methodical and cautious",
    "Focused and pragmatic",
    "Grounded and observant",
    "Deliberate in movement",
];
pub static TEMPORAL_TEMPERAMENTS: [&str; 4] = [
    "Rhythmic and predictable",
    "Sensitive to environmental cues",
    "Cyclical in behavior patterns",
    "Attuned to daily rhythms",
];
pub static SOCIAL_TEMPERAMENTS: [&str; 4] = [
    "Gregarious and cooperative",
    "Socially complex and interactive",
    "Community-oriented",
    "Highly responsive to flock dynamics",
];
pub static SPEED_TEMPERAMENTS: [&str; 4] = [
    "Dynamic and energetic",
    "Swift and decisive",
    "Measured and composed",
    "Adaptable in tempo",
];

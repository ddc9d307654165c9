//! Bundle name generation.
//!
//! Names only need to be unique within one run. Production runs use
//! [`HaikuNamer`] for human-friendly names (`quiet-river-0412`); tests and
//! reproducible builds use [`SequentialNamer`] or any closure returning a
//! `String`.

use uuid::Uuid;

/// Source of bundle names.
pub trait BundleNamer {
    /// Produce the next candidate name.
    fn next_name(&mut self) -> String;
}

impl<F> BundleNamer for F
where
    F: FnMut() -> String,
{
    fn next_name(&mut self) -> String {
        self()
    }
}

const ADJECTIVES: &[&str] = &[
    "autumn", "hidden", "bitter", "misty", "silent", "empty", "dry", "dark", "summer", "icy",
    "delicate", "quiet", "white", "cool", "spring", "winter", "patient", "twilight", "dawn",
    "crimson", "wispy", "weathered", "blue", "billowing", "broken", "cold", "damp", "falling",
    "frosty", "green", "long", "late", "lingering", "bold", "little", "morning", "muddy", "old",
    "red", "rough", "still", "small", "sparkling", "shy", "wandering", "withered", "wild",
    "black", "young", "holy", "solitary", "fragrant", "aged", "snowy", "proud", "floral",
    "restless", "divine", "polished", "ancient", "purple", "lively", "nameless",
];

const NOUNS: &[&str] = &[
    "waterfall", "river", "breeze", "moon", "rain", "wind", "sea", "morning", "snow", "lake",
    "sunset", "pine", "shadow", "leaf", "dawn", "glitter", "forest", "hill", "cloud", "meadow",
    "sun", "glade", "bird", "brook", "butterfly", "bush", "dew", "dust", "field", "fire",
    "flower", "firefly", "feather", "grass", "haze", "mountain", "night", "pond", "darkness",
    "snowflake", "silence", "sound", "sky", "shape", "surf", "thunder", "violet", "water",
    "wildflower", "wave", "resonance", "wood", "dream", "cherry", "tree", "fog", "frost",
    "voice", "paper", "frog", "smoke", "star",
];

/// Random `adjective-noun-NNNN` names.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaikuNamer;

impl BundleNamer for HaikuNamer {
    fn next_name(&mut self) -> String {
        let bytes = Uuid::new_v4().into_bytes();
        let adjective = ADJECTIVES[usize::from(bytes[0]) % ADJECTIVES.len()];
        let noun = NOUNS[usize::from(bytes[1]) % NOUNS.len()];
        let token = u16::from_be_bytes([bytes[2], bytes[3]]) % 10_000;
        format!("{adjective}-{noun}-{token:04}")
    }
}

/// Deterministic `prefix-001`, `prefix-002`, ... names.
#[derive(Debug, Clone)]
pub struct SequentialNamer {
    prefix: String,
    next: usize,
}

impl SequentialNamer {
    /// Start counting at 1 with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialNamer {
    fn default() -> Self {
        Self::new("bundle")
    }
}

impl BundleNamer for SequentialNamer {
    fn next_name(&mut self) -> String {
        let name = format!("{}-{:03}", self.prefix, self.next);
        self.next += 1;
        name
    }
}

//! Resort nickname normalisation.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Built-in nicknames for the Colorado resorts the stores are keyed by.
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("arapahoe basin", "Arapahoe Basin"),
    ("a-basin", "Arapahoe Basin"),
    ("copper", "Copper"),
    ("copper mountain", "Copper"),
    ("loveland", "Loveland"),
    ("breckenridge", "Breckenridge"),
    ("breck", "Breckenridge"),
    ("winter park", "Winter Park"),
    ("keystone", "Keystone"),
    ("vail", "Vail"),
    ("crested butte", "Crested Butte"),
    ("steamboat", "Steamboat"),
    ("purgatory", "Purgatory"),
    ("telluride", "Telluride"),
];

/// Case-insensitive map from resort nicknames to canonical resort names.
///
/// Keys are stored lower-cased. Names without an entry resolve to
/// themselves.
///
/// ```rust
/// use ski_weather::ResortAliases;
///
/// let aliases = ResortAliases::default();
/// assert_eq!(aliases.resolve("A-Basin"), "Arapahoe Basin");
/// assert_eq!(aliases.resolve("Eldora"), "Eldora");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResortAliases {
    map: BTreeMap<String, String>,
}

impl Default for ResortAliases {
    fn default() -> Self {
        DEFAULT_ALIASES
            .iter()
            .fold(Self::empty(), |aliases, (alias, canonical)| {
                aliases.with_alias(alias, canonical)
            })
    }
}

impl ResortAliases {
    /// A table with no entries; every name resolves to itself.
    pub fn empty() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Parse a JSON object of `"alias": "Canonical Name"` pairs.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_alias(mut self, alias: &str, canonical: &str) -> Self {
        self.map
            .insert(alias.trim().to_lowercase(), canonical.trim().to_string());
        self
    }

    /// Add every entry of `other`, replacing clashing aliases.
    pub fn extend(&mut self, other: ResortAliases) {
        self.map.extend(other.map);
    }

    pub fn resolve(&self, resort_name: &str) -> String {
        self.map
            .get(&resort_name.trim().to_lowercase())
            .cloned()
            .unwrap_or_else(|| resort_name.trim().to_string())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Keys go through [`ResortAliases::with_alias`], so deserialized tables
/// are case-insensitive too.
impl<'de> Deserialize<'de> for ResortAliases {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        Ok(raw
            .iter()
            .fold(Self::empty(), |aliases, (alias, canonical)| {
                aliases.with_alias(alias, canonical)
            }))
    }
}

use anyhow::{Result, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the four item maps a component descriptor carries.
///
/// The string form doubles as the descriptor key (`"props"`, `"events"`, ...)
/// and as the key of the matching vocabulary list.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ItemKind {
    Props,
    Events,
    Methods,
    Slots,
}

impl ItemKind {
    /// Every kind, in the order the hydration passes visit them.
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Props,
        ItemKind::Events,
        ItemKind::Methods,
        ItemKind::Slots,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Props => "props",
            ItemKind::Events => "events",
            ItemKind::Methods => "methods",
            ItemKind::Slots => "slots",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "props" => Ok(ItemKind::Props),
            "events" => Ok(ItemKind::Events),
            "methods" => Ok(ItemKind::Methods),
            "slots" => Ok(ItemKind::Slots),
            other => bail!("unknown item kind '{other}' (expected props|events|methods|slots)"),
        }
    }
}

impl Serialize for ItemKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ItemKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

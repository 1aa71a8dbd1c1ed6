//! Fixed catalog of chefs and roles
//!
//! The survey rates exactly three chefs and offers exactly three roles. Both
//! sets are closed enums so that everything past the parsing boundary can rely
//! on well-typed ids. Declaration order is catalog order, which is also the
//! tie-break order used by the statistics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a chef in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChefId {
    #[serde(rename = "assaf-granit")]
    AssafGranit,
    #[serde(rename = "yossi-shitrit")]
    YossiShitrit,
    #[serde(rename = "moshik-roth")]
    MoshikRoth,
}

impl ChefId {
    /// All chefs, in catalog order
    pub const ALL: [ChefId; 3] = [ChefId::AssafGranit, ChefId::YossiShitrit, ChefId::MoshikRoth];

    /// Stable string form used on the wire and in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ChefId::AssafGranit => "assaf-granit",
            ChefId::YossiShitrit => "yossi-shitrit",
            ChefId::MoshikRoth => "moshik-roth",
        }
    }

    /// Catalog entry for this chef
    pub fn chef(&self) -> &'static Chef {
        &CHEFS[*self as usize]
    }

    /// Parse a wire id, returning `None` for ids outside the catalog
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|chef| chef.as_str() == id)
    }
}

impl fmt::Display for ChefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ChefId {
    type Err = UnknownCatalogId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownCatalogId::Chef(s.to_string()))
    }
}

/// One of the three mutually-exclusive roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Ski,
    Cook,
    Kill,
}

impl Role {
    /// All roles, in catalog order
    pub const ALL: [Role; 3] = [Role::Ski, Role::Cook, Role::Kill];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Ski => "ski",
            Role::Cook => "cook",
            Role::Kill => "kill",
        }
    }

    /// Human readable label shown to respondents and in exports
    pub fn label(&self) -> &'static str {
        match self {
            Role::Ski => "Ski/Hang With",
            Role::Cook => "Cook Dinners",
            Role::Kill => "Kill",
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == id)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownCatalogId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownCatalogId::Role(s.to_string()))
    }
}

/// Returned when a string does not name a catalog chef or role
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnknownCatalogId {
    #[error("unknown chef id: {0}")]
    Chef(String),
    #[error("unknown role id: {0}")]
    Role(String),
}

/// A chef being rated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chef {
    pub id: ChefId,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<&'static str>,
}

/// Catalog view of a role, as served to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleInfo {
    pub id: Role,
    pub label: &'static str,
}

/// The chefs, indexed by `ChefId as usize`
pub static CHEFS: [Chef; 3] = [
    Chef {
        id: ChefId::AssafGranit,
        name: "Assaf Granit",
        description: "Renowned Israeli chef known for his Jerusalem-style cuisine and restaurants like Machneyuda and The Palomar. Winner of multiple culinary awards.",
        image_url: Some("/uploads/assaf-granit.jpg"),
    },
    Chef {
        id: ChefId::YossiShitrit,
        name: "Yossi Shitrit",
        description: "Celebrated chef who combines Moroccan and Mediterranean influences. Owner of popular restaurants including Onza and Kitchen Market.",
        image_url: Some("/uploads/yossi-shitrit.jpg"),
    },
    Chef {
        id: ChefId::MoshikRoth,
        name: "Moshik Roth",
        description: "Michelin-starred chef known for molecular gastronomy and innovative cooking techniques. Owner of &samhoud places in Amsterdam.",
        image_url: Some("/uploads/moshik-roth.jpg"),
    },
];

/// Role entries in catalog order
pub fn roles() -> [RoleInfo; 3] {
    Role::ALL.map(|id| RoleInfo {
        id,
        label: id.label(),
    })
}

/// Full catalog payload served by the API
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub chefs: &'static [Chef],
    pub roles: [RoleInfo; 3],
}

impl Catalog {
    pub fn get() -> Self {
        Self {
            chefs: &CHEFS,
            roles: roles(),
        }
    }
}

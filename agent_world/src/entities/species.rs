//! Creature and pickup definitions.

use serde::{Deserialize, Serialize};

/// Every kind of enemy the agent can meet.
///
/// Winged variants are not separate species; see [`crate::CellCode::Enemy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Goomba,
    RedKoopa,
    GreenKoopa,
    Spiky,
    BulletBill,
    PiranhaPlant,
    Shell,
}

impl Species {
    /// The noun used when the agent talks about this species.
    ///
    /// Both koopa colours share one name.
    pub fn name(&self) -> &'static str {
        match self {
            Species::Goomba => "Goomba",
            Species::RedKoopa | Species::GreenKoopa => "Koopa",
            Species::Spiky => "Spiky",
            Species::BulletBill => "Bullet Bill",
            Species::PiranhaPlant => "Piranha Plant",
            Species::Shell => "shell",
        }
    }

    /// The name with an indefinite article, e.g. "a Goomba".
    pub fn with_article(&self) -> String {
        format!("a {}", self.name())
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Pickups the agent can collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collectible {
    Mushroom,
    FireFlower,
    LifeMushroom,
    Coin,
}

impl Collectible {
    /// Display name, e.g. "fire flower".
    pub fn name(&self) -> &'static str {
        match self {
            Collectible::Mushroom => "mushroom",
            Collectible::FireFlower => "fire flower",
            Collectible::LifeMushroom => "1-up",
            Collectible::Coin => "coin",
        }
    }
}

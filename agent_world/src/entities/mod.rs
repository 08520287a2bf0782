//! Cell codes for the grid around the agent.

mod species;

pub use species::*;

use serde::{Deserialize, Serialize};

/// What occupies one cell of a [`crate::WorldSnapshot`].
///
/// The simulation hands over raw integers; [`CellCode::from_raw`] is the only
/// place those integers are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CellCode {
    #[default]
    Empty,
    /// A code the simulation reported but the table does not know.
    Undefined,
    Solid,
    Brick,
    QuestionBlock,
    Pipe,
    Platform,
    Item(Collectible),
    Enemy {
        species: Species,
        winged: bool,
    },
    Fireball,
}

/// Raw simulation codes.
pub mod raw {
    pub const EMPTY: i32 = 0;
    pub const GOOMBA: i32 = 2;
    pub const GOOMBA_WINGED: i32 = 3;
    pub const RED_KOOPA: i32 = 4;
    pub const RED_KOOPA_WINGED: i32 = 5;
    pub const GREEN_KOOPA: i32 = 6;
    pub const GREEN_KOOPA_WINGED: i32 = 7;
    pub const SPIKY: i32 = 8;
    pub const SPIKY_WINGED: i32 = 9;
    pub const BULLET_BILL: i32 = 10;
    pub const ENEMY_FLOWER: i32 = 11;
    pub const MUSHROOM: i32 = 12;
    pub const FIRE_FLOWER: i32 = 13;
    pub const SHELL: i32 = 14;
    pub const LIFE_MUSHROOM: i32 = 15;
    pub const FIREBALL: i32 = 16;
    pub const SOLID: i32 = 17;
    pub const PIPE: i32 = 18;
    pub const BRICK: i32 = 22;
    pub const QUESTION_BLOCK: i32 = 24;
    pub const COIN: i32 = 31;
    pub const PIPE_BODY: i32 = 52;
    pub const PLATFORM: i32 = 59;
}

impl CellCode {
    /// Decode a raw simulation code.
    pub fn from_raw(code: i32) -> Self {
        use CellCode::*;

        let enemy = |species, winged| Enemy { species, winged };
        match code {
            raw::EMPTY => Empty,
            raw::GOOMBA => enemy(Species::Goomba, false),
            raw::GOOMBA_WINGED => enemy(Species::Goomba, true),
            raw::RED_KOOPA => enemy(Species::RedKoopa, false),
            raw::RED_KOOPA_WINGED => enemy(Species::RedKoopa, true),
            raw::GREEN_KOOPA => enemy(Species::GreenKoopa, false),
            raw::GREEN_KOOPA_WINGED => enemy(Species::GreenKoopa, true),
            raw::SPIKY => enemy(Species::Spiky, false),
            raw::SPIKY_WINGED => enemy(Species::Spiky, true),
            raw::BULLET_BILL => enemy(Species::BulletBill, false),
            raw::ENEMY_FLOWER => enemy(Species::PiranhaPlant, false),
            raw::SHELL => enemy(Species::Shell, false),
            raw::MUSHROOM => Item(Collectible::Mushroom),
            raw::FIRE_FLOWER => Item(Collectible::FireFlower),
            raw::LIFE_MUSHROOM => Item(Collectible::LifeMushroom),
            raw::COIN => Item(Collectible::Coin),
            raw::FIREBALL => Fireball,
            raw::SOLID => Solid,
            raw::PIPE | raw::PIPE_BODY => Pipe,
            raw::BRICK => Brick,
            raw::QUESTION_BLOCK => QuestionBlock,
            raw::PLATFORM => Platform,
            _ => Undefined,
        }
    }

    /// Whether the agent can stand on this cell.
    pub fn is_floor(&self) -> bool {
        matches!(
            self,
            CellCode::Solid
                | CellCode::Brick
                | CellCode::QuestionBlock
                | CellCode::Pipe
                | CellCode::Platform
                | CellCode::Undefined
        )
    }

    /// The enemy in this cell, if any, with its winged flag.
    pub fn enemy(&self) -> Option<(Species, bool)> {
        match self {
            CellCode::Enemy { species, winged } => Some((*species, *winged)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_codes_decode_to_species() {
        assert_eq!(
            CellCode::from_raw(raw::GOOMBA_WINGED).enemy(),
            Some((Species::Goomba, true))
        );
        assert_eq!(
            CellCode::from_raw(raw::GREEN_KOOPA).enemy(),
            Some((Species::GreenKoopa, false))
        );
        assert_eq!(
            CellCode::from_raw(raw::ENEMY_FLOWER).enemy(),
            Some((Species::PiranhaPlant, false))
        );
    }

    #[test]
    fn test_every_winged_code_is_winged() {
        for code in [
            raw::GOOMBA_WINGED,
            raw::RED_KOOPA_WINGED,
            raw::GREEN_KOOPA_WINGED,
            raw::SPIKY_WINGED,
        ] {
            let (_, winged) = CellCode::from_raw(code).enemy().unwrap();
            assert!(winged, "code {code} should be winged");
        }
    }

    #[test]
    fn test_unknown_code_is_undefined() {
        assert_eq!(CellCode::from_raw(-42), CellCode::Undefined);
        assert_eq!(CellCode::from_raw(1000), CellCode::Undefined);
    }

    #[test]
    fn test_floor_cells() {
        assert!(CellCode::from_raw(raw::SOLID).is_floor());
        assert!(CellCode::from_raw(raw::PIPE_BODY).is_floor());
        assert!(!CellCode::Empty.is_floor());
        assert!(!CellCode::Item(Collectible::Coin).is_floor());
        assert!(!CellCode::from_raw(raw::GOOMBA).is_floor());
    }
}

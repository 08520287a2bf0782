//! Spatial snapshot of the grid surrounding the agent at one tick.

use serde::{Deserialize, Serialize};

use crate::entities::{CellCode, Collectible, Species};
use crate::error::WorldError;

/// An immutable grid of cells centred on the agent.
///
/// Columns grow to the right (the direction the agent runs), rows grow
/// downwards. The agent occupies `(width / 2, height / 2)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWorldSnapshot")]
pub struct WorldSnapshot {
    width: usize,
    height: usize,
    /// Row-major cells.
    cells: Vec<CellCode>,
}

/// Wire form of [`WorldSnapshot`], checked by [`WorldSnapshot::new`] on the way in.
#[derive(Deserialize)]
struct RawWorldSnapshot {
    width: usize,
    height: usize,
    cells: Vec<CellCode>,
}

impl TryFrom<RawWorldSnapshot> for WorldSnapshot {
    type Error = WorldError;

    fn try_from(raw: RawWorldSnapshot) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height, raw.cells)
    }
}

impl WorldSnapshot {
    /// Create a snapshot from row-major cells.
    pub fn new(width: usize, height: usize, cells: Vec<CellCode>) -> Result<Self, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::EmptySnapshot);
        }
        let expected = width * height;
        if cells.len() != expected {
            return Err(WorldError::SnapshotShape {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// A snapshot with nothing in it.
    pub fn empty(width: usize, height: usize) -> Result<Self, WorldError> {
        Self::new(width, height, vec![CellCode::Empty; width * height])
    }

    /// Decode the simulation's column-major raw grid (`grid[x][y]`).
    pub fn from_raw_grid(grid: &[Vec<i32>]) -> Result<Self, WorldError> {
        let width = grid.len();
        let height = grid.first().map(Vec::len).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(WorldError::EmptySnapshot);
        }
        if let Some(column) = grid.iter().find(|column| column.len() != height) {
            return Err(WorldError::SnapshotShape {
                expected: width * height,
                actual: width * column.len(),
            });
        }

        let mut cells = Vec::with_capacity(width * height);
        for row in 0..height {
            for column in grid {
                cells.push(CellCode::from_raw(column[row]));
            }
        }
        Self::new(width, height, cells)
    }

    /// Parse rows written in the level-file alphabet.
    ///
    /// This alphabet exists for fixtures and demos. Simulation data is only
    /// ever decoded through [`CellCode::from_raw`].
    ///
    /// `-` empty, `X`/`#` solid, `S` brick, `?`/`@` question block, `t` pipe,
    /// `%` platform, `o` coin, `M` mushroom, `F` fire flower, `1` 1-up,
    /// `g`/`G` goomba, `r`/`R` red koopa, `k`/`K` green koopa, `y`/`Y` spiky,
    /// `B` bullet bill, `T` piranha plant. Upper case enemies are winged.
    pub fn from_level_rows(rows: &[&str]) -> Result<Self, WorldError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut cells = Vec::with_capacity(width * height);
        for (index, row) in rows.iter().enumerate() {
            let actual = row.chars().count();
            if actual != width {
                return Err(WorldError::RaggedRow {
                    row: index,
                    expected: width,
                    actual,
                });
            }
            cells.extend(row.chars().map(level_glyph));
        }
        Self::new(width, height, cells)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Column and row of the agent.
    pub fn agent_position(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// Cell at an absolute position.
    pub fn get(&self, column: usize, row: usize) -> Option<CellCode> {
        if column >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row * self.width + column).copied()
    }

    /// Cell at an offset from the agent (`dx` right, `dy` down).
    pub fn relative(&self, dx: isize, dy: isize) -> Option<CellCode> {
        let (ax, ay) = self.agent_position();
        let column = ax.checked_add_signed(dx)?;
        let row = ay.checked_add_signed(dy)?;
        self.get(column, row)
    }

    /// Whether the column has nothing to stand on anywhere below the agent.
    pub fn is_bottomless(&self, column: usize) -> bool {
        let (_, ay) = self.agent_position();
        ((ay + 1)..self.height).all(|row| !self.get(column, row).is_some_and(|c| c.is_floor()))
    }
}

/// Fixture alphabet for [`WorldSnapshot::from_level_rows`].
fn level_glyph(glyph: char) -> CellCode {
    let enemy = |species, winged| CellCode::Enemy { species, winged };
    match glyph {
        '-' | ' ' => CellCode::Empty,
        'X' | '#' => CellCode::Solid,
        'S' => CellCode::Brick,
        '?' | '@' => CellCode::QuestionBlock,
        't' => CellCode::Pipe,
        '%' => CellCode::Platform,
        'o' => CellCode::Item(Collectible::Coin),
        'M' => CellCode::Item(Collectible::Mushroom),
        'F' => CellCode::Item(Collectible::FireFlower),
        '1' => CellCode::Item(Collectible::LifeMushroom),
        'g' => enemy(Species::Goomba, false),
        'G' => enemy(Species::Goomba, true),
        'r' => enemy(Species::RedKoopa, false),
        'R' => enemy(Species::RedKoopa, true),
        'k' => enemy(Species::GreenKoopa, false),
        'K' => enemy(Species::GreenKoopa, true),
        'y' => enemy(Species::Spiky, false),
        'Y' => enemy(Species::Spiky, true),
        'B' => enemy(Species::BulletBill, false),
        'T' => enemy(Species::PiranhaPlant, false),
        _ => CellCode::Undefined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::raw;

    #[test]
    fn test_shape_is_checked() {
        assert_eq!(
            WorldSnapshot::new(3, 3, vec![CellCode::Empty; 8]),
            Err(WorldError::SnapshotShape {
                expected: 9,
                actual: 8
            })
        );
        assert_eq!(WorldSnapshot::empty(0, 4), Err(WorldError::EmptySnapshot));
    }

    #[test]
    fn test_agent_is_centred() {
        let snapshot = WorldSnapshot::empty(16, 16).unwrap();
        assert_eq!(snapshot.agent_position(), (8, 8));
        assert_eq!(snapshot.relative(0, 0), Some(CellCode::Empty));
        assert_eq!(snapshot.relative(-9, 0), None);
        assert_eq!(snapshot.relative(0, 8), None);
    }

    #[test]
    fn test_raw_grid_is_column_major() {
        // Three columns, two rows; a goomba at x=2, y=0 and floor along y=1.
        let grid = vec![
            vec![raw::EMPTY, raw::SOLID],
            vec![raw::EMPTY, raw::SOLID],
            vec![raw::GOOMBA, raw::SOLID],
        ];
        let snapshot = WorldSnapshot::from_raw_grid(&grid).unwrap();
        assert_eq!(snapshot.width(), 3);
        assert_eq!(snapshot.height(), 2);
        assert_eq!(
            snapshot.get(2, 0).and_then(|c| c.enemy()),
            Some((Species::Goomba, false))
        );
        assert_eq!(snapshot.get(0, 1), Some(CellCode::Solid));
    }

    #[test]
    fn test_ragged_raw_grid_is_rejected() {
        let grid = vec![vec![0, 0], vec![0]];
        assert!(matches!(
            WorldSnapshot::from_raw_grid(&grid),
            Err(WorldError::SnapshotShape { .. })
        ));
    }

    #[test]
    fn test_level_rows_and_bottomless_columns() {
        let snapshot = WorldSnapshot::from_level_rows(&[
            "-----",
            "---g-",
            "-----",
            "XX--X",
            "XX--X",
        ])
        .unwrap();

        assert_eq!(snapshot.agent_position(), (2, 2));
        assert_eq!(
            snapshot.relative(1, -1).and_then(|c| c.enemy()),
            Some((Species::Goomba, false))
        );
        assert!(!snapshot.is_bottomless(1));
        assert!(snapshot.is_bottomless(2));
        assert!(snapshot.is_bottomless(3));
        assert!(!snapshot.is_bottomless(4));
    }

    #[test]
    fn test_ragged_level_rows_are_rejected() {
        // Six glyphs fill a 2x3 grid, but the rows are uneven.
        assert_eq!(
            WorldSnapshot::from_level_rows(&["ab", "abc", "a"]),
            Err(WorldError::RaggedRow {
                row: 1,
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_deserialize_checks_shape() {
        let empty = toml::from_str::<WorldSnapshot>("width = 0\nheight = 0\ncells = []");
        assert!(empty.is_err());

        let short = toml::from_str::<WorldSnapshot>("width = 5\nheight = 5\ncells = []");
        let message = short.unwrap_err().to_string();
        assert!(message.contains("expected 25"), "{message}");

        let ok: WorldSnapshot =
            toml::from_str("width = 1\nheight = 1\ncells = [\"Solid\"]").unwrap();
        assert_eq!(ok.relative(0, 0), Some(CellCode::Solid));
    }
}

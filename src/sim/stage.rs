//! Stage generation: brick layouts for each level
//!
//! Level 1 is a random grid with a few specials sprinkled in. Later levels
//! come from text layouts, one line per brick row:
//!
//! ```text
//! ~                  ~
//! --------------------
//! ```
//!
//! `-` is a regular brick, `~` a random special brick, anything else an empty
//! cell. The first line fixes the number of columns.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::brick::{Brick, BrickKind};
use super::geom::Aabb;
use super::state::IdGen;
use crate::settings::Settings;

/// Built-in layout for level 2
pub const LEVEL_TWO: &str = "\
~                  ~
~                  ~
~                  ~
--------------------
--------------------
";

/// Errors raised while building a stage
#[derive(Debug, Error)]
pub enum StageError {
    #[error("failed to read level {level} layout from {}: {source}", path.display())]
    Io {
        level: u32,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("level {0} layout contains no bricks")]
    Empty(u32),
}

/// One cell of a level layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Brick,
    Special,
}

impl Cell {
    fn from_char(c: char) -> Self {
        match c {
            '-' => Cell::Brick,
            '~' => Cell::Special,
            _ => Cell::Empty,
        }
    }
}

/// A parsed text layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub columns: usize,
    pub rows: Vec<Vec<Cell>>,
}

impl LevelLayout {
    pub fn parse(text: &str) -> Self {
        let columns = text.lines().next().map_or(0, |line| line.chars().count());
        let rows = text
            .lines()
            .map(|line| {
                let mut row: Vec<Cell> = line.chars().take(columns).map(Cell::from_char).collect();
                row.resize(columns, Cell::Empty);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Find the layout for `level`
    ///
    /// A file `<dir>/<level>.txt` wins over the built-in layouts. `Ok(None)`
    /// means there is no such level.
    pub fn load(level: u32, dir: Option<&Path>) -> Result<Option<Self>, StageError> {
        if let Some(dir) = dir {
            let path = dir.join(format!("{level}.txt"));
            match fs::read_to_string(&path) {
                Ok(text) => {
                    log::debug!("Loaded level {} layout from {}", level, path.display());
                    return Ok(Some(Self::parse(&text)));
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(StageError::Io { level, path, source }),
            }
        }

        Ok((level == 2).then(|| Self::parse(LEVEL_TWO)))
    }

    pub fn brick_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| **cell != Cell::Empty)
            .count()
    }
}

/// Lays bricks out inside the play area
#[derive(Debug, Clone)]
pub struct StageBuilder {
    origin: Vec2,
    size: Vec2,
    brick_height: f32,
    separation: f32,
    bricks_per_line: usize,
    brick_rows: usize,
    empty_rows: usize,
    special_bricks: usize,
    safety_bricks: usize,
}

impl StageBuilder {
    pub fn new(settings: &Settings) -> Self {
        let arena = &settings.arena;
        let stage = &settings.stage;
        let inset = arena.barrier_buffer + arena.barrier_width;
        Self {
            origin: Vec2::new(inset, arena.banner_height + inset),
            size: Vec2::new(
                arena.width - 2.0 * inset,
                arena.height - arena.banner_height - inset,
            ),
            brick_height: stage.brick_height,
            separation: stage.brick_separation,
            bricks_per_line: stage.bricks_per_line,
            brick_rows: stage.brick_rows,
            empty_rows: stage.empty_rows,
            special_bricks: stage.special_bricks,
            safety_bricks: stage.safety_bricks,
        }
    }

    /// Safety bricks granted on `level`; one fewer each level
    pub fn safety_count(&self, level: u32) -> usize {
        (self.safety_bricks + 1).saturating_sub(level as usize)
    }

    /// Half-height bricks along the bottom of the play area
    pub fn safety_row(&self, count: usize, ids: &mut IdGen) -> Vec<Brick> {
        if count == 0 {
            return Vec::new();
        }
        let sep = self.separation;
        let width = (self.size.x - 2.0 * sep) / count as f32;
        let height = self.brick_height * 0.5;
        let y = self.origin.y + self.size.y - height - sep;

        (0..count)
            .map(|col| {
                let x = self.origin.x + 2.0 * sep + width * col as f32;
                Brick::new(
                    ids.next_id(),
                    BrickKind::Safety,
                    Aabb::new(x, y, width - 2.0 * sep, height),
                )
            })
            .collect()
    }

    /// Full grid below a few empty rows, with random special slots
    pub fn random_level(&self, rng: &mut impl Rng, ids: &mut IdGen) -> Vec<Brick> {
        let slots = self.bricks_per_line * self.brick_rows;
        let mut kinds = vec![BrickKind::Regular; slots];
        if slots > 0 {
            // Slots may repeat, so a level can end up with fewer specials
            for _ in 0..self.special_bricks {
                let slot = rng.random_range(0..slots);
                kinds[slot] = random_special(rng);
            }
        }

        let width = (self.size.x - self.separation) / self.bricks_per_line.max(1) as f32;
        kinds
            .into_iter()
            .enumerate()
            .map(|(slot, kind)| {
                let row = self.empty_rows + slot / self.bricks_per_line;
                let col = slot % self.bricks_per_line;
                Brick::new(ids.next_id(), kind, self.cell(row, col, width))
            })
            .collect()
    }

    /// Bricks for a text layout
    pub fn from_layout(
        &self,
        level: u32,
        layout: &LevelLayout,
        rng: &mut impl Rng,
        ids: &mut IdGen,
    ) -> Result<Vec<Brick>, StageError> {
        if layout.brick_count() == 0 {
            return Err(StageError::Empty(level));
        }

        let width = (self.size.x - self.separation) / layout.columns as f32;
        let mut bricks = Vec::with_capacity(layout.brick_count());
        for (row, cells) in layout.rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let kind = match cell {
                    Cell::Empty => continue,
                    Cell::Brick => BrickKind::Regular,
                    Cell::Special => random_special(rng),
                };
                bricks.push(Brick::new(ids.next_id(), kind, self.cell(row, col, width)));
            }
        }
        Ok(bricks)
    }

    fn cell(&self, row: usize, col: usize, width: f32) -> Aabb {
        let sep = self.separation;
        Aabb::new(
            self.origin.x + sep + width * col as f32,
            self.origin.y + sep + row as f32 * (self.brick_height + sep),
            width - sep,
            self.brick_height,
        )
    }
}

fn random_special(rng: &mut impl Rng) -> BrickKind {
    BrickKind::SPECIALS
        .choose(rng)
        .copied()
        .unwrap_or(BrickKind::ExtraBall)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn builder() -> StageBuilder {
        StageBuilder::new(&Settings::default())
    }

    #[test]
    fn test_parse_layout() {
        let layout = LevelLayout::parse("-~ -\n--------\n~\n");
        assert_eq!(layout.columns, 4);
        assert_eq!(layout.rows.len(), 3);
        assert_eq!(
            layout.rows[0],
            vec![Cell::Brick, Cell::Special, Cell::Empty, Cell::Brick]
        );
        // Long lines are cut to the first line's width
        assert_eq!(layout.rows[1], vec![Cell::Brick; 4]);
        // Short lines are padded with empty cells
        assert_eq!(
            layout.rows[2],
            vec![Cell::Special, Cell::Empty, Cell::Empty, Cell::Empty]
        );
        assert_eq!(layout.brick_count(), 8);
    }

    #[test]
    fn test_parse_crlf() {
        let layout = LevelLayout::parse("--\r\n~-\r\n");
        assert_eq!(layout.columns, 2);
        assert_eq!(layout.rows[1], vec![Cell::Special, Cell::Brick]);
    }

    #[test]
    fn test_builtin_level_two() {
        let layout = LevelLayout::load(2, None).unwrap().unwrap();
        assert_eq!(layout.columns, 20);
        assert_eq!(layout.rows.len(), 5);
        assert_eq!(layout.brick_count(), 6 + 40);
        assert!(LevelLayout::load(3, None).unwrap().is_none());
    }

    #[test]
    fn test_load_from_dir() {
        let dir = std::env::temp_dir().join(format!("brick-breaker-levels-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("3.txt"), "---\n").unwrap();

        let layout = LevelLayout::load(3, Some(&dir)).unwrap().unwrap();
        assert_eq!(layout.brick_count(), 3);
        // Falls back to the built-in layout when the file is absent
        assert_eq!(LevelLayout::load(2, Some(&dir)).unwrap().unwrap().columns, 20);
        assert!(LevelLayout::load(4, Some(&dir)).unwrap().is_none());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_layout_is_an_error() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ids = IdGen::default();
        let layout = LevelLayout::parse("   \n  \n");
        let err = builder().from_layout(5, &layout, &mut rng, &mut ids).unwrap_err();
        assert!(matches!(err, StageError::Empty(5)));
    }

    #[test]
    fn test_layout_positions() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ids = IdGen::default();
        let layout = LevelLayout::parse("- \n -\n");
        let bricks = builder().from_layout(2, &layout, &mut rng, &mut ids).unwrap();
        assert_eq!(bricks.len(), 2);

        // Play area starts at (15, 55) and is 770 wide; two columns
        let width = (770.0 - 4.0) / 2.0;
        assert_eq!(bricks[0].bounds, Aabb::new(19.0, 59.0, width - 4.0, 20.0));
        assert_eq!(
            bricks[1].bounds,
            Aabb::new(19.0 + width, 59.0 + 24.0, width - 4.0, 20.0)
        );
        assert!(bricks.iter().all(|b| b.kind == BrickKind::Regular));
    }

    #[test]
    fn test_random_level() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut ids = IdGen::default();
        let settings = Settings::default();
        let bricks = builder().random_level(&mut rng, &mut ids);

        assert_eq!(
            bricks.len(),
            settings.stage.bricks_per_line * settings.stage.brick_rows
        );
        let specials = bricks.iter().filter(|b| b.kind.is_special()).count();
        assert!(specials >= 1 && specials <= settings.stage.special_bricks);
        // Three empty rows above the grid
        assert_eq!(bricks[0].bounds.top(), 55.0 + 4.0 + 3.0 * 24.0);
        // Ids are unique and increasing
        assert!(bricks.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_random_level_is_seeded() {
        let kinds = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            builder()
                .random_level(&mut rng, &mut IdGen::default())
                .into_iter()
                .map(|b| b.kind)
                .collect::<Vec<_>>()
        };
        assert_eq!(kinds(5), kinds(5));
    }

    #[test]
    fn test_safety_row() {
        let b = builder();
        assert_eq!(b.safety_count(1), 10);
        assert_eq!(b.safety_count(10), 1);
        assert_eq!(b.safety_count(11), 0);
        assert_eq!(b.safety_count(40), 0);

        let mut ids = IdGen::default();
        let row = b.safety_row(10, &mut ids);
        assert_eq!(row.len(), 10);
        for brick in &row {
            assert_eq!(brick.kind, BrickKind::Safety);
            assert_eq!(brick.bounds.size.y, 10.0);
            // Bottom of the play area, below the paddle
            assert_eq!(brick.bounds.bottom(), 596.0);
            assert!(brick.bounds.left() > 15.0 && brick.bounds.right() < 785.0);
        }
        assert!(b.safety_row(0, &mut ids).is_empty());
    }
}

//! Board module - the shuffled grid of tiles
//!
//! A board of side `s` holds `s²` tiles in row-major order, stored in a flat
//! fixed-capacity array (at most 8×8) so generation never reallocates.
//! Every symbol on the board appears on exactly two tiles.

use std::fmt;

use arrayvec::ArrayVec;
use derive_more::{Display, Error};

use crate::rng::SimpleRng;
use crate::types::{MAX_SIDE, MAX_TILES};

/// A tile face. Any single Unicode scalar works; the default pool is emoji.
pub type Symbol = char;

/// Identity of one physical tile, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One playing piece.
///
/// Whether a tile is face-up is derived from the session selection, not
/// stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub symbol: Symbol,
    pub matched: bool,
}

/// Board configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Side must be even, non-zero and at most 8.
    #[display("invalid board side {side}: must be even and between 2 and 8")]
    InvalidSide { side: u8 },
    /// Not enough distinct symbols for the requested board.
    #[display("symbol pool too small: need {required} distinct symbols, have {available}")]
    PoolTooSmall { required: usize, available: usize },
    /// A fixed layout whose length does not match `side²`.
    #[display("layout has {actual} tiles, expected {expected}")]
    LayoutSize { expected: usize, actual: usize },
    /// A fixed layout where some symbol does not appear exactly twice.
    #[display("symbol {symbol:?} appears {count} times, expected 2")]
    Unpaired { symbol: Symbol, count: usize },
}

/// The game board - `side × side` tiles in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    side: u8,
    tiles: ArrayVec<Tile, MAX_TILES>,
}

impl Board {
    /// Generate a shuffled board.
    ///
    /// Draws `side²/2` distinct symbols from `pool`, duplicates each and
    /// shuffles the result. Tile ids are taken from `next_id`, which is
    /// advanced past the last id used.
    pub fn generate(
        side: u8,
        pool: &[Symbol],
        rng: &mut SimpleRng,
        next_id: &mut u32,
    ) -> Result<Self, BoardError> {
        let pairs = pairs_for_side(side)?;

        let mut distinct = distinct_symbols(pool);
        if distinct.len() < pairs {
            return Err(BoardError::PoolTooSmall {
                required: pairs,
                available: distinct.len(),
            });
        }

        let chosen = rng.choose_prefix(&mut distinct, pairs);

        let mut faces: ArrayVec<Symbol, MAX_TILES> = ArrayVec::new();
        for &symbol in chosen.iter() {
            faces.push(symbol);
            faces.push(symbol);
        }
        rng.shuffle(&mut faces);

        Ok(Self::build(side, &faces, next_id))
    }

    /// Build a board from a fixed row-major layout.
    ///
    /// The layout must satisfy the same pairing invariant as a generated
    /// board. Useful for replays and tests that need a known arrangement.
    pub fn from_layout(
        side: u8,
        layout: &[Symbol],
        next_id: &mut u32,
    ) -> Result<Self, BoardError> {
        let pairs = pairs_for_side(side)?;
        let expected = pairs * 2;
        if layout.len() != expected {
            return Err(BoardError::LayoutSize {
                expected,
                actual: layout.len(),
            });
        }

        for &symbol in layout {
            let count = layout.iter().filter(|&&s| s == symbol).count();
            if count != 2 {
                return Err(BoardError::Unpaired { symbol, count });
            }
        }

        Ok(Self::build(side, layout, next_id))
    }

    fn build(side: u8, faces: &[Symbol], next_id: &mut u32) -> Self {
        let tiles = faces
            .iter()
            .map(|&symbol| {
                let id = TileId(*next_id);
                *next_id = next_id.wrapping_add(1);
                Tile {
                    id,
                    symbol,
                    matched: false,
                }
            })
            .collect();
        Self { side, tiles }
    }

    /// Side length of the grid.
    pub fn side(&self) -> u8 {
        self.side
    }

    /// Number of tiles (`side²`).
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Flat index of the tile at (`row`, `col`), if on the board.
    pub fn index_of(&self, row: u8, col: u8) -> Option<usize> {
        if row >= self.side || col >= self.side {
            return None;
        }
        Some(row as usize * self.side as usize + col as usize)
    }

    /// Mark the tile at `index` matched. Out-of-range indices are ignored.
    pub(crate) fn mark_matched(&mut self, index: usize) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.matched = true;
        }
    }

    pub fn matched_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.matched).count()
    }

    /// True once every tile is matched. An empty board is never complete.
    pub fn all_matched(&self) -> bool {
        !self.tiles.is_empty() && self.tiles.iter().all(|t| t.matched)
    }
}

fn pairs_for_side(side: u8) -> Result<usize, BoardError> {
    if side == 0 || side % 2 != 0 || side > MAX_SIDE {
        return Err(BoardError::InvalidSide { side });
    }
    Ok((side as usize * side as usize) / 2)
}

/// Pool entries with duplicates removed, first occurrence kept.
fn distinct_symbols(pool: &[Symbol]) -> Vec<Symbol> {
    let mut out: Vec<Symbol> = Vec::with_capacity(pool.len());
    for &symbol in pool {
        if !out.contains(&symbol) {
            out.push(symbol);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SYMBOL_POOL;

    fn symbol_counts(board: &Board) -> std::collections::HashMap<Symbol, usize> {
        let mut counts = std::collections::HashMap::new();
        for tile in board.tiles() {
            *counts.entry(tile.symbol).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_generate_pairs_every_symbol() {
        let mut rng = SimpleRng::new(2024);
        let mut next_id = 0;
        for side in [2u8, 4, 6, 8] {
            let board = Board::generate(side, &SYMBOL_POOL, &mut rng, &mut next_id).unwrap();
            let counts = symbol_counts(&board);

            assert_eq!(board.len(), side as usize * side as usize);
            assert_eq!(counts.len(), board.len() / 2);
            assert!(counts.values().all(|&c| c == 2));
        }
    }

    #[test]
    fn test_generate_assigns_unique_ids() {
        let mut rng = SimpleRng::new(5);
        let mut next_id = 100;
        let board = Board::generate(4, &SYMBOL_POOL, &mut rng, &mut next_id).unwrap();

        let mut ids: Vec<u32> = board.tiles().iter().map(|t| t.id.0).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
        assert_eq!(next_id, 116);
        assert!(board.tiles().iter().all(|t| !t.matched));
    }

    #[test]
    fn test_generate_rejects_small_pool() {
        let mut rng = SimpleRng::new(1);
        let mut next_id = 0;
        let err = Board::generate(4, &['a', 'b', 'c'], &mut rng, &mut next_id).unwrap_err();
        assert_eq!(
            err,
            BoardError::PoolTooSmall {
                required: 8,
                available: 3
            }
        );
        assert_eq!(next_id, 0, "ids must not be consumed on failure");
    }

    #[test]
    fn test_generate_collapses_duplicate_pool_entries() {
        let mut rng = SimpleRng::new(1);
        let mut next_id = 0;
        let err = Board::generate(2, &['a', 'a', 'a'], &mut rng, &mut next_id).unwrap_err();
        assert_eq!(
            err,
            BoardError::PoolTooSmall {
                required: 2,
                available: 1
            }
        );
        assert!(Board::generate(2, &['a', 'a', 'b'], &mut rng, &mut next_id).is_ok());
    }

    #[test]
    fn test_generate_rejects_bad_sides() {
        let mut rng = SimpleRng::new(1);
        let mut next_id = 0;
        for side in [0u8, 3, 5, 10] {
            assert_eq!(
                Board::generate(side, &SYMBOL_POOL, &mut rng, &mut next_id),
                Err(BoardError::InvalidSide { side })
            );
        }
    }

    #[test]
    fn test_from_layout_validates_pairs() {
        let mut next_id = 0;
        assert!(Board::from_layout(2, &['a', 'b', 'b', 'a'], &mut next_id).is_ok());
        assert_eq!(
            Board::from_layout(2, &['a', 'b', 'c', 'a'], &mut next_id),
            Err(BoardError::Unpaired {
                symbol: 'b',
                count: 1
            })
        );
        assert_eq!(
            Board::from_layout(2, &['a', 'a'], &mut next_id),
            Err(BoardError::LayoutSize {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn test_index_of_and_completion() {
        let mut next_id = 0;
        let mut board = Board::from_layout(2, &['a', 'b', 'b', 'a'], &mut next_id).unwrap();
        assert_eq!(board.index_of(1, 0), Some(2));
        assert_eq!(board.index_of(2, 0), None);

        assert!(!board.all_matched());
        for i in 0..4 {
            board.mark_matched(i);
        }
        assert_eq!(board.matched_count(), 4);
        assert!(board.all_matched());
    }

    #[test]
    fn test_error_messages() {
        let err = BoardError::PoolTooSmall {
            required: 32,
            available: 10,
        };
        assert_eq!(
            err.to_string(),
            "symbol pool too small: need 32 distinct symbols, have 10"
        );
    }
}

//! The cellular automaton: random fill, forced border, majority smoothing.

use rand::Rng;
use tracing::debug;

use crate::{CaveCell, CaveGrid, CaveParams, WALL_NEIGHBOUR_THRESHOLD};

/// Generate a cave of `width` x `height` cells.
///
/// Every cell is seeded as wall with probability `params.wall_probability`,
/// the outer ring is forced to wall, then `params.iterations` passes turn each
/// interior cell into wall iff at least 5 of its Moore neighbours were walls in
/// the previous pass. The border stays wall throughout.
///
/// Deterministic for a given `rng` state. Grids narrower or shorter than 3
/// have no interior and come out all wall.
pub fn generate_cave(width: u32, height: u32, params: &CaveParams, rng: &mut impl Rng) -> CaveGrid {
    let p = if params.wall_probability.is_nan() {
        0.0
    } else {
        params.wall_probability.clamp(0.0, 1.0)
    };

    let mut grid = CaveGrid::filled(width, height);
    for y in 0..height {
        for x in 0..width {
            let cell = if rng.gen_bool(p) {
                CaveCell::Wall
            } else {
                CaveCell::Floor
            };
            grid.set(x, y, cell);
        }
    }
    force_border(&mut grid);

    for _ in 0..params.iterations {
        grid = smooth(&grid);
    }

    debug!(
        "generated {}x{} cave: {} walls after {} passes",
        width,
        height,
        grid.wall_count(),
        params.iterations
    );
    grid
}

/// One majority-rule pass, reading only from `previous`.
fn smooth(previous: &CaveGrid) -> CaveGrid {
    let mut next = previous.clone();
    let (width, height) = (previous.width(), previous.height());
    if width >= 3 && height >= 3 {
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let cell = if wall_neighbours(previous, x, y) >= WALL_NEIGHBOUR_THRESHOLD {
                    CaveCell::Wall
                } else {
                    CaveCell::Floor
                };
                next.set(x, y, cell);
            }
        }
    }
    force_border(&mut next);
    next
}

/// Count walls among the 8 cells surrounding an interior `(x, y)`.
fn wall_neighbours(grid: &CaveGrid, x: u32, y: u32) -> u8 {
    let mut count = 0;
    for dy in -1i64..=1 {
        for dx in -1i64..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let nx = (x as i64 + dx) as u32;
            let ny = (y as i64 + dy) as u32;
            if grid.get(nx, ny).is_some_and(CaveCell::is_wall) {
                count += 1;
            }
        }
    }
    count
}

fn force_border(grid: &mut CaveGrid) {
    let (width, height) = (grid.width(), grid.height());
    for y in 0..height {
        for x in 0..width {
            if grid.is_border(x, y) {
                grid.set(x, y, CaveCell::Wall);
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn seeded_rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    fn border_is_wall(grid: &CaveGrid) -> bool {
        grid.iter()
            .filter(|&(x, y, _)| grid.is_border(x, y))
            .all(|(_, _, cell)| cell == CaveCell::Wall)
    }

    #[test]
    fn border_is_wall_for_any_size_and_iteration_count() {
        for (width, height) in [(3, 3), (4, 7), (16, 9), (40, 25)] {
            for iterations in 0..=6 {
                let params = CaveParams {
                    wall_probability: 0.46,
                    iterations,
                };
                let grid = generate_cave(width, height, &params, &mut seeded_rng(7));
                assert!(
                    border_is_wall(&grid),
                    "{width}x{height} with {iterations} iterations"
                );
            }
        }
    }

    #[test]
    fn border_is_wall_even_with_zero_wall_probability() {
        let params = CaveParams {
            wall_probability: 0.0,
            iterations: 0,
        };
        let grid = generate_cave(6, 5, &params, &mut seeded_rng(1));
        assert!(border_is_wall(&grid));
        // 4x3 interior, all floor
        assert_eq!(grid.wall_count(), 30 - 12);
    }

    #[test]
    fn same_seed_same_cave() {
        let params = CaveParams::default();
        let a = generate_cave(30, 20, &params, &mut seeded_rng(42));
        let b = generate_cave(30, 20, &params, &mut seeded_rng(42));
        assert_eq!(a, b);
    }

    #[test]
    fn dimensions_and_rows_shape() {
        let grid = generate_cave(7, 4, &CaveParams::default(), &mut seeded_rng(3));
        let rows = grid.rows();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.len() == 7));
        assert!(rows.iter().flatten().all(|&v| v == 0 || v == 1));
    }

    #[test]
    fn tiny_grids_are_all_wall() {
        for (width, height) in [(1, 1), (2, 5), (5, 2)] {
            let grid = generate_cave(width, height, &CaveParams::default(), &mut seeded_rng(0));
            assert_eq!(grid.wall_count(), (width * height) as usize);
        }
    }

    #[test]
    fn majority_rule_fills_surrounded_floor() {
        // 5x5 with only the center floor: it has 8 wall neighbours and becomes wall
        let mut grid = CaveGrid::filled(5, 5);
        grid.set(2, 2, CaveCell::Floor);
        let next = smooth(&grid);
        assert_eq!(next.get(2, 2), Some(CaveCell::Wall));
    }

    #[test]
    fn majority_rule_opens_sparse_walls() {
        // Interior all floor: each interior cell sees at most 5 border walls
        let mut grid = CaveGrid::filled(5, 5);
        for y in 1..4 {
            for x in 1..4 {
                grid.set(x, y, CaveCell::Floor);
            }
        }
        let next = smooth(&grid);
        assert_eq!(next.get(2, 2), Some(CaveCell::Floor));
        // Corner interior cell touches 5 border walls
        assert_eq!(next.get(1, 1), Some(CaveCell::Wall));
        // Edge-middle interior cell touches 3 border walls
        assert_eq!(next.get(2, 1), Some(CaveCell::Floor));
    }

    #[test]
    fn out_of_range_probability_is_clamped() {
        let params = CaveParams {
            wall_probability: 3.5,
            iterations: 2,
        };
        let grid = generate_cave(8, 8, &params, &mut seeded_rng(9));
        assert_eq!(grid.wall_count(), 64);
    }
}

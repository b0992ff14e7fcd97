use rand::Rng;

use crate::config::GridModel;
use crate::snake::{Position, Snake};

/// Random draws attempted before falling back to sampling the free cells.
pub const MAX_REJECTION_ATTEMPTS: usize = 32;

/// Picks a random cell not occupied by the snake.
///
/// Uses rejection sampling while the board is sparse and switches to a
/// uniform pick from the free cells once the snake covers half the grid or
/// the draws keep hitting the body. Returns `None` only when no cell is free.
#[must_use]
pub fn place<R: Rng + ?Sized>(rng: &mut R, snake: &Snake, grid: GridModel) -> Option<Position> {
    let total = grid.total_cells();
    if snake.len() >= total {
        return None;
    }

    if snake.len() * 2 < total {
        for _ in 0..MAX_REJECTION_ATTEMPTS {
            let candidate = Position {
                x: rng.gen_range(0..i32::from(grid.width)),
                y: rng.gen_range(0..i32::from(grid.height)),
            };
            if !snake.occupies(candidate) {
                return Some(candidate);
            }
        }
    }

    place_from_free_cells(rng, snake, grid)
}

fn place_from_free_cells<R: Rng + ?Sized>(
    rng: &mut R,
    snake: &Snake,
    grid: GridModel,
) -> Option<Position> {
    let candidates: Vec<Position> = grid
        .cells()
        .filter(|cell| !snake.occupies(*cell))
        .collect();

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

use log::debug;
use rand::Rng;

use crate::error::SpawnError;
use crate::grid::{Grid, Occupancy};

/// Places one food on a random empty cell below the reserved band.
///
/// Draws up to `2 * grid.len()` indices uniformly from the eligible range and
/// takes the first empty one. This is a bounded retry, not a scan: on a
/// nearly full board it may give up while free cells remain.
pub fn spawn<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &mut Grid,
    reserved_rows: usize,
) -> Result<usize, SpawnError> {
    let attempts = grid.len() * 2;
    let first_eligible = reserved_rows.saturating_mul(grid.size().cols);
    if first_eligible >= grid.len() {
        return Err(SpawnError::NoSpaceLeft { attempts: 0 });
    }

    for _ in 0..attempts {
        let index = rng.gen_range(first_eligible..grid.len());
        if grid[index].occupancy == Occupancy::Empty {
            grid[index].occupancy = Occupancy::Food;
            debug!("food placed at cell {index}");
            return Ok(index);
        }
    }

    Err(SpawnError::NoSpaceLeft { attempts })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::GridSize;
    use crate::error::SpawnError;
    use crate::grid::{Grid, Occupancy};

    use super::spawn;

    #[test]
    fn food_never_lands_in_reserved_band() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(GridSize { rows: 6, cols: 8 });

        for _ in 0..200 {
            let index = spawn(&mut rng, &mut grid, 2).expect("board has room");
            assert!(index >= 16);
            grid[index].occupancy = Occupancy::Empty;
        }
    }

    #[test]
    fn food_never_lands_on_occupied_cells() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut grid = Grid::new(GridSize { rows: 4, cols: 4 });
        for index in 4..10 {
            grid[index].occupancy = Occupancy::Body;
        }

        for _ in 0..100 {
            let index = spawn(&mut rng, &mut grid, 1).expect("half the board is free");
            assert!(index >= 10);
            assert_eq!(grid[index].occupancy, Occupancy::Food);
            grid[index].occupancy = Occupancy::Empty;
        }
    }

    #[test]
    fn full_board_reports_no_space_left() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::new(GridSize { rows: 3, cols: 3 });
        for index in 3..9 {
            grid[index].occupancy = Occupancy::Tail;
        }

        assert_eq!(
            spawn(&mut rng, &mut grid, 1),
            Err(SpawnError::NoSpaceLeft { attempts: 18 })
        );
    }

    #[test]
    fn band_covering_the_grid_has_no_space() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut grid = Grid::new(GridSize { rows: 2, cols: 3 });

        assert!(spawn(&mut rng, &mut grid, 2).is_err());
    }
}

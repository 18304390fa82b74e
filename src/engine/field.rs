use super::grid::Grid;
use super::piece::{Color, Piece};
use super::{Coordinate, GameError, Offset};

pub const FIELD_WIDTH: usize = 12;
pub const FIELD_HEIGHT: usize = 21;
/// Playfield position of the field's top-left cell; the top two rows sit
/// above the visible window, level with the spawn point.
pub const FIELD_ORIGIN: Offset = Offset::new(0, -2);

/// One field cell: empty, part of the permanent border, or a locked block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
    Block(Color),
}

impl Cell {
    pub fn is_occupied(self) -> bool {
        !matches!(self, Cell::Empty)
    }
}

/// The playfield: a grid of locked cells whose border (both side columns
/// and the bottom row) is wall-marked at creation and never cleared.
pub struct Field {
    grid: Grid<Cell>,
    position: Offset,
}

impl Field {
    pub fn new() -> Self {
        let mut grid = Grid::filled(FIELD_WIDTH, FIELD_HEIGHT, Cell::Empty);
        for y in 0..FIELD_HEIGHT {
            for x in 0..FIELD_WIDTH {
                if x == 0 || x == FIELD_WIDTH - 1 || y == FIELD_HEIGHT - 1 {
                    grid[Coordinate::new(x, y)] = Cell::Wall;
                }
            }
        }
        Self {
            grid,
            position: FIELD_ORIGIN,
        }
    }

    // translate a playfield coordinate to a grid coordinate
    fn local(&self, world: Offset) -> Option<Coordinate> {
        let rel = world - self.position;
        let (Ok(x), Ok(y)) = (usize::try_from(rel.x), usize::try_from(rel.y)) else {
            return None;
        };
        let coord = Coordinate::new(x, y);
        self.grid.in_bounds(coord).then_some(coord)
    }

    /// Cell under a playfield coordinate; `None` outside the grid.
    pub fn get(&self, world: Offset) -> Option<Cell> {
        self.local(world).and_then(|coord| self.grid.get(coord))
    }

    pub fn set(&mut self, world: Offset, cell: Cell) {
        let coord = self.local(world).expect("set outside the field");
        self.grid[coord] = cell;
    }

    /// True iff any filled cell of the piece lands on an occupied field
    /// cell. Each piece cell is checked against the single field cell it
    /// covers. Cells outside the grid (reachable only above the top edge)
    /// never collide.
    pub fn overlaps(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .any(|world| self.get(world).map_or(false, Cell::is_occupied))
    }

    /// Commits the piece's cells into the field, ending the piece's
    /// independent existence. Refuses to overwrite a wall or an already
    /// locked cell: that means a collision check was skipped and the grid
    /// can no longer be trusted.
    pub fn lock(&mut self, piece: &Piece) -> Result<(), GameError> {
        let color = piece.kind.color();
        for world in piece.cells() {
            let Some(coord) = self.local(world) else {
                continue;
            };
            match self.grid[coord] {
                Cell::Empty => self.grid[coord] = Cell::Block(color),
                _ => {
                    return Err(GameError::CellOccupied {
                        x: world.x,
                        y: world.y,
                    })
                }
            }
        }
        Ok(())
    }

    /// Grid row indices (ascending) whose interior is completely filled.
    /// The bottom wall row and the side wall columns are not inspected.
    pub fn full_rows(&self) -> Vec<usize> {
        let width = self.grid.width();
        (0..self.grid.height() - 1)
            .filter(|&y| {
                self.grid.row(y)[1..width - 1]
                    .iter()
                    .all(|cell| cell.is_occupied())
            })
            .collect()
    }

    /// Removes every row in `rows` in one pass over the detection result,
    /// shifting the rows above each one down and topping the grid up with
    /// fresh wall-flanked rows. Returns the number of rows cleared.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        let mut fresh = [Cell::Empty; FIELD_WIDTH];
        fresh[0] = Cell::Wall;
        fresh[FIELD_WIDTH - 1] = Cell::Wall;
        // ascending order keeps the remaining indices valid: dropping a
        // row only renumbers the rows above it
        for &row in rows {
            self.grid.drop_row(row, &fresh);
        }
        rows.len()
    }

    /// True once any interior cell of the top row is occupied; the spawn
    /// band is blocked and the game is over.
    pub fn top_band_occupied(&self) -> bool {
        let width = self.grid.width();
        self.grid.row(0)[1..width - 1]
            .iter()
            .any(|cell| cell.is_occupied())
    }

    /// Every cell with its playfield coordinate, for rendering.
    pub fn cells(&self) -> impl Iterator<Item = (Offset, Cell)> + '_ {
        let position = self.position;
        (0..self.grid.height()).flat_map(move |y| {
            (0..self.grid.width()).map(move |x| {
                let world = position + Offset::new(x as isize, y as isize);
                (world, self.grid[Coordinate::new(x, y)])
            })
        })
    }
}

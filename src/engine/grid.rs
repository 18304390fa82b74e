use std::ops::{Index, IndexMut};

use super::Coordinate;

// bounds-checked 2D container; row 0 is the top row
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    // get index in the 1d cell array
    fn indexing(&self, Coordinate { x, y }: Coordinate) -> usize {
        y * self.width + x
    }

    pub fn get(&self, coord: Coordinate) -> Option<T> {
        self.in_bounds(coord)
            .then(|| self.cells[self.indexing(coord)])
    }

    pub fn row(&self, y: usize) -> &[T] {
        assert!(y < self.height);
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Removes row `y` and prepends `fresh` at the top. Rows above the
    /// removed one shift down by one; rows below keep their indices.
    pub fn drop_row(&mut self, y: usize, fresh: &[T]) {
        assert!(y < self.height);
        assert_eq!(fresh.len(), self.width);
        let width = self.width;
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].copy_from_slice(fresh);
    }
}

impl<T: Copy> Index<Coordinate> for Grid<T> {
    type Output = T;

    fn index(&self, coord: Coordinate) -> &Self::Output {
        assert!(self.in_bounds(coord));
        &self.cells[self.indexing(coord)]
    }
}

impl<T: Copy> IndexMut<Coordinate> for Grid<T> {
    fn index_mut(&mut self, coord: Coordinate) -> &mut Self::Output {
        assert!(self.in_bounds(coord));
        let index = self.indexing(coord);
        &mut self.cells[index]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn get_is_bounds_checked() {
        let grid = Grid::filled(3, 2, 0u8);
        assert_eq!(grid.get(Coordinate::new(2, 1)), Some(0));
        assert_eq!(grid.get(Coordinate::new(3, 0)), None);
        assert_eq!(grid.get(Coordinate::new(0, 2)), None);
    }

    #[test]
    fn drop_row_keeps_dimensions() {
        let mut grid = Grid::filled(2, 3, 0u8);
        grid[Coordinate::new(0, 0)] = 1;
        grid[Coordinate::new(0, 2)] = 3;
        grid.drop_row(1, &[9, 9]);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        // fresh row on top, old top row one lower, bottom row untouched
        assert_eq!(grid[Coordinate::new(0, 0)], 9);
        assert_eq!(grid[Coordinate::new(0, 1)], 1);
        assert_eq!(grid[Coordinate::new(0, 2)], 3);
    }
}

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Folds arbitrary coordinates onto the torus.
    #[inline]
    pub fn wrap(&self, x: i32, y: i32) -> (i32, i32) {
        (
            x.rem_euclid(self.width as i32),
            y.rem_euclid(self.height as i32),
        )
    }
}

/// Permanent occupancy record of every cell either player has visited.
///
/// Cells are never cleared; the only mutation is [`Grid::mark`].
#[derive(Debug, Clone)]
pub struct Grid {
    extent: Extent,
    occupied: Vec<bool>,
    marked: usize,
}

impl Grid {
    pub fn new(extent: Extent) -> Self {
        Self {
            extent,
            occupied: vec![false; extent.cell_count()],
            marked: 0,
        }
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn width(&self) -> u32 {
        self.extent.width
    }

    pub fn height(&self) -> u32 {
        self.extent.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        let (x, y) = self.extent.wrap(x, y);
        x as usize + self.extent.width as usize * y as usize
    }

    pub fn mark(&mut self, x: i32, y: i32) {
        let index = self.index(x, y);
        if !self.occupied[index] {
            self.occupied[index] = true;
            self.marked += 1;
        }
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.occupied[self.index(x, y)]
    }

    pub fn occupied_count(&self) -> usize {
        self.marked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_is_idempotent_and_permanent() {
        let mut grid = Grid::new(Extent::new(8, 6));
        assert!(!grid.is_occupied(3, 4));

        grid.mark(3, 4);
        grid.mark(3, 4);
        assert!(grid.is_occupied(3, 4));
        assert_eq!(grid.occupied_count(), 1);

        grid.mark(0, 0);
        grid.mark(7, 5);
        assert!(grid.is_occupied(3, 4));
        assert_eq!(grid.occupied_count(), 3);
    }

    #[test]
    fn coordinates_wrap_before_indexing() {
        let mut grid = Grid::new(Extent::new(8, 6));
        grid.mark(-1, -1);
        assert!(grid.is_occupied(7, 5));

        grid.mark(9, 13);
        assert!(grid.is_occupied(1, 1));
        assert!(grid.is_occupied(17, -5));
    }

    #[test]
    fn rows_use_width_as_stride() {
        let mut grid = Grid::new(Extent::new(10, 4));
        grid.mark(0, 1);
        assert!(grid.is_occupied(0, 1));
        assert!(!grid.is_occupied(4, 0));
        assert!(!grid.is_occupied(0, 2));
    }
}

//! Walkability grid.
//!
//! Cells are addressed `(x, y)` with `x` in `0..width` and `y` in
//! `0..height`; storage is row-major (`rows[y][x]`), which is also the
//! layout the JSON snapshot exposes. Movement never consults the grid.
//! It only filters destination and spawn picks.

use animalia_types::Vector2D;

/// 2D boolean grid, `true` = walkable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationGrid {
    width: u32,
    height: u32,
    rows: Vec<Vec<bool>>,
}

impl NavigationGrid {
    /// A fully walkable grid.
    pub fn open(width: u32, height: u32) -> Self {
        let row_len = usize::try_from(width).unwrap_or(0);
        let row_count = usize::try_from(height).unwrap_or(0);
        Self {
            width,
            height,
            rows: vec![vec![true; row_len]; row_count],
        }
    }

    /// Width in cells.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether `(x, y)` is inside the grid and walkable.
    pub fn is_walkable(&self, x: u32, y: u32) -> bool {
        self.cell(x, y).copied().unwrap_or(false)
    }

    /// Mark a cell walkable or blocked. Out-of-range cells are ignored.
    pub fn set_walkable(&mut self, x: u32, y: u32, walkable: bool) {
        let (Ok(col), Ok(row)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = walkable;
        }
    }

    /// Number of walkable cells.
    pub fn walkable_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|cell| **cell).count())
            .sum()
    }

    /// Every walkable cell, row by row.
    pub fn walkable_cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).filter_map(move |x| self.is_walkable(x, y).then_some((x, y)))
        })
    }

    /// The cell containing `position`, if it lies inside the grid.
    pub fn cell_of(&self, position: Vector2D) -> Option<(u32, u32)> {
        let x = position.x.floor();
        let y = position.y.floor();
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        if x < 0.0 || y < 0.0 || x >= f64::from(self.width) || y >= f64::from(self.height) {
            return None;
        }
        // Range-checked above: both values are non-negative and below a u32.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let cell = (x as u32, y as u32);
        Some(cell)
    }

    /// Row-major copy of the cells, as exposed in snapshots.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.rows.clone()
    }

    fn cell(&self, x: u32, y: u32) -> Option<&bool> {
        let col = usize::try_from(x).ok()?;
        let row = usize::try_from(y).ok()?;
        self.rows.get(row)?.get(col)
    }
}

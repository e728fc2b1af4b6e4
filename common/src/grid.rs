use anyhow::{bail, Result};

use crate::layout::Layout;
use crate::pixel::Pixel;

/// The logical matrix: `rows * cols` pixels kept in row-major order, each
/// tagged with its physical strand position.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    pixels: Vec<Pixel>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize, layout: Layout, initial_brightness: u8) -> Result<Self> {
        if rows == 0 || cols == 0 {
            bail!("grid must have at least one row and one column, got {rows}x{cols}");
        }
        let Some(len) = rows.checked_mul(cols) else {
            bail!("grid of {rows}x{cols} pixels is too large");
        };
        let mut pixels = Vec::with_capacity(len);
        for row in 0..rows {
            for col in 0..cols {
                // index() only fails outside the grid
                let Some(idx) = layout.index(rows, cols, row, col) else {
                    bail!("layout {layout:?} has no position for ({row}, {col})");
                };
                let mut pixel = Pixel::new(idx);
                pixel.brightness = initial_brightness;
                pixels.push(pixel);
            }
        }
        Ok(Self {
            rows,
            cols,
            pixels,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row * self.cols + col)
    }

    pub fn pixel_at(&self, row: usize, col: usize) -> Option<&Pixel> {
        self.offset(row, col).map(|i| &self.pixels[i])
    }

    pub fn pixel_at_mut(&mut self, row: usize, col: usize) -> Option<&mut Pixel> {
        self.offset(row, col).map(move |i| &mut self.pixels[i])
    }

    pub fn fill(&mut self, red: u8, green: u8, blue: u8, brightness: u8) {
        for pixel in self.pixels.iter_mut() {
            pixel.set_rgb(red, green, blue);
            pixel.brightness = brightness;
        }
    }

    pub fn clear(&mut self) {
        self.pixels.iter_mut().for_each(Pixel::clear);
    }

    /// Walks the grid row by row, yielding (row, col, pixel).
    pub fn iter_grid(&self) -> impl Iterator<Item = (usize, usize, &Pixel)> + '_ {
        let cols = self.cols;
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, pixel)| (i / cols, i % cols, pixel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_overflow_rejected() {
        assert!(Grid::new(usize::MAX, 2, Layout::Linear, 255).is_err());
        assert!(Grid::new(usize::MAX / 2 + 1, 2, Layout::Serpentine, 255).is_err());
    }

    #[test]
    fn test_new_assigns_strand_ids() {
        let grid = Grid::new(2, 3, Layout::Serpentine, 255).unwrap();
        let ids: Vec<usize> = grid.pixels().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 5, 4, 3]);
        assert_eq!(grid.pixel_at(1, 0).unwrap().id, 5);
    }

    #[test]
    fn test_initial_brightness() {
        let grid = Grid::new(3, 3, Layout::Linear, 42).unwrap();
        assert!(grid.pixels().iter().all(|p| p.brightness == 42));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(Grid::new(0, 3, Layout::Serpentine, 255).is_err());
        assert!(Grid::new(3, 0, Layout::Linear, 255).is_err());
    }

    #[test]
    fn test_pixel_at_bounds() {
        let mut grid = Grid::new(2, 4, Layout::Linear, 255).unwrap();
        assert!(grid.pixel_at(2, 0).is_none());
        assert!(grid.pixel_at(0, 4).is_none());
        grid.pixel_at_mut(1, 3).unwrap().blue = 9;
        assert_eq!(grid.pixels()[7].blue, 9);
    }

    #[test]
    fn test_fill_and_clear() {
        let mut grid = Grid::new(2, 2, Layout::Serpentine, 255).unwrap();
        grid.fill(10, 20, 30, 100);
        assert!(grid
            .pixels()
            .iter()
            .all(|p| (p.red, p.green, p.blue, p.brightness) == (10, 20, 30, 100)));
        grid.clear();
        assert!(grid.pixels().iter().all(|p| p.render() == 0));
        assert!(grid.pixels().iter().all(|p| p.brightness == 100));
    }

    #[test]
    fn test_iter_grid_row_major() {
        let grid = Grid::new(2, 3, Layout::Serpentine, 255).unwrap();
        let cells: Vec<(usize, usize, usize)> =
            grid.iter_grid().map(|(r, c, p)| (r, c, p.id)).collect();
        assert_eq!(
            cells,
            vec![(0, 0, 0), (0, 1, 1), (0, 2, 2), (1, 0, 5), (1, 1, 4), (1, 2, 3)]
        );
    }
}

use anyhow::{bail, Result};

use crate::grid::Grid;
use crate::pixel::Pixel;
use crate::strand::Strand;

/// A grid bound to the strand it is shown on.
pub struct Display<S: Strand> {
    grid: Grid,
    strand: S,
}

impl<S: Strand> Display<S> {
    pub fn new(grid: Grid, strand: S) -> Result<Self> {
        if strand.len() < grid.len() {
            bail!(
                "strand has {} leds but the {}x{} grid needs {}",
                strand.len(),
                grid.rows(),
                grid.cols(),
                grid.len()
            );
        }
        Ok(Self { grid, strand })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn strand(&self) -> &S {
        &self.strand
    }

    pub fn pixel_at(&self, row: usize, col: usize) -> Option<&Pixel> {
        self.grid.pixel_at(row, col)
    }

    pub fn pixel_at_mut(&mut self, row: usize, col: usize) -> Option<&mut Pixel> {
        self.grid.pixel_at_mut(row, col)
    }

    pub fn fill(&mut self, red: u8, green: u8, blue: u8, brightness: u8) {
        self.grid.fill(red, green, blue, brightness);
    }

    pub fn iter_grid(&self) -> impl Iterator<Item = (usize, usize, &Pixel)> + '_ {
        self.grid.iter_grid()
    }

    /// Copies every pixel's rendered word to its strand position and latches
    /// the strand.
    pub fn show(&mut self) -> Result<()> {
        for pixel in self.grid.pixels() {
            self.strand.set(pixel.id, pixel.render())?;
        }
        self.strand.show()
    }

    /// Blanks every pixel and shows the result immediately.
    pub fn clear(&mut self) -> Result<()> {
        self.grid.clear();
        self.show()
    }
}

//! Paints a grid the way the LEDs would look: one round dot per pixel on a
//! black background, inside a border, with a status line underneath.

use neogrid_common::Grid;

use crate::fb::{CellStyle, FrameBuffer, Rgb};

// Each LED takes two terminal columns so the matrix comes out roughly square
const CELL_WIDTH: u16 = 2;
const LIT: char = '●';
const UNLIT: char = '○';

#[derive(Debug, Clone, Copy)]
pub struct MatrixView {
    pub border: Rgb,
    pub unlit: Rgb,
}

impl Default for MatrixView {
    fn default() -> Self {
        Self {
            border: Rgb::new(90, 90, 90),
            unlit: Rgb::new(40, 40, 40),
        }
    }
}

impl MatrixView {
    /// Framebuffer size needed for a grid: border on every side plus one
    /// status line.
    pub fn size_for(grid: &Grid) -> (u16, u16) {
        let cols = u16::try_from(grid.cols()).unwrap_or(u16::MAX);
        let rows = u16::try_from(grid.rows()).unwrap_or(u16::MAX);
        (
            cols.saturating_mul(CELL_WIDTH).saturating_add(3),
            rows.saturating_add(3),
        )
    }

    pub fn render(&self, grid: &Grid, status: &str, fb: &mut FrameBuffer) {
        let (width, height) = Self::size_for(grid);
        if fb.width() != width || fb.height() != height {
            fb.resize(width, height);
        } else {
            fb.clear();
        }
        self.draw_border(fb, width, height - 1);

        for (row, col, pixel) in grid.iter_grid() {
            let (Ok(row), Ok(col)) = (u16::try_from(row), u16::try_from(col)) else {
                continue;
            };
            let color = Rgb::from(pixel.scaled_rgb());
            let (ch, fg) = if color.is_black() {
                (UNLIT, self.unlit)
            } else {
                (LIT, color)
            };
            fb.put_char(2 + col * CELL_WIDTH, 1 + row, ch, CellStyle::fg(fg));
        }

        fb.put_str(0, height - 1, status, CellStyle::default());
    }

    fn draw_border(&self, fb: &mut FrameBuffer, width: u16, height: u16) {
        let style = CellStyle::fg(self.border);
        let (right, bottom) = (width - 1, height - 1);
        for x in 1..right {
            fb.put_char(x, 0, '─', style);
            fb.put_char(x, bottom, '─', style);
        }
        for y in 1..bottom {
            fb.put_char(0, y, '│', style);
            fb.put_char(right, y, '│', style);
        }
        fb.put_char(0, 0, '┌', style);
        fb.put_char(right, 0, '┐', style);
        fb.put_char(0, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neogrid_common::Layout;

    #[test]
    fn test_size_for() {
        let grid = Grid::new(7, 7, Layout::Linear, 255).unwrap();
        assert_eq!(MatrixView::size_for(&grid), (17, 10));
    }

    #[test]
    fn test_render_places_pixels() {
        let mut grid = Grid::new(2, 3, Layout::Linear, 255).unwrap();
        grid.pixel_at_mut(1, 2).unwrap().set_rgb(0, 0, 255);
        grid.pixel_at_mut(0, 0).unwrap().set_rgb(255, 0, 0);
        grid.pixel_at_mut(0, 0).unwrap().brightness = 128;

        let view = MatrixView::default();
        let mut fb = FrameBuffer::new(1, 1);
        view.render(&grid, "pulse", &mut fb);

        assert_eq!((fb.width(), fb.height()), (9, 5));
        let lit = fb.get(2 + 2 * 2, 2).unwrap();
        assert_eq!(lit.ch, LIT);
        assert_eq!(lit.style.fg, Rgb::new(0, 0, 255));
        let dim = fb.get(2, 1).unwrap();
        assert_eq!(dim.style.fg, Rgb::new(128, 0, 0));
        let off = fb.get(4, 1).unwrap();
        assert_eq!((off.ch, off.style.fg), (UNLIT, view.unlit));
        assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
        assert_eq!(fb.get(8, 3).unwrap().ch, '┘');
        assert_eq!(fb.get(0, 4).unwrap().ch, 'p');
    }
}

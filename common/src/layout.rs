/// How the physical strand is threaded through the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Strand snakes across rows, reversing direction on every odd row:
    ///
    /// ```text
    ///   LED0  LED1  LED2
    ///   LED5  LED4  LED3
    ///   LED6  LED7  LED8
    /// ```
    #[default]
    Serpentine,
    /// Every row runs left to right. Used where nothing is wired, e.g. the
    /// simulator.
    Linear,
}

impl Layout {
    /// Strand index for a logical (row, col), or None when it falls outside a
    /// rows x cols grid.
    pub fn index(&self, rows: usize, cols: usize, row: usize, col: usize) -> Option<usize> {
        if row >= rows || col >= cols {
            return None;
        }
        let idx = match self {
            Layout::Serpentine if row % 2 != 0 => (row + 1) * cols - col - 1,
            Layout::Serpentine | Layout::Linear => row * cols + col,
        };
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serpentine_3x3() {
        let expected = [[0, 1, 2], [5, 4, 3], [6, 7, 8]];
        for (row, cols) in expected.iter().enumerate() {
            for (col, idx) in cols.iter().enumerate() {
                assert_eq!(Layout::Serpentine.index(3, 3, row, col), Some(*idx));
            }
        }
    }

    #[test]
    fn test_serpentine_non_square() {
        // 2 rows of 4: second row runs back from 7 to 4
        assert_eq!(Layout::Serpentine.index(2, 4, 1, 0), Some(7));
        assert_eq!(Layout::Serpentine.index(2, 4, 1, 3), Some(4));
        assert_eq!(Layout::Serpentine.index(2, 4, 0, 3), Some(3));
    }

    #[test]
    fn test_mapping_is_bijection() {
        for layout in [Layout::Serpentine, Layout::Linear] {
            let (rows, cols) = (7, 5);
            let mut seen = vec![false; rows * cols];
            for row in 0..rows {
                for col in 0..cols {
                    let idx = layout.index(rows, cols, row, col).unwrap();
                    assert!(!seen[idx], "{layout:?} maps twice to {idx}");
                    seen[idx] = true;
                }
            }
            assert!(seen.iter().all(|s| *s));
        }
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(Layout::Serpentine.index(7, 7, 7, 0), None);
        assert_eq!(Layout::Linear.index(7, 7, 0, 7), None);
        assert_eq!(Layout::Linear.index(7, 7, 6, 6), Some(48));
    }
}

//! Character-cell grid laid over an image for the border filters.

use crate::{AsciiArtError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGrid {
    pub cell_w: u32,
    pub cell_h: u32,
    pub cols: u32,
    pub rows: u32,
}

impl CellGrid {
    /// Fit as many whole cells as possible into a `width × height` image.
    pub fn fit(width: u32, height: u32, cell_w: u32, cell_h: u32) -> Result<Self> {
        if cell_w == 0 || cell_h == 0 {
            return Err(AsciiArtError::Render("invalid font cell size".into()));
        }
        let cols = width / cell_w;
        let rows = height / cell_h;
        if cols < 1 || rows < 1 {
            return Err(AsciiArtError::Render(
                "image too small for given font size".into(),
            ));
        }
        Ok(Self { cell_w, cell_h, cols, rows })
    }

    /// Pixel position of the top-left corner of cell (col, row)
    pub fn origin(&self, col: u32, row: u32) -> (u32, u32) {
        (col * self.cell_w, row * self.cell_h)
    }

    /// Cells between (col, row) and the nearest grid edge.
    pub fn edge_distance(&self, col: u32, row: u32) -> u32 {
        col.min(self.cols - 1 - col)
            .min(row)
            .min(self.rows - 1 - row)
    }

    /// Largest band thickness that still leaves a centre.
    pub fn max_band(&self) -> u32 {
        self.cols.min(self.rows) / 2
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned rectangle in pixel coordinates, `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Region {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Region {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge, `None` on overflow.
    pub fn right(&self) -> Option<usize> {
        self.x.checked_add(self.width)
    }

    /// Exclusive bottom edge, `None` on overflow.
    pub fn bottom(&self) -> Option<usize> {
        self.y.checked_add(self.height)
    }

    pub fn fits_within(&self, image_width: usize, image_height: usize) -> bool {
        matches!(self.right(), Some(right) if right <= image_width)
            && matches!(self.bottom(), Some(bottom) if bottom <= image_height)
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// One cell of a [`BlockGrid`]. Cells on the right and bottom edges of the
/// region may be smaller than the nominal block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Block {
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// Row-major partition of a region into `block_size` squares.
///
/// The last column and the last row are truncated to the region edge, so the
/// blocks cover the region exactly once.
#[derive(Debug, Clone)]
pub struct BlockGrid {
    region: Region,
    block_size: usize,
    x: usize,
    y: usize,
}

impl BlockGrid {
    /// A `block_size` of zero gives an empty grid with no rows or columns.
    pub fn new(region: Region, block_size: usize) -> Self {
        Self {
            region,
            block_size,
            x: region.x,
            y: region.y,
        }
    }

    pub fn columns(&self) -> usize {
        if self.block_size == 0 {
            return 0;
        }
        self.region.width.div_ceil(self.block_size)
    }

    pub fn rows(&self) -> usize {
        if self.block_size == 0 {
            return 0;
        }
        self.region.height.div_ceil(self.block_size)
    }
}

impl Iterator for BlockGrid {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        let right = self.region.x.saturating_add(self.region.width);
        let bottom = self.region.y.saturating_add(self.region.height);

        if self.block_size == 0 || self.x >= right || self.y >= bottom {
            return None;
        }

        let block = Block {
            x: self.x,
            y: self.y,
            width: self.block_size.min(right - self.x),
            height: self.block_size.min(bottom - self.y),
        };

        self.x += block.width;
        if self.x >= right {
            self.x = self.region.x;
            self.y += block.height;
        }

        Some(block)
    }
}

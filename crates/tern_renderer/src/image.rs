//! Output pixel buffer assembled from finished scanlines.

use crate::{RenderError, RenderResult};

/// Bytes per RGBA8 pixel.
pub const CHANNELS: usize = 4;

/// Row-major, top-to-bottom RGBA8 image.
///
/// Rows are written by index, so they may arrive in any order; each row can
/// be written exactly once.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<u8>,
    assembled: Vec<bool>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * CHANNELS],
            assembled: vec![false; height as usize],
        }
    }

    /// Copy a finished row into place.
    pub fn write_row(&mut self, row: u32, colors: &[[u8; 4]]) -> RenderResult<()> {
        if row >= self.height {
            return Err(RenderError::RowOutOfBounds {
                row,
                height: self.height,
            });
        }
        if colors.len() != self.width as usize {
            return Err(RenderError::RowLength {
                row,
                expected: self.width as usize,
                actual: colors.len(),
            });
        }
        if self.assembled[row as usize] {
            return Err(RenderError::DuplicateRow(row));
        }

        let stride = self.width as usize * CHANNELS;
        let start = row as usize * stride;
        for (dst, rgba) in self.pixels[start..start + stride]
            .chunks_exact_mut(CHANNELS)
            .zip(colors)
        {
            dst.copy_from_slice(rgba);
        }
        self.assembled[row as usize] = true;
        Ok(())
    }

    /// Number of rows written so far.
    pub fn rows_assembled(&self) -> usize {
        self.assembled.iter().filter(|done| **done).count()
    }

    /// True once every row has been written.
    pub fn is_complete(&self) -> bool {
        self.assembled.iter().all(|done| *done)
    }

    /// Get the pixel at (x, y), with y = 0 at the top.
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + CHANNELS]);
        rgba
    }

    /// The raw RGBA bytes.
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer, returning the raw RGBA bytes.
    pub fn into_rgba(self) -> Vec<u8> {
        self.pixels
    }
}

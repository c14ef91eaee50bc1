// Copyright 2025. Scene rendering and image comparison for the aggplot canvas.
//
// Images are compared as RGB24 buffers decoded through aggplot's own codec,
// so PNG and BMP outputs of the same canvas compare as identical.

use std::path::Path;

use aggplot::export::{load_image, DecodedImage};
use aggplot::ExportError;

pub mod scenes;

// ============================================================================
// Comparison Result
// ============================================================================

/// Information about a single pixel difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffInfo {
    pub x: u32,
    pub y: u32,
    pub pixel_a: [u8; 3],
    pub pixel_b: [u8; 3],
}

/// Result of comparing two RGB images.
#[derive(Debug, Clone)]
pub struct CompareResult {
    pub identical: bool,
    pub total_pixels: u64,
    /// Pixels that differ by at least 1 in any channel.
    pub different_pixels: u64,
    pub max_channel_diff: u8,
    /// First differing pixel, scanning top to bottom.
    pub first_diff: Option<DiffInfo>,
}

impl std::fmt::Display for CompareResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.identical {
            return write!(f, "IDENTICAL: {} pixels match", self.total_pixels);
        }
        write!(
            f,
            "DIFFERENT: {}/{} pixels differ ({:.2}%), max_diff={}",
            self.different_pixels,
            self.total_pixels,
            self.different_pixels as f64 / self.total_pixels as f64 * 100.0,
            self.max_channel_diff,
        )?;
        if let Some(ref d) = self.first_diff {
            write!(
                f,
                "\n  First diff at ({}, {}): A={:?} B={:?}",
                d.x, d.y, d.pixel_a, d.pixel_b
            )?;
        }
        Ok(())
    }
}

/// Why two images could not be compared.
#[derive(Debug)]
pub enum CompareError {
    Load(ExportError),
    SizeMismatch {
        a: (u32, u32),
        b: (u32, u32),
    },
}

impl std::fmt::Display for CompareError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompareError::Load(e) => write!(f, "cannot load image: {}", e),
            CompareError::SizeMismatch { a, b } => {
                write!(f, "size mismatch: {}x{} vs {}x{}", a.0, a.1, b.0, b.1)
            }
        }
    }
}

impl std::error::Error for CompareError {}

impl From<ExportError> for CompareError {
    fn from(e: ExportError) -> Self {
        CompareError::Load(e)
    }
}

// ============================================================================
// Comparison
// ============================================================================

/// Compare two decoded images pixel by pixel.
pub fn compare_images(a: &DecodedImage, b: &DecodedImage) -> Result<CompareResult, CompareError> {
    if (a.width, a.height) != (b.width, b.height) {
        return Err(CompareError::SizeMismatch {
            a: (a.width, a.height),
            b: (b.width, b.height),
        });
    }

    let mut different_pixels = 0u64;
    let mut max_channel_diff = 0u8;
    let mut first_diff = None;

    for y in 0..a.height {
        for x in 0..a.width {
            let (pa, pb) = (a.pixel(x, y), b.pixel(x, y));
            let diff = pa
                .iter()
                .zip(pb.iter())
                .map(|(&ca, &cb)| ca.abs_diff(cb))
                .max()
                .unwrap_or(0);
            if diff > 0 {
                different_pixels += 1;
                max_channel_diff = max_channel_diff.max(diff);
                if first_diff.is_none() {
                    first_diff = Some(DiffInfo {
                        x,
                        y,
                        pixel_a: pa,
                        pixel_b: pb,
                    });
                }
            }
        }
    }

    Ok(CompareResult {
        identical: different_pixels == 0,
        total_pixels: a.width as u64 * a.height as u64,
        different_pixels,
        max_channel_diff,
        first_diff,
    })
}

/// Load and compare two image files (PNG or BMP, by extension).
pub fn compare_files(a: &Path, b: &Path) -> Result<CompareResult, CompareError> {
    let a = load_image(a)?;
    let b = load_image(b)?;
    compare_images(&a, &b)
}

//! PNG / BMP export of RGB24 pixel buffers.
//!
//! Buffers are encoded top-down in stored order, three bytes per pixel, no
//! alpha channel. In-memory encodes return an owned [`PngBuffer`]; nothing
//! here hands out references into temporaries.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};

use crate::error::ExportError;
use crate::raster::BYTES_PER_PIXEL;

/// An encoded PNG owned by the caller until [`free`](PngBuffer::free)d or dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PngBuffer {
    data: Option<Vec<u8>>,
}

impl PngBuffer {
    fn new(data: Vec<u8>) -> Self {
        Self { data: Some(data) }
    }

    /// Encoded bytes; empty once freed.
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_deref().unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release the encoded bytes. Calling it again is a no-op.
    pub fn free(&mut self) {
        if let Some(data) = self.data.take() {
            log::debug!("freed {} byte png buffer", data.len());
        }
    }

    pub fn is_freed(&self) -> bool {
        self.data.is_none()
    }

    /// Take ownership of the bytes, leaving an empty vector if already freed.
    pub fn into_vec(self) -> Vec<u8> {
        self.data.unwrap_or_default()
    }
}

impl AsRef<[u8]> for PngBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// A decoded RGB24 image, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Pixel in stored (top-down) order.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = ((y * self.width + x) as usize) * BYTES_PER_PIXEL;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }
}

fn check_len(buf: &[u8], width: u32, height: u32) -> Result<(), ExportError> {
    let expected = width as usize * height as usize * BYTES_PER_PIXEL;
    if buf.len() != expected {
        return Err(ExportError::BufferSize {
            expected,
            actual: buf.len(),
        });
    }
    Ok(())
}

/// `path` with `ext` appended (not substituted): `plot` -> `plot.png`.
fn with_appended_extension(path: &Path, ext: &str) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".");
    os.push(ext);
    PathBuf::from(os)
}

/// Encode to PNG in memory.
pub fn encode_png(buf: &[u8], width: u32, height: u32) -> Result<PngBuffer, ExportError> {
    check_len(buf, width, height)?;
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(buf, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| {
            let err = ExportError::from(e);
            log::warn!("png encode failed (code {}): {}", err.code(), err);
            err
        })?;
    log::debug!("encoded {}x{} png into {} bytes", width, height, out.len());
    Ok(PngBuffer::new(out))
}

fn save(
    buf: &[u8],
    width: u32,
    height: u32,
    path: &Path,
    format: ImageFormat,
    ext: &str,
) -> Result<PathBuf, ExportError> {
    check_len(buf, width, height)?;
    let target = with_appended_extension(path, ext);
    image::save_buffer_with_format(&target, buf, width, height, ExtendedColorType::Rgb8, format)
        .map_err(|e| {
            let err = ExportError::from(e);
            log::warn!("cannot write {}: {}", target.display(), err);
            err
        })?;
    log::debug!("wrote {}", target.display());
    Ok(target)
}

/// Write `<path>.png`, returning the path actually written.
pub fn save_png(
    buf: &[u8],
    width: u32,
    height: u32,
    path: impl AsRef<Path>,
) -> Result<PathBuf, ExportError> {
    save(buf, width, height, path.as_ref(), ImageFormat::Png, "png")
}

/// Write `<path>.bmp`, returning the path actually written.
pub fn save_bmp(
    buf: &[u8],
    width: u32,
    height: u32,
    path: impl AsRef<Path>,
) -> Result<PathBuf, ExportError> {
    save(buf, width, height, path.as_ref(), ImageFormat::Bmp, "bmp")
}

/// Decode PNG bytes into RGB24.
pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage, ExportError> {
    let img = image::load(Cursor::new(bytes), ImageFormat::Png)?.into_rgb8();
    let (width, height) = img.dimensions();
    Ok(DecodedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}

/// Decode an image file of any enabled format into RGB24.
pub fn load_image(path: impl AsRef<Path>) -> Result<DecodedImage, ExportError> {
    let img = image::open(path)?.into_rgb8();
    let (width, height) = img.dimensions();
    Ok(DecodedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}

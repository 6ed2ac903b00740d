use crate::error::{ShotError, ShotResult};
use crate::types::ClipboardCandidate;
use byte_unit::{Byte, UnitType};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

/// Raw RGBA data bigger than this is refused rather than staged.
pub const MAX_CLIPBOARD_BYTES: u64 = 256 * 1024 * 1024;

/// Anything which can hand us the image currently on a clipboard. An empty clipboard, or one
/// holding something other than an image, is `ShotError::NotFound`.
pub trait ImageClipboard {
    fn read_image(&mut self) -> ShotResult<ClipboardCandidate>;
}

/// The real system clipboard. Reading it never changes it.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClipboard;

impl ImageClipboard for SystemClipboard {
    fn read_image(&mut self) -> ShotResult<ClipboardCandidate> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ShotError::Clipboard(e.to_string()))?;

        match clipboard.get_image() {
            Ok(image) => encode_png(image.width, image.height, &image.bytes),
            Err(arboard::Error::ContentNotAvailable) => Err(ShotError::NotFound),
            Err(e) => Err(ShotError::Clipboard(e.to_string())),
        }
    }
}

/// Turns the RGBA pixels a clipboard gives us into PNG data.
pub fn encode_png(width: usize, height: usize, rgba: &[u8]) -> ShotResult<ClipboardCandidate> {
    encode_png_with_limit(width, height, rgba, MAX_CLIPBOARD_BYTES)
}

/// As `encode_png`, refusing more than `limit` bytes of pixel data before looking at it.
pub fn encode_png_with_limit(
    width: usize,
    height: usize,
    rgba: &[u8],
    limit: u64,
) -> ShotResult<ClipboardCandidate> {
    if width == 0 || height == 0 || rgba.is_empty() {
        return Err(ShotError::NotFound);
    }

    let size = rgba.len() as u64;
    if size > limit {
        return Err(ShotError::ClipboardTooLarge {
            size: human_size(size),
            limit: human_size(limit),
        });
    }

    let expected = width.checked_mul(height).and_then(|pixels| pixels.checked_mul(4));
    if expected != Some(rgba.len()) {
        return Err(ShotError::Encode(format!(
            "{}x{} image has {} bytes of RGBA data",
            width,
            height,
            rgba.len()
        )));
    }

    let width = u32::try_from(width).map_err(|e| ShotError::Encode(e.to_string()))?;
    let height = u32::try_from(height).map_err(|e| ShotError::Encode(e.to_string()))?;

    let mut data = Vec::new();
    PngEncoder::new(&mut data)
        .write_image(rgba, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| ShotError::Encode(e.to_string()))?;

    Ok(ClipboardCandidate { data })
}

pub fn human_size(bytes: u64) -> String {
    format!(
        "{:.1}",
        Byte::from_u64(bytes).get_appropriate_unit(UnitType::Binary)
    )
}

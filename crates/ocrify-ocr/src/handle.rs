use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use ocrify_types::OcrError;

/// Already-decoded pixel data. Decoding and format negotiation belong to
/// the external loader; the pipeline only borrows the handle for the
/// duration of one OCR call.
pub struct ImageHandle {
    image: DynamicImage,
}

impl ImageHandle {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Encode the pixels as PNG, the canonical form the engine accepts.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, OcrError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| OcrError::RecognitionFailed(format!("failed to encode image: {e}")))?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_valid_png() {
        let handle = ImageHandle::new(DynamicImage::new_rgb8(8, 8));
        let bytes = handle.to_png_bytes().unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(handle.width(), 8);
        assert_eq!(handle.height(), 8);
    }
}

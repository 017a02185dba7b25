mod engine;
mod handle;
mod tesseract;

pub use engine::OcrEngine;
pub use handle::ImageHandle;
pub use tesseract::TesseractEngine;

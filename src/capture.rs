use std::io::Cursor;
use std::path::PathBuf;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use tracing::debug;

/// Camera seam. The crate never talks to real camera hardware; front-ends
/// supply an implementation for their platform.
#[async_trait]
pub trait FrameSource: Send {
    /// The current frame, or `None` when the source is paused, ended, or has
    /// no ready frame yet. A `None` tick is skipped, not an error.
    async fn grab(&mut self) -> Option<RgbaImage>;
}

/// Frame source backed by an image file on disk, re-read on every grab so a
/// changing file shows up in the loop. Good enough for hosts without camera
/// integration and for demos.
pub struct StillImageSource {
    path: PathBuf,
}

impl StillImageSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl FrameSource for StillImageSource {
    async fn grab(&mut self) -> Option<RgbaImage> {
        match image::open(&self.path) {
            Ok(img) => Some(img.to_rgba8()),
            Err(e) => {
                debug!("still image source {} not readable: {e}", self.path.display());
                None
            }
        }
    }
}

/// Downscale (if wider than `max_width`), JPEG-encode at `quality`, and wrap
/// as a `data:image/jpeg;base64,` URL. Returns None on encode failure
/// (non-fatal, the tick is skipped).
pub fn encode_frame(frame: &RgbaImage, quality: u8, max_width: u32) -> Option<String> {
    let (width, height) = frame.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let resized;
    let frame = if width > max_width {
        let new_height = (height as f64 * max_width as f64 / width as f64) as u32;
        resized = image::imageops::resize(frame, max_width, new_height.max(1), FilterType::Triangle);
        &resized
    } else {
        frame
    };

    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgba8(frame.clone()).to_rgb8();

    let mut buf = Cursor::new(Vec::new());
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode_image(&rgb).ok()?;

    Some(format!(
        "data:image/jpeg;base64,{}",
        STANDARD.encode(buf.into_inner())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid_frame(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([120, 80, 200, 255]))
    }

    #[test]
    fn test_encode_produces_jpeg_data_url() {
        let url = encode_frame(&solid_frame(320, 240), 70, 640).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));

        // The payload must round-trip back into a decodable JPEG.
        let b64 = url.strip_prefix("data:image/jpeg;base64,").unwrap();
        let bytes = STANDARD.decode(b64).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (320, 240));
    }

    #[test]
    fn test_encode_downscales_wide_frames() {
        let url = encode_frame(&solid_frame(1280, 720), 70, 640).unwrap();
        let b64 = url.strip_prefix("data:image/jpeg;base64,").unwrap();
        let bytes = STANDARD.decode(b64).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (640, 360));
    }

    #[test]
    fn test_encode_rejects_empty_frame() {
        let empty = RgbaImage::new(0, 0);
        assert!(encode_frame(&empty, 70, 640).is_none());
    }

    #[tokio::test]
    async fn test_still_source_missing_file_is_skipped() {
        let mut source = StillImageSource::new(PathBuf::from("/nonexistent/frame.png"));
        assert!(source.grab().await.is_none());
    }
}

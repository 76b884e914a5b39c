//! PNG output for overlays and analysis framebuffers.
//!
//! Pure Rust encoding with the `png` crate. Always RGBA8 so overlay alpha survives.

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// PNG encoder for framebuffers.
pub struct PngEncoder;

impl PngEncoder {
    /// Encode `fb` into any writer.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding or the underlying write fails.
    pub fn write<W: Write>(fb: &Framebuffer, out: W) -> Result<()> {
        let mut encoder = png::Encoder::new(out, fb.width(), fb.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&fb.to_compact_pixels())?;
        writer.finish()?;
        Ok(())
    }

    /// Write `fb` to a PNG file, creating or truncating it.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<()> {
        let path = path.as_ref();
        Self::write(fb, BufWriter::new(File::create(path)?))?;
        crate::debug!("png", "wrote {}x{} to {}", fb.width(), fb.height(), path.display());
        Ok(())
    }

    /// Encode `fb` to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::write(fb, &mut buffer)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    fn decode(bytes: &[u8]) -> (png::OutputInfo, Vec<u8>) {
        let mut reader = png::Decoder::new(bytes).read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        buf.truncate(info.buffer_size());
        (info, buf)
    }

    #[test]
    fn test_png_to_bytes() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::new(255, 0, 0, 128));

        let bytes = PngEncoder::to_bytes(&fb).unwrap();
        assert_eq!(&bytes[0..8], &PNG_MAGIC);

        let (info, pixels) = decode(&bytes);
        assert_eq!((info.width, info.height), (10, 10));
        assert_eq!(info.color_type, png::ColorType::Rgba);
        assert_eq!(&pixels[..4], &[255, 0, 0, 128]);
    }

    #[test]
    fn test_padding_is_not_encoded() {
        // 3 px rows are padded to 64 bytes in memory
        let mut fb = Framebuffer::new(3, 2).unwrap();
        fb.set_pixel(2, 1, Rgba::WHITE);
        let (_, pixels) = decode(&PngEncoder::to_bytes(&fb).unwrap());
        assert_eq!(pixels.len(), 3 * 2 * 4);
        assert_eq!(&pixels[20..24], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overlay.png");
        let fb = Framebuffer::new(4, 4).unwrap();

        PngEncoder::write_to_file(&fb, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let fb = Framebuffer::new(1, 1).unwrap();
        let err = PngEncoder::write_to_file(&fb, dir.path().join("nope/x.png")).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}

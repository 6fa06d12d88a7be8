//! Rendered page rasters

use image::RgbImage;

/// An immutable RGB24 raster of one page at one scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    image: RgbImage,
}

impl RenderedImage {
    /// Wrap tightly packed RGB24 samples. Returns `None` if the buffer length
    /// does not match `width * height * 3`.
    pub fn from_rgb(width: u32, height: u32, samples: Vec<u8>) -> Option<Self> {
        RgbImage::from_raw(width, height, samples).map(|image| Self { image })
    }

    /// Build from RGBA samples, dropping the alpha channel.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if rgba.len() != expected {
            return None;
        }

        let mut samples = Vec::with_capacity(expected / 4 * 3);
        for pixel in rgba.chunks_exact(4) {
            samples.extend_from_slice(&pixel[..3]);
        }
        Self::from_rgb(width, height, samples)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Row-major RGB24 samples
    pub fn samples(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// RGB value at `(x, y)`, or `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.image.get_pixel(x, y).0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_drops_alpha() {
        let rgba = [10, 20, 30, 255, 40, 50, 60, 0];
        let image = RenderedImage::from_rgba(2, 1, &rgba).unwrap();
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 1);
        assert_eq!(image.samples(), &[10, 20, 30, 40, 50, 60]);
        assert_eq!(image.pixel(1, 0), Some([40, 50, 60]));
    }

    #[test]
    fn test_size_mismatch_rejected() {
        assert!(RenderedImage::from_rgba(2, 2, &[0; 12]).is_none());
        assert!(RenderedImage::from_rgb(2, 2, vec![0; 11]).is_none());
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let image = RenderedImage::from_rgb(1, 1, vec![1, 2, 3]).unwrap();
        assert_eq!(image.pixel(0, 0), Some([1, 2, 3]));
        assert_eq!(image.pixel(1, 0), None);
        assert_eq!(image.pixel(0, 1), None);
    }
}

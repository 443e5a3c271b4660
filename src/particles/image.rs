use crate::error::FieldError;

/// Bytes per RGBA8 pixel
pub const CHANNELS: usize = 4;

/// A decoded RGBA8 image, rows stored bottom-up (row 0 is the bottom row)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl PixelImage {
    /// Wrap a bottom-up RGBA8 buffer
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::invalid_image(width, height, "zero dimension"));
        }

        let expected = width as usize * height as usize * CHANNELS;
        if rgba.len() != expected {
            return Err(FieldError::invalid_image(
                width,
                height,
                format!("expected {} bytes of RGBA, got {}", expected, rgba.len()),
            ));
        }

        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Wrap a top-down buffer (decoder order) by flipping its rows
    ///
    /// Touch coordinates grow upward, so the field reads the image bottom row first.
    pub fn from_top_down(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, FieldError> {
        let mut image = Self::new(width, height, rgba)?;
        image.flip_rows();
        Ok(image)
    }

    fn flip_rows(&mut self) {
        let stride = self.width as usize * CHANNELS;
        let rows = self.height as usize;
        for row in 0..rows / 2 {
            let (top, bottom) = self.rgba.split_at_mut((rows - 1 - row) * stride);
            top[row * stride..(row + 1) * stride].swap_with_slice(&mut bottom[..stride]);
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Red channel of the pixel at flattened index `i`
    pub fn red(&self, i: usize) -> u8 {
        self.rgba[i * CHANNELS]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba_from_reds(reds: &[u8]) -> Vec<u8> {
        reds.iter().flat_map(|&r| [r, 0, 0, 255]).collect()
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            PixelImage::new(0, 4, vec![]),
            Err(FieldError::InvalidImage { width: 0, .. })
        ));
        assert!(matches!(
            PixelImage::new(4, 0, vec![]),
            Err(FieldError::InvalidImage { height: 0, .. })
        ));
    }

    #[test]
    fn test_buffer_length_checked() {
        let result = PixelImage::new(2, 2, vec![0; 15]);
        assert!(matches!(result, Err(FieldError::InvalidImage { .. })));
    }

    #[test]
    fn test_from_top_down_flips_rows() {
        // 1x3 column: top=10, middle=20, bottom=30
        let image = PixelImage::from_top_down(1, 3, rgba_from_reds(&[10, 20, 30])).unwrap();
        assert_eq!(image.red(0), 30);
        assert_eq!(image.red(1), 20);
        assert_eq!(image.red(2), 10);
    }

    #[test]
    fn test_from_top_down_keeps_columns() {
        // 2x2: top row [1, 2], bottom row [3, 4]
        let image = PixelImage::from_top_down(2, 2, rgba_from_reds(&[1, 2, 3, 4])).unwrap();
        let reds: Vec<u8> = (0..4).map(|i| image.red(i)).collect();
        assert_eq!(reds, vec![3, 4, 1, 2]);
    }
}

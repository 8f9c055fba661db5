//! The pixel-access boundary between the codec and a concrete image type,
//! plus HSB conversion and the padded luminance plane both orchestrators
//! drive.
//!
//! The core never opens a file or decodes a container format; it only
//! needs get/set access to RGB pixels. Concrete image types are adapted in
//! by callers (see the `image`-crate adapter below, gated behind the
//! `image` feature, used by the CLI and integration tests).

use crate::error::{Result, WatermarkError};

/// Per-pixel RGB access to a mutable image of known dimensions.
pub trait ImageSurface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn get_pixel(&self, x: usize, y: usize) -> (u8, u8, u8);
    fn set_pixel(&mut self, x: usize, y: usize, rgb: (u8, u8, u8));
}

/// Converts 8-bit RGB to (hue, saturation, brightness), each in `[0.0,
/// 1.0]`, following the standard AWT `Color.RGBtoHSB` formulation.
pub fn rgb_to_hsb(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);
    let brightness = cmax / 255.0;

    let saturation = if cmax != 0.0 {
        (cmax - cmin) / cmax
    } else {
        0.0
    };

    let hue = if saturation == 0.0 {
        0.0
    } else {
        let range = cmax - cmin;
        let redc = (cmax - r) / range;
        let greenc = (cmax - g) / range;
        let bluec = (cmax - b) / range;

        let raw_hue = if r == cmax {
            bluec - greenc
        } else if g == cmax {
            2.0 + redc - bluec
        } else {
            4.0 + greenc - redc
        };
        let h = raw_hue / 6.0;
        if h < 0.0 {
            h + 1.0
        } else {
            h
        }
    };

    (hue, saturation, brightness)
}

/// Converts (hue, saturation, brightness) back to 8-bit RGB, following the
/// standard AWT `Color.HSBtoRGB` formulation.
pub fn hsb_to_rgb(hue: f64, saturation: f64, brightness: f64) -> (u8, u8, u8) {
    if saturation == 0.0 {
        let v = (brightness * 255.0 + 0.5) as u8;
        return (v, v, v);
    }

    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));

    let (rf, gf, bf) = match h.floor() as i64 {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        _ => (brightness, p, q),
    };

    let to_byte = |v: f64| (v * 255.0 + 0.5) as u8;
    (to_byte(rf), to_byte(gf), to_byte(bf))
}

/// A brightness plane padded up to a multiple of 8 in each dimension.
/// Padding pixels replicate the nearest valid row/column so the border DCT
/// blocks are not artificially darkened.
pub struct LuminancePlane {
    width: usize,
    height: usize,
    padded_width: usize,
    padded_height: usize,
    values: Vec<i32>,
}

fn pad_up_to_8(n: usize) -> usize {
    n.div_ceil(8) * 8
}

impl LuminancePlane {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn padded_width(&self) -> usize {
        self.padded_width
    }

    pub fn padded_height(&self) -> usize {
        self.padded_height
    }

    pub fn blocks_wide(&self) -> usize {
        self.padded_width / 8
    }

    pub fn blocks_high(&self) -> usize {
        self.padded_height / 8
    }

    pub fn get(&self, x: usize, y: usize) -> i32 {
        self.values[y * self.padded_width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, v: i32) {
        self.values[y * self.padded_width + x] = v;
    }

    /// Extracts the brightness (HSB `v` channel, scaled to `[0, 255]` and
    /// rounded) of `image`, padded up to a multiple of 8 in each dimension.
    pub fn extract(image: &impl ImageSurface) -> Self {
        let width = image.width();
        let height = image.height();
        let padded_width = pad_up_to_8(width);
        let padded_height = pad_up_to_8(height);
        let mut values = vec![0i32; padded_width * padded_height];

        for y in 0..height {
            for x in 0..width {
                let (r, g, b) = image.get_pixel(x, y);
                let (_, _, brightness) = rgb_to_hsb(r, g, b);
                values[y * padded_width + x] = (brightness * 255.0).round() as i32;
            }
        }
        // Replicate the last valid column/row into the padding.
        for y in 0..height {
            for x in width..padded_width {
                values[y * padded_width + x] = values[y * padded_width + width - 1];
            }
        }
        for y in height..padded_height {
            for x in 0..padded_width {
                values[y * padded_width + x] = values[(height - 1) * padded_width + x];
            }
        }

        Self {
            width,
            height,
            padded_width,
            padded_height,
            values,
        }
    }

    /// Blends the reconstructed luminance back into `image`'s original
    /// pixels, `opacity` parts reconstructed and `1 - opacity` parts
    /// original, preserving hue and saturation.
    pub fn apply(&self, image: &mut impl ImageSurface, opacity: f64) {
        for y in 0..self.height {
            for x in 0..self.width {
                let (r, g, b) = image.get_pixel(x, y);
                let (hue, saturation, old_brightness) = rgb_to_hsb(r, g, b);
                let reconstructed = self.get(x, y).clamp(0, 255) as f64 / 255.0;
                let new_brightness = old_brightness * (1.0 - opacity) + reconstructed * opacity;
                let rgb = hsb_to_rgb(hue, saturation, new_brightness);
                image.set_pixel(x, y, rgb);
            }
        }
    }
}

/// Checks that a padded plane of `blocks_wide x blocks_high` 8x8 blocks has
/// room for the 16384 mid-band coefficients the mark requires.
pub fn require_capacity(blocks_wide: usize, blocks_high: usize) -> Result<()> {
    let available = blocks_wide * blocks_high * 4;
    const NEEDED: usize = 16384;
    if available < NEEDED {
        return Err(WatermarkError::CoverTooSmall {
            needed: NEEDED,
            available,
        });
    }
    Ok(())
}

#[cfg(feature = "image")]
mod image_crate_adapter {
    use super::ImageSurface;

    impl ImageSurface for image::RgbImage {
        fn width(&self) -> usize {
            image::GenericImageView::width(self) as usize
        }

        fn height(&self) -> usize {
            image::GenericImageView::height(self) as usize
        }

        fn get_pixel(&self, x: usize, y: usize) -> (u8, u8, u8) {
            let p = image::Pixel::to_rgb(*image::GenericImageView::get_pixel(
                self, x as u32, y as u32,
            ));
            (p[0], p[1], p[2])
        }

        fn set_pixel(&mut self, x: usize, y: usize, rgb: (u8, u8, u8)) {
            image::GenericImage::put_pixel(
                self,
                x as u32,
                y as u32,
                image::Rgb([rgb.0, rgb.1, rgb.2]),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlatImage {
        width: usize,
        height: usize,
        pixels: Vec<(u8, u8, u8)>,
    }

    impl FlatImage {
        fn solid(width: usize, height: usize, rgb: (u8, u8, u8)) -> Self {
            Self {
                width,
                height,
                pixels: vec![rgb; width * height],
            }
        }
    }

    impl ImageSurface for FlatImage {
        fn width(&self) -> usize {
            self.width
        }
        fn height(&self) -> usize {
            self.height
        }
        fn get_pixel(&self, x: usize, y: usize) -> (u8, u8, u8) {
            self.pixels[y * self.width + x]
        }
        fn set_pixel(&mut self, x: usize, y: usize, rgb: (u8, u8, u8)) {
            self.pixels[y * self.width + x] = rgb;
        }
    }

    #[test]
    fn hsb_round_trips_rgb() {
        for &rgb in &[(0u8, 0u8, 0u8), (255, 255, 255), (200, 50, 10), (12, 240, 80)] {
            let (h, s, v) = rgb_to_hsb(rgb.0, rgb.1, rgb.2);
            let back = hsb_to_rgb(h, s, v);
            assert!((back.0 as i32 - rgb.0 as i32).abs() <= 1);
            assert!((back.1 as i32 - rgb.1 as i32).abs() <= 1);
            assert!((back.2 as i32 - rgb.2 as i32).abs() <= 1);
        }
    }

    #[test]
    fn gray_has_zero_saturation() {
        let (_, s, v) = rgb_to_hsb(128, 128, 128);
        assert_eq!(s, 0.0);
        assert!((v - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn extract_pads_up_to_multiple_of_8() {
        let image = FlatImage::solid(10, 10, (128, 128, 128));
        let plane = LuminancePlane::extract(&image);
        assert_eq!(plane.padded_width(), 16);
        assert_eq!(plane.padded_height(), 16);
        assert_eq!(plane.blocks_wide(), 2);
        assert_eq!(plane.blocks_high(), 2);
    }

    #[test]
    fn padding_replicates_border() {
        let image = FlatImage::solid(5, 5, (64, 64, 64));
        let plane = LuminancePlane::extract(&image);
        let border = plane.get(4, 0);
        assert_eq!(plane.get(7, 0), border);
        assert_eq!(plane.get(0, 7), plane.get(0, 4));
    }

    #[test]
    fn apply_with_full_opacity_overwrites_brightness() {
        let mut image = FlatImage::solid(8, 8, (10, 10, 10));
        let mut plane = LuminancePlane::extract(&image);
        for y in 0..8 {
            for x in 0..8 {
                plane.set(x, y, 255);
            }
        }
        plane.apply(&mut image, 1.0);
        assert_eq!(image.get_pixel(0, 0), (255, 255, 255));
    }

    #[test]
    fn require_capacity_rejects_small_covers() {
        assert!(require_capacity(8, 8).is_err());
        assert!(require_capacity(64, 64).is_ok());
    }
}

//! Sprite artwork: PNG bytes -> small pixel grid -> half-block cells

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;
use serde::{Deserialize, Serialize};

pub const MAX_SPRITE_WIDTH: u32 = 32;
pub const MAX_SPRITE_HEIGHT: u32 = 32;
const ALPHA_CUTOFF: u8 = 128;

/// Decoded sprite. `None` pixels are transparent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteArt {
    pub width: u16,
    pub height: u16,
    pub pixels: Vec<Option<[u8; 3]>>,
}

impl SpriteArt {
    pub fn pixel(&self, x: u16, y: u16) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = usize::from(y) * usize::from(self.width) + usize::from(x);
        self.pixels.get(index).copied().flatten()
    }

    /// Terminal rows needed: two pixel rows per cell.
    pub fn rows(&self) -> u16 {
        self.height.div_ceil(2)
    }
}

pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteArt, String> {
    let image = image::load_from_memory(bytes)
        .map_err(|err| err.to_string())?
        .to_rgba8();
    let (min_x, min_y, max_x, max_y) =
        opaque_bounds(&image).ok_or_else(|| "sprite has no visible pixels".to_string())?;

    let width = max_x - min_x + 1;
    let height = max_y - min_y + 1;
    let cropped = RgbaImage::from_fn(width, height, |x, y| {
        *image.get_pixel(min_x + x, min_y + y)
    });

    let (target_w, target_h) = fit(width, height);
    let scaled = if (target_w, target_h) == (width, height) {
        cropped
    } else {
        image::imageops::resize(&cropped, target_w, target_h, FilterType::Nearest)
    };

    let pixels = scaled
        .pixels()
        .map(|Rgba([r, g, b, a])| (*a >= ALPHA_CUTOFF).then_some([*r, *g, *b]))
        .collect();

    Ok(SpriteArt {
        width: scaled.width() as u16,
        height: scaled.height() as u16,
        pixels,
    })
}

fn opaque_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[3] < ALPHA_CUTOFF {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }
    bounds
}

fn fit(width: u32, height: u32) -> (u32, u32) {
    if width <= MAX_SPRITE_WIDTH && height <= MAX_SPRITE_HEIGHT {
        return (width, height);
    }
    let scale = f64::min(
        f64::from(MAX_SPRITE_WIDTH) / f64::from(width),
        f64::from(MAX_SPRITE_HEIGHT) / f64::from(height),
    );
    let w = ((f64::from(width) * scale).round() as u32).clamp(1, MAX_SPRITE_WIDTH);
    let h = ((f64::from(height) * scale).round() as u32).clamp(1, MAX_SPRITE_HEIGHT);
    (w, h)
}

/// Draws a [`SpriteArt`] centered in its area using upper/lower half blocks.
pub struct SpriteWidget<'a> {
    art: &'a SpriteArt,
    backdrop: Color,
    y_offset: u16,
}

impl<'a> SpriteWidget<'a> {
    pub fn new(art: &'a SpriteArt, backdrop: Color) -> Self {
        Self {
            art,
            backdrop,
            y_offset: 0,
        }
    }

    pub fn y_offset(mut self, offset: u16) -> Self {
        self.y_offset = offset;
        self
    }
}

impl Widget for SpriteWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = self.art.width.min(area.width);
        let rows = self.art.rows().min(area.height);
        let left = area.x + (area.width - cols) / 2;
        let spare = area.height - rows;
        let top = area.y + (spare / 2 + self.y_offset).min(spare);

        for row in 0..rows {
            for col in 0..cols {
                let upper = self.art.pixel(col, row * 2);
                let lower = self.art.pixel(col, row * 2 + 1);
                let (symbol, fg, bg) = match (upper, lower) {
                    (None, None) => continue,
                    (Some(up), Some(down)) => ("▀", rgb(up), rgb(down)),
                    (Some(up), None) => ("▀", rgb(up), self.backdrop),
                    (None, Some(down)) => ("▄", rgb(down), self.backdrop),
                };
                if let Some(cell) = buf.cell_mut((left + col, top + row)) {
                    cell.set_symbol(symbol).set_fg(fg).set_bg(bg);
                }
            }
        }
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png(image: &RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_decode_crops_transparent_border() {
        let mut image = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0]));
        for (x, y) in [(3, 3), (4, 3), (3, 4), (4, 4)] {
            image.put_pixel(x, y, Rgba([255, 0, 0, 255]));
        }

        let art = decode_sprite(&png(&image)).unwrap();
        assert_eq!((art.width, art.height), (2, 2));
        assert!(art.pixels.iter().all(|p| *p == Some([255, 0, 0])));
    }

    #[test]
    fn test_decode_downscales_large_sprites() {
        let image = RgbaImage::from_pixel(96, 96, Rgba([10, 20, 30, 255]));
        let art = decode_sprite(&png(&image)).unwrap();
        assert_eq!((art.width, art.height), (32, 32));
        assert_eq!(art.rows(), 16);
    }

    #[test]
    fn test_decode_rejects_fully_transparent() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
        assert!(decode_sprite(&png(&image)).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_sprite(b"not a png").is_err());
    }

    #[test]
    fn test_widget_uses_half_blocks() {
        let art = SpriteArt {
            width: 2,
            height: 2,
            pixels: vec![Some([1, 2, 3]), None, Some([4, 5, 6]), Some([7, 8, 9])],
        };
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        SpriteWidget::new(&art, Color::Black).render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), "▀");
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(1, 2, 3));
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(4, 5, 6));
        assert_eq!(buf[(1, 0)].symbol(), "▄");
        assert_eq!(buf[(1, 0)].fg, Color::Rgb(7, 8, 9));
    }
}

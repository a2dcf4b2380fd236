use super::font::{GLYPH_HEIGHT, GLYPH_WIDTH, GlyphBitmap};

/// Boolean pixel matrix for a rendered word, `GLYPH_HEIGHT` rows tall.
///
/// Every character occupies `GLYPH_WIDTH + char_spacing` columns, including
/// the spacing after the last character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextPattern {
    width: usize,
    pixels: Vec<bool>,
}

impl TextPattern {
    pub fn render(text: &str, char_spacing: usize) -> Self {
        let advance = GLYPH_WIDTH + char_spacing;
        let width = text.chars().count() * advance;
        let mut pixels = vec![false; width * GLYPH_HEIGHT];

        for (i, ch) in text.chars().enumerate() {
            let glyph = GlyphBitmap::for_char(ch);
            let x0 = i * advance;
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    if glyph.is_on(col, row) {
                        pixels[row * width + x0 + col] = true;
                    }
                }
            }
        }

        Self { width, pixels }
    }

    /// Columns covered by `len` characters at the given spacing.
    pub fn footprint_width(len: usize, char_spacing: usize) -> usize {
        len * (GLYPH_WIDTH + char_spacing)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        GLYPH_HEIGHT
    }

    pub fn is_on(&self, col: usize, row: usize) -> bool {
        col < self.width && row < GLYPH_HEIGHT && self.pixels[row * self.width + col]
    }

    /// `(col, row)` of every lit pixel, row-major.
    pub fn lit_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| (i % self.width, i / self.width))
    }

    /// Debug rendering with `#` for lit pixels, one line per row.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * GLYPH_HEIGHT);
        for row in 0..GLYPH_HEIGHT {
            for col in 0..self.width {
                out.push(if self.is_on(col, row) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/pattern.rs"]
mod tests;

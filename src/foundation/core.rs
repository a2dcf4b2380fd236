pub use kurbo::Point;

/// Logical pixel size of the visible area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero-sized viewport means "nothing to render yet".
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn is_mobile(self, breakpoint: u32) -> bool {
        self.width < breakpoint
    }
}

/// Column/row count of the dot grid covering a viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridDims {
    pub cols: usize,
    pub rows: usize,
}

impl GridDims {
    /// `ceil(width / spacing) x ceil(height / spacing)`.
    ///
    /// Non-positive spacing, or a grid whose cell count does not fit in
    /// `usize`, yields an empty grid.
    pub fn for_viewport(viewport: Viewport, spacing: f64) -> Self {
        if viewport.is_empty() || spacing.is_nan() || spacing <= 0.0 {
            return Self::default();
        }
        let grid = Self {
            cols: (f64::from(viewport.width) / spacing).ceil() as usize,
            rows: (f64::from(viewport.height) / spacing).ceil() as usize,
        };
        if grid.cols.checked_mul(grid.rows).is_none() {
            tracing::warn!(
                width = viewport.width,
                height = viewport.height,
                spacing,
                "dot grid too large, treating as empty"
            );
            return Self::default();
        }
        grid
    }

    pub fn cell_count(self) -> usize {
        self.cols.saturating_mul(self.rows)
    }

    pub fn is_empty(self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    /// Row-major index of a cell, `None` outside the grid.
    pub fn index(self, col: i64, row: i64) -> Option<usize> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(row * self.cols + col)
    }

    /// Pixel center of a cell.
    pub fn cell_center(self, col: usize, row: usize, spacing: f64) -> Point {
        Point::new(
            col as f64 * spacing + spacing / 2.0,
            row as f64 * spacing + spacing / 2.0,
        )
    }
}

/// Straight (non-premultiplied) RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attach an opacity in `[0, 1]` and premultiply.
    pub fn with_opacity(self, opacity: f64) -> Rgba8Premul {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, a)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

use crate::{
    foundation::core::{GridDims, Point, Rgb8},
    foundation::rng::Rng64,
    glyph::pattern::TextPattern,
    layout::placement::WordPlacement,
    theme::palette::Palette,
};

/// Animation state of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotState {
    pub x: f64,
    pub y: f64,
    pub current_opacity: f64,
    pub target_opacity: f64,
    pub current_color: Rgb8,
    pub target_color: Rgb8,
}

impl DotState {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn reset_target(&mut self, palette: &Palette) {
        self.target_opacity = palette.idle_opacity;
        self.target_color = palette.base;
    }
}

/// Warm-up "static" per cell: a random-walk brightness and a color index
/// fixed at allocation time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticNoise {
    pub levels: Vec<f64>,
    pub color_indices: Vec<usize>,
}

impl StaticNoise {
    fn allocate(len: usize, palette_len: usize, rng: &mut Rng64) -> Self {
        let levels = (0..len).map(|_| rng.next_f64_01()).collect();
        let color_indices = (0..len).map(|_| rng.below(palette_len)).collect();
        Self {
            levels,
            color_indices,
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Flat, row-major buffer of [`DotState`] plus the matching static noise.
///
/// Buffers are reused frame to frame; they are only replaced when the grid
/// shape changes.
#[derive(Clone, Debug, Default)]
pub struct DotStore {
    grid: GridDims,
    dots: Vec<DotState>,
    noise: StaticNoise,
    allocations: u64,
}

impl DotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the buffers match `grid`. Returns `true` when a fresh buffer was
    /// allocated; the previous one is dropped, never resized in place.
    ///
    /// New dots start at the idle baseline of `palette`. An empty grid
    /// releases everything.
    pub fn sync(&mut self, grid: GridDims, spacing: f64, palette: &Palette, rng: &mut Rng64) -> bool {
        if grid.is_empty() {
            if !self.dots.is_empty() {
                *self = Self {
                    allocations: self.allocations,
                    ..Self::default()
                };
            }
            return false;
        }
        if grid == self.grid && self.dots.len() == grid.cell_count() {
            return false;
        }

        let mut dots = Vec::with_capacity(grid.cell_count());
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let c = grid.cell_center(col, row, spacing);
                dots.push(DotState {
                    x: c.x,
                    y: c.y,
                    current_opacity: palette.idle_opacity,
                    target_opacity: palette.idle_opacity,
                    current_color: palette.base,
                    target_color: palette.base,
                });
            }
        }

        self.noise = StaticNoise::allocate(dots.len(), palette.len(), rng);
        self.dots = dots;
        self.grid = grid;
        self.allocations += 1;
        tracing::debug!(
            cols = grid.cols,
            rows = grid.rows,
            dots = self.dots.len(),
            "allocated dot buffer"
        );
        true
    }

    /// Re-derive every target: idle baseline first, then the lit pixels of
    /// each placement. Pixels falling outside the grid are skipped.
    pub fn apply_targets(&mut self, placements: &[WordPlacement], palette: &Palette, char_spacing: usize) {
        for dot in &mut self.dots {
            dot.reset_target(palette);
        }

        for placement in placements {
            let pattern = TextPattern::render(&placement.word, char_spacing);
            let color = palette.color(placement.color_index);
            for (c, r) in pattern.lit_pixels() {
                let col = (placement.col + c) as i64;
                let row = (placement.row + r) as i64;
                let Some(idx) = self.grid.index(col, row) else {
                    continue;
                };
                if let Some(dot) = self.dots.get_mut(idx) {
                    dot.target_opacity = palette.lit_opacity;
                    dot.target_color = color;
                }
            }
        }
    }

    pub fn grid(&self) -> GridDims {
        self.grid
    }

    pub fn dots(&self) -> &[DotState] {
        &self.dots
    }

    pub fn noise(&self) -> &StaticNoise {
        &self.noise
    }

    /// Dots and noise together, for the per-frame update.
    pub fn frame_state_mut(&mut self) -> (&mut [DotState], &mut StaticNoise) {
        (&mut self.dots, &mut self.noise)
    }

    pub fn len(&self) -> usize {
        self.dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    /// How many buffers have been allocated over the store's lifetime.
    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    /// Number of dots whose target is above the idle baseline.
    pub fn lit_count(&self, palette: &Palette) -> usize {
        self.dots
            .iter()
            .filter(|d| d.target_opacity > palette.idle_opacity)
            .count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dots/store.rs"]
mod tests;

use crate::{
    config::DisplayConfig,
    foundation::core::{GridDims, Viewport},
    foundation::rng::Rng64,
    glyph::font::GLYPH_HEIGHT,
    glyph::pattern::TextPattern,
    glyph::vocabulary::Vocabulary,
};

/// One word anchored on the dot grid for one generation cycle.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WordPlacement {
    pub word: String,
    /// Left column of the first glyph.
    pub col: usize,
    /// Top row of the glyphs.
    pub row: usize,
    /// Index into the active theme's accent palette.
    pub color_index: usize,
}

impl WordPlacement {
    /// Cells covered by the rendered word (including trailing glyph spacing).
    pub fn footprint(&self, char_spacing: usize) -> CellRect {
        CellRect {
            col: self.col as i64,
            row: self.row as i64,
            cols: TextPattern::footprint_width(self.word.chars().count(), char_spacing),
            rows: GLYPH_HEIGHT,
        }
    }
}

/// Axis-aligned block of grid cells; may extend past the grid edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: i64,
    pub row: i64,
    pub cols: usize,
    pub rows: usize,
}

impl CellRect {
    pub fn expand(self, pad: usize) -> Self {
        Self {
            col: self.col - pad as i64,
            row: self.row - pad as i64,
            cols: self.cols + 2 * pad,
            rows: self.rows + 2 * pad,
        }
    }

    pub fn intersects(self, other: Self) -> bool {
        let (a0, a1) = (self.col, self.col + self.cols as i64);
        let (b0, b1) = (other.col, other.col + other.cols as i64);
        let (c0, c1) = (self.row, self.row + self.rows as i64);
        let (d0, d1) = (other.row, other.row + other.rows as i64);
        a0 < b1 && b0 < a1 && c0 < d1 && d0 < c1
    }

    fn cells(self) -> impl Iterator<Item = (i64, i64)> {
        let (col, cols) = (self.col, self.cols as i64);
        (self.row..self.row + self.rows as i64)
            .flat_map(move |r| (col..col + cols).map(move |c| (c, r)))
    }
}

/// Boolean "taken" map over the grid. Cells outside the grid are ignored.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    grid: GridDims,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(grid: GridDims) -> Self {
        Self {
            grid,
            cells: vec![false; grid.cell_count()],
        }
    }

    pub fn is_free(&self, rect: CellRect) -> bool {
        rect.cells()
            .filter_map(|(c, r)| self.grid.index(c, r))
            .all(|idx| !self.cells[idx])
    }

    pub fn mark(&mut self, rect: CellRect) {
        for (c, r) in rect.cells() {
            if let Some(idx) = self.grid.index(c, r) {
                self.cells[idx] = true;
            }
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }
}

/// Choose a random, non-overlapping set of words for the grid covering
/// `viewport`.
///
/// Words that find no free slot within `max_attempts` tries are dropped for
/// this cycle.
#[tracing::instrument(level = "debug", skip(vocab, config, rng))]
pub fn generate_placements(
    viewport: Viewport,
    vocab: &Vocabulary,
    palette_len: usize,
    config: &DisplayConfig,
    rng: &mut Rng64,
) -> Vec<WordPlacement> {
    let grid = GridDims::for_viewport(viewport, config.dot_spacing);
    if grid.is_empty() {
        return Vec::new();
    }

    let (budget, mut pool) = if viewport.is_mobile(config.mobile_breakpoint) {
        (
            config.mobile_max_words,
            vocab.filtered_by_len(config.mobile_max_word_len),
        )
    } else {
        (config.desktop_max_words, vocab.all())
    };
    rng.shuffle(&mut pool);
    pool.truncate(budget);

    let margin = config.grid_margin;
    let mut occupied = OccupancyGrid::new(grid);
    let mut placements = Vec::with_capacity(pool.len());

    for word in pool {
        let text_width = TextPattern::footprint_width(word.chars().count(), config.char_spacing);
        let col_span = grid.cols as i64 - text_width as i64 - 2 * margin as i64;
        let row_span = grid.rows as i64 - GLYPH_HEIGHT as i64 - 2 * margin as i64;
        if col_span <= 0 || row_span <= 0 {
            tracing::trace!(word, "word does not fit inside the grid interior");
            continue;
        }

        let mut accepted = None;
        for _ in 0..config.max_attempts {
            let candidate = WordPlacement {
                word: word.to_owned(),
                col: rng.below(col_span as usize) + margin,
                row: rng.below(row_span as usize) + margin,
                color_index: 0,
            };
            let padded = candidate
                .footprint(config.char_spacing)
                .expand(config.placement_padding);
            if occupied.is_free(padded) {
                occupied.mark(padded);
                accepted = Some(WordPlacement {
                    color_index: rng.below(palette_len),
                    ..candidate
                });
                break;
            }
        }

        match accepted {
            Some(p) => placements.push(p),
            None => tracing::trace!(word, "no free slot, word dropped"),
        }
    }

    tracing::debug!(
        placed = placements.len(),
        cols = grid.cols,
        rows = grid.rows,
        "generated placements"
    );
    placements
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placement.rs"]
mod tests;

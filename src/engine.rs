use crate::{
    config::DisplayConfig,
    dots::store::{DotState, DotStore},
    foundation::core::{GridDims, Viewport},
    foundation::error::DotMatrixResult,
    foundation::rng::Rng64,
    glyph::vocabulary::Vocabulary,
    layout::placement::{WordPlacement, generate_placements},
    render::{
        DotSurface,
        frame::{FrameContext, paint_dots},
        transition::{AnimationPhase, FrameThrottle, Transition},
    },
    theme::palette::{Palette, Theme},
};

/// Result of one animation-frame callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// Page hidden; nothing was updated.
    Hidden,
    /// Too soon after the previous rendered frame.
    Throttled,
    Rendered { dots: usize, progress: f64 },
}

impl FrameOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// Host-independent state of the dot-matrix display.
///
/// Owns the dot buffers, the current word set and the start-up transition.
/// Timers and event wiring live in [`crate::runtime`]; the engine only reacts.
pub struct DotMatrixEngine {
    config: DisplayConfig,
    vocab: Vocabulary,
    theme: Theme,
    viewport: Viewport,
    placements: Vec<WordPlacement>,
    store: DotStore,
    transition: Transition,
    throttle: FrameThrottle,
    visible: bool,
    rng: Rng64,
}

impl DotMatrixEngine {
    pub fn new(
        config: DisplayConfig,
        vocab: Vocabulary,
        theme: Theme,
        viewport: Viewport,
    ) -> DotMatrixResult<Self> {
        config.validate()?;
        let rng = config.seed.map_or_else(Rng64::from_entropy, Rng64::new);
        let throttle = FrameThrottle::new(config.target_fps);
        let mut engine = Self {
            config,
            vocab,
            theme,
            viewport,
            placements: Vec::new(),
            store: DotStore::new(),
            transition: Transition::default(),
            throttle,
            visible: true,
            rng,
        };
        engine.sync_grid();
        Ok(engine)
    }

    fn sync_grid(&mut self) -> bool {
        let grid = GridDims::for_viewport(self.viewport, self.config.dot_spacing);
        let palette = self.theme.palette();
        let reallocated = self
            .store
            .sync(grid, self.config.dot_spacing, palette, &mut self.rng);
        self.apply_targets();
        reallocated
    }

    fn apply_targets(&mut self) {
        self.store
            .apply_targets(&self.placements, self.theme.palette(), self.config.char_spacing);
    }

    /// Viewport changed. Placements computed for the old grid are discarded,
    /// so every target falls back to idle until the next regeneration.
    ///
    /// Returns `false` when the viewport is unchanged.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        if viewport == self.viewport {
            return false;
        }
        let old = self.viewport;
        self.viewport = viewport;
        self.placements.clear();
        let reallocated = self.sync_grid();
        tracing::debug!(
            from_width = old.width,
            from_height = old.height,
            width = viewport.width,
            height = viewport.height,
            dots = self.store.len(),
            reallocated,
            "viewport resized"
        );
        true
    }

    /// Switch palettes; targets are re-derived for the current placements.
    pub fn set_theme(&mut self, theme: Theme) {
        if theme == self.theme {
            return;
        }
        tracing::debug!(from = %self.theme, to = %theme, "theme changed");
        self.theme = theme;
        self.apply_targets();
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn end_warm_up(&mut self) {
        self.transition.end_warm_up();
    }

    pub fn is_warmed_up(&self) -> bool {
        self.transition.is_warmed_up()
    }

    /// Replace the word set wholesale and re-derive targets.
    #[tracing::instrument(level = "debug", skip(self), fields(width = self.viewport.width, height = self.viewport.height))]
    pub fn regenerate(&mut self) {
        self.placements = generate_placements(
            self.viewport,
            &self.vocab,
            self.theme.palette().len(),
            &self.config,
            &mut self.rng,
        );
        self.apply_targets();
        tracing::debug!(
            placed = self.placements.len(),
            lit = self.store.lit_count(self.theme.palette()),
            "word set regenerated"
        );
    }

    /// Animation-frame callback: visibility and throttle gates, then a frame.
    ///
    /// Without a surface nothing is drawn and dot state is left alone.
    pub fn on_animation_frame(
        &mut self,
        now_ms: f64,
        surface: Option<&mut dyn DotSurface>,
    ) -> FrameOutcome {
        if !self.visible {
            return FrameOutcome::Hidden;
        }
        if !self.throttle.should_render(now_ms) {
            return FrameOutcome::Throttled;
        }
        match surface {
            Some(surface) => self.render_frame(now_ms, surface),
            None => FrameOutcome::Rendered {
                dots: 0,
                progress: self.transition.progress(),
            },
        }
    }

    /// Draw one frame unconditionally.
    pub fn render_frame(&mut self, now_ms: f64, surface: &mut dyn DotSurface) -> FrameOutcome {
        surface.clear();
        let progress = self.transition.advance(self.config.transition_step);
        let ctx = FrameContext {
            now_ms,
            progress,
            palette: self.theme.palette(),
            config: &self.config,
        };
        let (dots, noise) = self.store.frame_state_mut();
        let drawn = paint_dots(dots, noise, &ctx, &mut self.rng, surface);
        tracing::trace!(now_ms, progress, drawn, "frame rendered");
        FrameOutcome::Rendered {
            dots: drawn,
            progress,
        }
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn dots(&self) -> &[DotState] {
        self.store.dots()
    }

    pub fn store(&self) -> &DotStore {
        &self.store
    }

    pub fn placements(&self) -> &[WordPlacement] {
        &self.placements
    }

    pub fn grid(&self) -> GridDims {
        self.store.grid()
    }

    pub fn progress(&self) -> f64 {
        self.transition.progress()
    }

    pub fn phase(&self) -> AnimationPhase {
        self.transition.phase()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn palette(&self) -> &'static Palette {
        self.theme.palette()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;

use std::path::Path;

use crate::foundation::error::{DotMatrixError, DotMatrixResult};

/// Smallest accepted `dot_spacing`; one dot per logical pixel.
pub const MIN_DOT_SPACING: f64 = 1.0;
/// Upper bound for the cell-count knobs (`char_spacing`, `grid_margin`,
/// `placement_padding`).
pub const MAX_CELL_GAP: usize = 64;

/// Tunable constants of the display.
///
/// Defaults reproduce the reference look (15 px spacing, 30 fps, 1 s warm-up,
/// 5 s regeneration, 0.02 transition step, 0.08 easing, 50 placement attempts).
/// Any subset can be overridden from JSON; missing fields keep their default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Distance between dot centers, in logical pixels.
    pub dot_spacing: f64,
    pub dot_radius: f64,
    /// Blank columns after each glyph.
    pub char_spacing: usize,

    /// Frame cap applied on top of the host's frame callbacks.
    pub target_fps: u32,
    pub warm_up_ms: u64,
    pub regenerate_interval_ms: u64,
    /// Transition progress added per rendered frame after warm-up.
    pub transition_step: f64,
    /// Fraction of the remaining opacity distance covered per frame.
    pub easing: f64,

    pub max_attempts: u32,
    /// Cells kept free around the grid edge when choosing anchors.
    pub grid_margin: usize,
    /// Cells of clearance required around every placed word.
    pub placement_padding: usize,
    pub mobile_breakpoint: u32,
    pub mobile_max_words: usize,
    pub desktop_max_words: usize,
    pub mobile_max_word_len: usize,

    /// Width of the per-frame uniform step of the static noise walk.
    pub noise_step: f64,
    pub noise_gain: f64,
    pub scanline_time_divisor: f64,
    pub scanline_period: f64,
    pub scanline_window: f64,
    pub scanline_boost: f64,
    pub static_opacity_cap: f64,

    /// Eased opacity above which a dot gets a glow.
    pub glow_threshold: f64,
    pub glow_blur: f64,
    pub glow_alpha: f64,

    /// Fixed seed for reproducible runs; `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            dot_spacing: 15.0,
            dot_radius: 1.5,
            char_spacing: 1,
            target_fps: 30,
            warm_up_ms: 1000,
            regenerate_interval_ms: 5000,
            transition_step: 0.02,
            easing: 0.08,
            max_attempts: 50,
            grid_margin: 2,
            placement_padding: 1,
            mobile_breakpoint: 768,
            mobile_max_words: 8,
            desktop_max_words: 25,
            mobile_max_word_len: 6,
            noise_step: 0.3,
            noise_gain: 0.95,
            scanline_time_divisor: 50.0,
            scanline_period: 100.0,
            scanline_window: 20.0,
            scanline_boost: 0.2,
            static_opacity_cap: 0.95,
            glow_threshold: 0.4,
            glow_blur: 12.0,
            glow_alpha: 0.8,
            seed: None,
        }
    }
}

impl DisplayConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Frame interval implied by `target_fps`, in milliseconds.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.target_fps.max(1))
    }

    pub fn validate(&self) -> DotMatrixResult<()> {
        fn positive(name: &str, v: f64) -> DotMatrixResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(DotMatrixError::config(format!("{name} must be > 0 (got {v})")))
            }
        }
        fn unit(name: &str, v: f64) -> DotMatrixResult<()> {
            if v.is_finite() && v > 0.0 && v <= 1.0 {
                Ok(())
            } else {
                Err(DotMatrixError::config(format!(
                    "{name} must be in (0, 1] (got {v})"
                )))
            }
        }
        fn non_negative(name: &str, v: f64) -> DotMatrixResult<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(DotMatrixError::config(format!("{name} must be >= 0 (got {v})")))
            }
        }

        if !(self.dot_spacing.is_finite() && self.dot_spacing >= MIN_DOT_SPACING) {
            return Err(DotMatrixError::config(format!(
                "dot_spacing must be >= {MIN_DOT_SPACING} (got {})",
                self.dot_spacing
            )));
        }
        positive("dot_radius", self.dot_radius)?;
        positive("scanline_time_divisor", self.scanline_time_divisor)?;
        positive("scanline_period", self.scanline_period)?;
        unit("transition_step", self.transition_step)?;
        unit("easing", self.easing)?;
        non_negative("noise_step", self.noise_step)?;
        non_negative("noise_gain", self.noise_gain)?;
        non_negative("scanline_window", self.scanline_window)?;
        non_negative("scanline_boost", self.scanline_boost)?;
        non_negative("static_opacity_cap", self.static_opacity_cap)?;
        non_negative("glow_threshold", self.glow_threshold)?;
        non_negative("glow_blur", self.glow_blur)?;
        non_negative("glow_alpha", self.glow_alpha)?;

        for (name, v) in [
            ("char_spacing", self.char_spacing),
            ("grid_margin", self.grid_margin),
            ("placement_padding", self.placement_padding),
        ] {
            if v > MAX_CELL_GAP {
                return Err(DotMatrixError::config(format!(
                    "{name} must be <= {MAX_CELL_GAP} (got {v})"
                )));
            }
        }

        if self.target_fps == 0 {
            return Err(DotMatrixError::config("target_fps must be > 0"));
        }
        if self.regenerate_interval_ms == 0 {
            return Err(DotMatrixError::config("regenerate_interval_ms must be > 0"));
        }
        if self.max_attempts == 0 {
            return Err(DotMatrixError::config("max_attempts must be > 0"));
        }
        Ok(())
    }

    #[tracing::instrument(skip(json))]
    pub fn from_json_str(json: &str) -> DotMatrixResult<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| DotMatrixError::serde(e.to_string()))?;
        cfg.validate()?;
        tracing::debug!(?cfg, "loaded display config");
        Ok(cfg)
    }

    pub fn from_json_path(path: &Path) -> DotMatrixResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            DotMatrixError::config(format!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;

use crate::{
    config::DisplayConfig,
    dots::store::{DotState, StaticNoise},
    foundation::core::{Point, Rgb8},
    foundation::rng::Rng64,
    render::{DotSurface, Glow},
    theme::palette::Palette,
};

/// Inputs shared by every dot in one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext<'a> {
    pub now_ms: f64,
    /// Transition progress after this frame's advance.
    pub progress: f64,
    pub palette: &'a Palette,
    pub config: &'a DisplayConfig,
}

/// What gets drawn for one dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotSample {
    pub center: Point,
    pub color: Rgb8,
    pub opacity: f64,
    pub glow: Option<Glow>,
    /// Warm-up static share of `opacity`.
    pub static_opacity: f64,
    /// Eased word-display share of `opacity`.
    pub normal_opacity: f64,
}

/// Brightness boost from the rolling scanline band at height `y`.
pub fn scanline_boost(now_ms: f64, y: f64, config: &DisplayConfig) -> f64 {
    let phase = (now_ms / config.scanline_time_divisor + y) % config.scanline_period;
    if phase < config.scanline_window {
        config.scanline_boost
    } else {
        0.0
    }
}

/// Color source for a dot: static color up to the midpoint of the
/// transition, the dot's own color after it.
pub fn crossover_color(progress: f64, dot_color: Rgb8, static_color: Rgb8) -> Rgb8 {
    if progress > 0.5 { dot_color } else { static_color }
}

/// Advance one dot (noise walk and opacity easing) and compute its sample.
pub fn shade_dot(
    dot: &mut DotState,
    noise_level: &mut f64,
    static_color: Rgb8,
    ctx: &FrameContext<'_>,
    rng: &mut Rng64,
) -> DotSample {
    let cfg = ctx.config;
    let t = ctx.progress;

    *noise_level = (*noise_level + (rng.next_f64_01() - 0.5) * cfg.noise_step).clamp(0.0, 1.0);
    let noise_opacity = *noise_level * cfg.noise_gain;
    let boost = scanline_boost(ctx.now_ms, dot.y, cfg);
    let static_opacity = (noise_opacity + boost).min(cfg.static_opacity_cap) * (1.0 - t);

    dot.current_opacity += (dot.target_opacity - dot.current_opacity) * cfg.easing;
    dot.current_color = dot.target_color;
    let normal_opacity = dot.current_opacity * t;

    let glow = (normal_opacity > cfg.glow_threshold).then(|| Glow {
        blur: cfg.glow_blur * t,
        color: dot.current_color,
        alpha: normal_opacity * cfg.glow_alpha,
    });

    DotSample {
        center: dot.center(),
        color: crossover_color(t, dot.current_color, static_color),
        opacity: static_opacity + normal_opacity,
        glow,
        static_opacity,
        normal_opacity,
    }
}

/// Shade and draw every dot, then reset the glow state. Returns the number
/// of dots drawn.
pub fn paint_dots(
    dots: &mut [DotState],
    noise: &mut StaticNoise,
    ctx: &FrameContext<'_>,
    rng: &mut Rng64,
    surface: &mut dyn DotSurface,
) -> usize {
    let radius = ctx.config.dot_radius;
    let mut drawn = 0;
    for (i, dot) in dots.iter_mut().enumerate() {
        let (Some(level), Some(&color_idx)) = (noise.levels.get_mut(i), noise.color_indices.get(i))
        else {
            break;
        };
        let sample = shade_dot(dot, level, ctx.palette.color(color_idx), ctx, rng);
        surface.set_glow(sample.glow);
        surface.fill_dot(sample.center, radius, sample.color, sample.opacity);
        drawn += 1;
    }
    surface.set_glow(None);
    drawn
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;

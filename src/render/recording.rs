use crate::{
    foundation::core::{Point, Rgb8, Viewport},
    foundation::error::DotMatrixResult,
    render::{DotSurface, Glow},
};

/// One call made on a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    Resize(Viewport),
    Clear,
    SetGlow(Option<Glow>),
    FillDot {
        center: Point,
        radius: f64,
        color: Rgb8,
        opacity: f64,
        /// Glow in effect when the dot was filled.
        glow: Option<Glow>,
    },
}

/// Surface that keeps the calls of the most recent frame instead of drawing.
///
/// `clear` starts a new frame; totals are kept across frames.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
    glow: Option<Glow>,
    viewport: Viewport,
    frames: u64,
    dots_total: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded since the last `clear` (inclusive).
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Number of `clear` calls, i.e. frames started.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn dots_total(&self) -> u64 {
        self.dots_total
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Glow currently in effect.
    pub fn active_glow(&self) -> Option<Glow> {
        self.glow
    }

    /// Filled dots of the current frame.
    pub fn dots(&self) -> impl Iterator<Item = (Point, Rgb8, f64, Option<Glow>)> + '_ {
        self.ops.iter().filter_map(|op| match *op {
            SurfaceOp::FillDot {
                center,
                color,
                opacity,
                glow,
                ..
            } => Some((center, color, opacity, glow)),
            _ => None,
        })
    }
}

impl DotSurface for RecordingSurface {
    fn resize(&mut self, viewport: Viewport) -> DotMatrixResult<()> {
        self.viewport = viewport;
        self.ops.push(SurfaceOp::Resize(viewport));
        Ok(())
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(SurfaceOp::Clear);
        self.frames += 1;
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.glow = glow;
        self.ops.push(SurfaceOp::SetGlow(glow));
    }

    fn fill_dot(&mut self, center: Point, radius: f64, color: Rgb8, opacity: f64) {
        self.dots_total += 1;
        self.ops.push(SurfaceOp::FillDot {
            center,
            radius,
            color,
            opacity,
            glow: self.glow,
        });
    }
}

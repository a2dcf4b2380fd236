use crate::foundation::{
    core::{Point, Rgb8, Viewport},
    error::DotMatrixResult,
};

pub(crate) mod blur;
pub(crate) mod composite;
pub(crate) mod cpu;
pub(crate) mod frame;
pub(crate) mod recording;
pub(crate) mod transition;

/// Soft shadow drawn around subsequent dots (canvas `shadowBlur` semantics).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    /// Blur extent in pixels; the Gaussian sigma is half of it.
    pub blur: f64,
    pub color: Rgb8,
    /// Shadow alpha in `[0, 1]`.
    pub alpha: f64,
}

/// Drawing target for the render loop.
///
/// Mirrors a 2D canvas context: glow is sticky state applied to every
/// following `fill_dot` until changed, so the loop resets it after each frame.
pub trait DotSurface {
    /// Viewport changed. Surfaces that own pixels reallocate here.
    fn resize(&mut self, _viewport: Viewport) -> DotMatrixResult<()> {
        Ok(())
    }

    fn clear(&mut self);

    fn set_glow(&mut self, glow: Option<Glow>);

    /// Filled circle with a straight color and an opacity in `[0, 1]`.
    fn fill_dot(&mut self, center: Point, radius: f64, color: Rgb8, opacity: f64);
}

impl<S: DotSurface + ?Sized> DotSurface for Box<S> {
    fn resize(&mut self, viewport: Viewport) -> DotMatrixResult<()> {
        (**self).resize(viewport)
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        (**self).set_glow(glow);
    }

    fn fill_dot(&mut self, center: Point, radius: f64, color: Rgb8, opacity: f64) {
        (**self).fill_dot(center, radius, color, opacity);
    }
}

/// Rasterized frame.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) as usize) * 4;
        self.data.get(i..i + 4).map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Pixel data with straight (non-premultiplied) alpha, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

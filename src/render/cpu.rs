use vello_cpu::kurbo::Shape;

use crate::{
    foundation::core::{Point, Rgb8, Viewport},
    foundation::error::{DotMatrixError, DotMatrixResult},
    render::{
        DotSurface, FrameRGBA, Glow,
        blur::{gaussian_blur_premul, radius_for_sigma, sigma_for_blur},
        composite::{fill, over_in_place},
    },
};

const CIRCLE_TOLERANCE: f64 = 0.05;

#[derive(Clone, Copy, Debug)]
struct PaintedDot {
    center: Point,
    radius: f64,
    color: Rgb8,
    opacity: f64,
    glow: Option<Glow>,
}

/// Software surface backed by `vello_cpu`.
///
/// Draw calls are collected per frame and rasterized on demand by
/// [`CpuSurface::rasterize`]. Glowing dots are also drawn into a separate
/// layer which is blurred and placed under the dots.
pub struct CpuSurface {
    width: u16,
    height: u16,
    background: Option<Rgb8>,
    glow: Option<Glow>,
    frame: Vec<PaintedDot>,
}

impl CpuSurface {
    pub fn new(viewport: Viewport) -> DotMatrixResult<Self> {
        let (width, height) = pixmap_dims(viewport)?;
        Ok(Self {
            width,
            height,
            background: None,
            glow: None,
            frame: Vec::new(),
        })
    }

    /// Opaque fill behind the dots. `None` leaves the frame transparent.
    pub fn with_background(mut self, background: Option<Rgb8>) -> Self {
        self.background = background;
        self
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Dots drawn since the last clear.
    pub fn dot_count(&self) -> usize {
        self.frame.len()
    }

    #[tracing::instrument(level = "debug", skip(self), fields(width = self.width, height = self.height, dots = self.frame.len()))]
    pub fn rasterize(&self) -> DotMatrixResult<FrameRGBA> {
        let (w, h) = (u32::from(self.width), u32::from(self.height));
        let len = (w as usize) * (h as usize) * 4;
        let mut data = vec![0u8; len];
        if len == 0 {
            return Ok(FrameRGBA {
                width: w,
                height: h,
                data,
                premultiplied: true,
            });
        }

        if let Some(bg) = self.background {
            fill(&mut data, bg.with_opacity(1.0).to_array());
        }

        if let Some(glow_layer) = self.glow_layer()? {
            over_in_place(&mut data, &glow_layer)?;
        }

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        for dot in &self.frame {
            let alpha = unit_to_u8(dot.opacity);
            if alpha == 0 {
                continue;
            }
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                dot.color.r,
                dot.color.g,
                dot.color.b,
                alpha,
            ));
            ctx.fill_path(&circle_path(dot.center, dot.radius));
        }
        let mut dots = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.flush();
        ctx.render_to_pixmap(&mut dots);
        over_in_place(&mut data, dots.data_as_u8_slice())?;

        Ok(FrameRGBA {
            width: w,
            height: h,
            data,
            premultiplied: true,
        })
    }

    fn glow_layer(&self) -> DotMatrixResult<Option<Vec<u8>>> {
        let blur = self
            .frame
            .iter()
            .filter_map(|d| d.glow.map(|g| g.blur))
            .fold(None, |acc: Option<f64>, b| Some(acc.map_or(b, |a| a.max(b))));
        let Some(blur) = blur else {
            return Ok(None);
        };

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        for dot in &self.frame {
            let Some(glow) = dot.glow else { continue };
            // Shadow alpha scales with the fill alpha.
            let alpha = unit_to_u8(glow.alpha * dot.opacity.clamp(0.0, 1.0));
            if alpha == 0 {
                continue;
            }
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                glow.color.r,
                glow.color.g,
                glow.color.b,
                alpha,
            ));
            ctx.fill_path(&circle_path(dot.center, dot.radius));
        }
        let mut layer = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.flush();
        ctx.render_to_pixmap(&mut layer);

        let sigma = sigma_for_blur(blur);
        let blurred = gaussian_blur_premul(
            layer.data_as_u8_slice(),
            u32::from(self.width),
            u32::from(self.height),
            radius_for_sigma(sigma),
            sigma.max(f32::MIN_POSITIVE),
        )?;
        Ok(Some(blurred))
    }
}

impl DotSurface for CpuSurface {
    fn resize(&mut self, viewport: Viewport) -> DotMatrixResult<()> {
        let (width, height) = pixmap_dims(viewport)?;
        self.width = width;
        self.height = height;
        self.frame.clear();
        Ok(())
    }

    fn clear(&mut self) {
        self.frame.clear();
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.glow = glow;
    }

    fn fill_dot(&mut self, center: Point, radius: f64, color: Rgb8, opacity: f64) {
        self.frame.push(PaintedDot {
            center,
            radius,
            color,
            opacity,
            glow: self.glow,
        });
    }
}

fn pixmap_dims(viewport: Viewport) -> DotMatrixResult<(u16, u16)> {
    let width: u16 = viewport
        .width
        .try_into()
        .map_err(|_| DotMatrixError::render("surface width exceeds u16"))?;
    let height: u16 = viewport
        .height
        .try_into()
        .map_err(|_| DotMatrixError::render("surface height exceeds u16"))?;
    Ok((width, height))
}

fn circle_path(center: Point, radius: f64) -> vello_cpu::kurbo::BezPath {
    vello_cpu::kurbo::Circle::new((center.x, center.y), radius).to_path(CIRCLE_TOLERANCE)
}

fn unit_to_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

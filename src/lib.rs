//! Animated dot-matrix background display.
//!
//! A viewport is covered by a grid of dots. Words drawn in a 5x7 bitmap font
//! are scattered over the grid, recolored every few seconds, and faded in from
//! a TV-static warm-up. The crate is organized around:
//!
//! - [`DotMatrixEngine`]: grid, word placement, dot state and the per-frame update
//! - [`DotSurface`]: the drawing target ([`CpuSurface`] rasterizes with `vello_cpu`)
//! - [`Host`] and [`DotMatrixDisplay`]: a virtual-time host and the
//!   mount/unmount lifecycle that wires timers and listeners to the engine
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod config;
pub(crate) mod dots;
pub(crate) mod engine;
pub(crate) mod glyph;
pub(crate) mod layout;
/// Drawing surfaces and the per-frame shading.
pub mod render;
pub(crate) mod runtime;
pub(crate) mod theme;

pub use crate::foundation::core::{GridDims, Point, Rgb8, Rgba8Premul, Viewport};
pub use crate::foundation::error::{DotMatrixError, DotMatrixResult};
pub use crate::foundation::rng::Rng64;

pub use crate::config::{DisplayConfig, MAX_CELL_GAP, MIN_DOT_SPACING};
pub use crate::dots::store::{DotState, DotStore, StaticNoise};
pub use crate::engine::{DotMatrixEngine, FrameOutcome};
pub use crate::glyph::font::{GLYPH_HEIGHT, GLYPH_WIDTH, GlyphBitmap};
pub use crate::glyph::pattern::TextPattern;
pub use crate::glyph::vocabulary::{DEFAULT_WORDS, Vocabulary};
pub use crate::layout::placement::{CellRect, OccupancyGrid, WordPlacement, generate_placements};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::recording::{RecordingSurface, SurfaceOp};
pub use crate::render::transition::{AnimationPhase, FrameThrottle, Transition};
pub use crate::render::{DotSurface, FrameRGBA, Glow};
pub use crate::runtime::host::{FrameHandle, Host, ListenerHandle, TimerHandle};
pub use crate::runtime::mount::DotMatrixDisplay;
pub use crate::theme::palette::{Palette, Theme};
pub use crate::theme::source::{Subscription, ThemeAttribute, ThemeSource};

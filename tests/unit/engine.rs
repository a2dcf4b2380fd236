use std::collections::HashSet;

use super::*;
use crate::{glyph::pattern::TextPattern, render::recording::RecordingSurface};

fn engine(width: u32, height: u32, theme: Theme) -> DotMatrixEngine {
    DotMatrixEngine::new(
        DisplayConfig::default().with_seed(7),
        Vocabulary::default(),
        theme,
        Viewport::new(width, height),
    )
    .unwrap()
}

fn lit_cells(engine: &DotMatrixEngine) -> HashSet<usize> {
    let grid = engine.grid();
    let mut cells = HashSet::new();
    for p in engine.placements() {
        let pattern = TextPattern::render(&p.word, engine.config().char_spacing);
        for (c, r) in pattern.lit_pixels() {
            if let Some(idx) = grid.index((p.col + c) as i64, (p.row + r) as i64) {
                cells.insert(idx);
            }
        }
    }
    cells
}

fn assert_idle_outside_words(engine: &DotMatrixEngine) {
    let palette = engine.palette();
    let lit = lit_cells(engine);
    for (i, dot) in engine.dots().iter().enumerate() {
        if lit.contains(&i) {
            assert_eq!(dot.target_opacity, palette.lit_opacity);
        } else {
            assert_eq!(dot.target_opacity, palette.idle_opacity, "dot {i}");
            assert_eq!(dot.target_color, palette.base, "dot {i}");
        }
    }
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = DisplayConfig {
        dot_spacing: 0.0,
        ..DisplayConfig::default()
    };
    assert!(DotMatrixEngine::new(cfg, Vocabulary::default(), Theme::Dark, Viewport::new(10, 10)).is_err());
}

#[test]
fn new_allocates_full_grid_without_words() {
    let e = engine(1920, 1080, Theme::Dark);
    assert_eq!(e.dots().len(), 9216);
    assert_eq!(e.grid(), GridDims { cols: 128, rows: 72 });
    assert!(e.placements().is_empty());
    assert_eq!(e.phase(), AnimationPhase::Initializing);
    assert_idle_outside_words(&e);
}

#[test]
fn zero_viewport_has_nothing_to_do() {
    let mut e = engine(0, 0, Theme::Dark);
    e.end_warm_up();
    e.regenerate();
    assert!(e.dots().is_empty());
    assert!(e.placements().is_empty());

    let mut surface = RecordingSurface::new();
    assert_eq!(
        e.render_frame(0.0, &mut surface),
        FrameOutcome::Rendered {
            dots: 0,
            progress: 0.02
        }
    );
}

#[test]
fn every_regeneration_resets_uncovered_dots_to_idle() {
    for theme in [Theme::Dark, Theme::Light] {
        let mut e = engine(1280, 720, theme);
        e.end_warm_up();
        for _ in 0..10 {
            e.regenerate();
            assert!(!e.placements().is_empty());
            assert_idle_outside_words(&e);
        }
    }
}

#[test]
fn lit_dots_take_their_placement_color() {
    let mut e = engine(1280, 720, Theme::Dark);
    e.regenerate();
    let p = e.placements()[0].clone();
    let pattern = TextPattern::render(&p.word, 1);
    let (c, r) = pattern.lit_pixels().next().unwrap();
    let idx = e.grid().index((p.col + c) as i64, (p.row + r) as i64).unwrap();
    assert_eq!(e.dots()[idx].target_color, e.palette().color(p.color_index));
}

#[test]
fn resize_reallocates_and_drops_words() {
    let mut e = engine(1920, 1080, Theme::Dark);
    e.regenerate();
    assert!(e.store().lit_count(e.palette()) > 0);
    let before = e.store().allocations();

    assert!(e.set_viewport(Viewport::new(800, 600)));

    assert_eq!(e.dots().len(), 54 * 40);
    assert_eq!(e.store().allocations(), before + 1);
    assert!(e.placements().is_empty());
    assert_eq!(e.store().lit_count(e.palette()), 0);
    assert_idle_outside_words(&e);
}

#[test]
fn same_viewport_is_ignored() {
    let mut e = engine(800, 600, Theme::Dark);
    e.regenerate();
    let placed = e.placements().len();
    assert!(!e.set_viewport(Viewport::new(800, 600)));
    assert_eq!(e.placements().len(), placed);
    assert_eq!(e.store().allocations(), 1);
}

#[test]
fn theme_switch_rederives_targets() {
    let mut e = engine(1280, 720, Theme::Dark);
    e.regenerate();
    let words = e.placements().to_vec();

    e.set_theme(Theme::Light);

    assert_eq!(e.theme(), Theme::Light);
    assert_eq!(e.placements(), words.as_slice());
    assert_idle_outside_words(&e);
    let light = Theme::Light.palette();
    assert!(e.dots().iter().any(|d| d.target_color == light.base));
    assert!(
        e.dots()
            .iter()
            .all(|d| d.target_color == light.base || light.accents.contains(&d.target_color))
    );
}

#[test]
fn hidden_page_skips_frames() {
    let mut e = engine(300, 300, Theme::Dark);
    let mut surface = RecordingSurface::new();
    e.set_visible(false);
    assert_eq!(e.on_animation_frame(1000.0, Some(&mut surface)), FrameOutcome::Hidden);
    assert_eq!(surface.frames(), 0);
    e.set_visible(true);
    assert!(e.on_animation_frame(1000.0, Some(&mut surface)).is_rendered());
    assert_eq!(surface.frames(), 1);
}

#[test]
fn frames_are_throttled_to_target_rate() {
    let mut e = engine(300, 300, Theme::Dark);
    let mut surface = RecordingSurface::new();
    assert_eq!(e.on_animation_frame(16.0, Some(&mut surface)), FrameOutcome::Throttled);
    assert!(e.on_animation_frame(40.0, Some(&mut surface)).is_rendered());
    assert_eq!(e.on_animation_frame(56.0, Some(&mut surface)), FrameOutcome::Throttled);
    assert!(e.on_animation_frame(80.0, Some(&mut surface)).is_rendered());
    assert_eq!(surface.frames(), 2);
}

#[test]
fn missing_surface_leaves_dots_alone() {
    let mut e = engine(300, 300, Theme::Dark);
    e.end_warm_up();
    let before: Vec<f64> = e.dots().iter().map(|d| d.current_opacity).collect();
    assert!(e.on_animation_frame(1000.0, None).is_rendered());
    let after: Vec<f64> = e.dots().iter().map(|d| d.current_opacity).collect();
    assert_eq!(before, after);
    assert_eq!(e.progress(), 0.0);
}

#[test]
fn progress_is_pinned_during_warm_up_then_climbs_to_one() {
    let mut e = engine(300, 300, Theme::Dark);
    let mut surface = RecordingSurface::new();
    for i in 0..10 {
        e.render_frame(f64::from(i) * 33.0, &mut surface);
        assert_eq!(e.progress(), 0.0);
    }

    e.end_warm_up();
    let mut last = 0.0;
    for i in 0..50 {
        e.render_frame(1000.0 + f64::from(i) * 33.0, &mut surface);
        assert!(e.progress() >= last);
        last = e.progress();
    }
    assert_eq!(e.progress(), 1.0);
    assert_eq!(e.phase(), AnimationPhase::Steady);

    e.render_frame(5000.0, &mut surface);
    assert_eq!(e.progress(), 1.0);
    assert_eq!(surface.dots().count(), e.dots().len());
}

#[test]
fn sub_pixel_spacing_is_rejected_before_sizing_the_grid() {
    let cfg = DisplayConfig {
        dot_spacing: 1e-300,
        ..DisplayConfig::default()
    };
    let err = DotMatrixEngine::new(
        cfg,
        Vocabulary::default(),
        Theme::Dark,
        Viewport::new(1920, 1080),
    )
    .err()
    .unwrap();
    assert!(err.to_string().contains("dot_spacing"));
}

#[test]
fn warm_up_flag_follows_end_warm_up() {
    let mut e = engine(800, 600, Theme::Dark);
    assert!(!e.is_warmed_up());
    e.end_warm_up();
    assert!(e.is_warmed_up());
}

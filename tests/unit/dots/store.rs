use super::*;
use crate::{foundation::core::Viewport, theme::palette::Theme};

fn synced(width: u32, height: u32, theme: Theme) -> DotStore {
    let mut store = DotStore::new();
    let grid = GridDims::for_viewport(Viewport::new(width, height), 15.0);
    store.sync(grid, 15.0, theme.palette(), &mut Rng64::new(1));
    store
}

#[test]
fn sync_allocates_one_dot_per_cell_at_idle() {
    let store = synced(1920, 1080, Theme::Dark);
    let palette = Theme::Dark.palette();
    assert_eq!(store.len(), 9216);
    assert_eq!(store.noise().len(), 9216);
    assert!(store.dots().iter().all(|d| {
        d.current_opacity == palette.idle_opacity
            && d.target_opacity == palette.idle_opacity
            && d.target_color == palette.base
    }));
    assert_eq!(store.dots()[0].center(), Point::new(7.5, 7.5));
    assert!(store.noise().levels.iter().all(|l| (0.0..1.0).contains(l)));
    assert!(store.noise().color_indices.iter().all(|i| *i < 6));
}

#[test]
fn sync_is_a_noop_for_unchanged_grid() {
    let mut store = synced(300, 300, Theme::Dark);
    let grid = store.grid();
    assert!(!store.sync(grid, 15.0, Theme::Dark.palette(), &mut Rng64::new(2)));
    assert_eq!(store.allocations(), 1);
}

#[test]
fn sync_replaces_buffer_on_resize() {
    let mut store = synced(1920, 1080, Theme::Dark);
    let grid = GridDims::for_viewport(Viewport::new(800, 600), 15.0);
    assert!(store.sync(grid, 15.0, Theme::Dark.palette(), &mut Rng64::new(2)));
    assert_eq!(store.len(), 54 * 40);
    assert_eq!(store.noise().len(), 54 * 40);
    assert_eq!(store.allocations(), 2);
}

#[test]
fn empty_grid_releases_buffers() {
    let mut store = synced(300, 300, Theme::Dark);
    assert!(!store.sync(GridDims::default(), 15.0, Theme::Dark.palette(), &mut Rng64::new(2)));
    assert!(store.is_empty());
    assert!(store.noise().is_empty());

    let mut fresh = DotStore::new();
    fresh.sync(GridDims::default(), 15.0, Theme::Dark.palette(), &mut Rng64::new(2));
    assert_eq!(fresh.allocations(), 0);
}

#[test]
fn apply_targets_lights_glyph_pixels_only() {
    let mut store = synced(600, 300, Theme::Dark);
    let palette = Theme::Dark.palette();
    let placement = WordPlacement {
        word: "GO".to_owned(),
        col: 3,
        row: 4,
        color_index: 2,
    };
    store.apply_targets(std::slice::from_ref(&placement), palette, 1);

    let pattern = TextPattern::render("GO", 1);
    let lit = pattern.lit_pixels().count();
    assert_eq!(store.lit_count(palette), lit);

    let grid = store.grid();
    for (c, r) in pattern.lit_pixels() {
        let idx = grid.index((3 + c) as i64, (4 + r) as i64).unwrap();
        let dot = store.dots()[idx];
        assert_eq!(dot.target_opacity, palette.lit_opacity);
        assert_eq!(dot.target_color, palette.color(2));
    }
}

#[test]
fn apply_targets_resets_previous_cycle() {
    let mut store = synced(600, 300, Theme::Light);
    let palette = Theme::Light.palette();
    let p = WordPlacement {
        word: "SQL".to_owned(),
        col: 2,
        row: 2,
        color_index: 0,
    };
    store.apply_targets(&[p], palette, 1);
    assert!(store.lit_count(palette) > 0);

    store.apply_targets(&[], palette, 1);
    assert_eq!(store.lit_count(palette), 0);
    assert!(store.dots().iter().all(|d| {
        d.target_opacity == palette.idle_opacity && d.target_color == palette.base
    }));
}

#[test]
fn glyphs_past_the_edge_are_clipped() {
    let mut store = synced(150, 150, Theme::Dark);
    let palette = Theme::Dark.palette();
    // 10x10 grid; the word runs far past the right and bottom edges.
    let p = WordPlacement {
        word: "KUBERNETES".to_owned(),
        col: 7,
        row: 6,
        color_index: 1,
    };
    store.apply_targets(&[p], palette, 1);
    let grid = store.grid();
    for (i, dot) in store.dots().iter().enumerate() {
        if dot.target_opacity == palette.lit_opacity {
            assert!(i % grid.cols >= 7 && i / grid.cols >= 6);
        }
    }
    assert!(store.lit_count(palette) > 0);
}

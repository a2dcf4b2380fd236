use super::*;

#[test]
fn width_includes_trailing_spacing() {
    let p = TextPattern::render("GO", 1);
    assert_eq!(p.width(), 12);
    assert_eq!(p.height(), GLYPH_HEIGHT);
    assert_eq!(TextPattern::footprint_width(2, 1), 12);
    // Spacing columns stay dark.
    for row in 0..GLYPH_HEIGHT {
        assert!(!p.is_on(5, row));
        assert!(!p.is_on(11, row));
    }
}

#[test]
fn lowercase_renders_like_uppercase() {
    assert_eq!(TextPattern::render("k8s", 1), TextPattern::render("K8S", 1));
}

#[test]
fn unknown_characters_render_blank_columns() {
    let p = TextPattern::render("A#", 1);
    assert_eq!(p.width(), 12);
    assert!(p.lit_pixels().all(|(col, _)| col < 5));
}

#[test]
fn plus_sign_ascii() {
    let p = TextPattern::render("+", 0);
    assert_eq!(
        p.to_ascii(),
        ".....\n..#..\n..#..\n#####\n..#..\n..#..\n.....\n"
    );
}

#[test]
fn lit_pixels_agree_with_is_on() {
    let p = TextPattern::render("SQL", 1);
    let lit: Vec<_> = p.lit_pixels().collect();
    assert!(!lit.is_empty());
    for (col, row) in &lit {
        assert!(p.is_on(*col, *row));
    }
    let count = (0..p.height())
        .flat_map(|r| (0..p.width()).map(move |c| (c, r)))
        .filter(|(c, r)| p.is_on(*c, *r))
        .count();
    assert_eq!(count, lit.len());
}

use crate::foundation::core::Rgb8;

/// Document color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Parse a `data-theme`-style attribute. Only `"light"` selects the light
    /// theme; missing or unrecognized values fall back to dark.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Dark => &DARK,
            Self::Light => &LIGHT,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colors and baseline opacities for one theme.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    /// Idle dot color.
    pub base: Rgb8,
    /// Idle dot opacity.
    pub idle_opacity: f64,
    /// Opacity of dots under a lit glyph pixel.
    pub lit_opacity: f64,
    /// Accent colors for words and static noise.
    pub accents: [Rgb8; 6],
    /// Surface fill used by the CPU rasterizer when an opaque frame is wanted.
    pub background: Rgb8,
}

static DARK: Palette = Palette {
    base: Rgb8::WHITE,
    idle_opacity: 0.15,
    lit_opacity: 0.95,
    accents: [
        Rgb8::new(14, 165, 233),
        Rgb8::new(168, 85, 247),
        Rgb8::new(6, 182, 212),
        Rgb8::new(16, 185, 129),
        Rgb8::new(245, 158, 11),
        Rgb8::new(239, 68, 68),
    ],
    background: Rgb8::new(10, 10, 15),
};

static LIGHT: Palette = Palette {
    base: Rgb8::BLACK,
    idle_opacity: 0.06,
    lit_opacity: 0.95,
    accents: [
        Rgb8::new(2, 132, 199),
        Rgb8::new(147, 51, 234),
        Rgb8::new(8, 145, 178),
        Rgb8::new(5, 150, 105),
        Rgb8::new(217, 119, 6),
        Rgb8::new(220, 38, 38),
    ],
    background: Rgb8::new(250, 250, 250),
};

impl Palette {
    pub fn len(&self) -> usize {
        self.accents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accents.is_empty()
    }

    /// Accent color; indices wrap around the palette.
    pub fn color(&self, index: usize) -> Rgb8 {
        self.accents[index % self.accents.len()]
    }
}

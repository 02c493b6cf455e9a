use crate::core::color::Color;

/// Name of the palette used when no scheme is configured.
pub const DEFAULT_COLOR_SCHEME: &str = "owid-distinct";

const FALLBACK_COLOR: Color = Color::rgb8(0x99, 0x99, 0x99);

/// A named categorical palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScheme {
    name: &'static str,
    colors: &'static [Color],
}

const OWID_DISTINCT: &[Color] = &[
    Color::rgb8(0x33, 0x60, 0xa9),
    Color::rgb8(0xfa, 0x8c, 0x00),
    Color::rgb8(0x42, 0x9b, 0x79),
    Color::rgb8(0xb1, 0x62, 0x14),
    Color::rgb8(0xc0, 0x59, 0x17),
    Color::rgb8(0x58, 0xac, 0x8c),
    Color::rgb8(0x28, 0x6b, 0xbb),
    Color::rgb8(0x88, 0x30, 0x39),
    Color::rgb8(0xbc, 0x8e, 0x5a),
    Color::rgb8(0x00, 0x29, 0x5b),
    Color::rgb8(0xc1, 0x50, 0x65),
    Color::rgb8(0x18, 0x47, 0x0f),
    Color::rgb8(0x9a, 0x51, 0x29),
    Color::rgb8(0xe5, 0x6e, 0x5a),
    Color::rgb8(0xa2, 0x55, 0x9c),
    Color::rgb8(0x38, 0xaa, 0xba),
    Color::rgb8(0x57, 0x81, 0x45),
    Color::rgb8(0x97, 0x00, 0x46),
    Color::rgb8(0x00, 0x84, 0x7e),
    Color::rgb8(0xb1, 0x35, 0x07),
];

const TABLEAU10: &[Color] = &[
    Color::rgb8(0x4e, 0x79, 0xa7),
    Color::rgb8(0xf2, 0x8e, 0x2c),
    Color::rgb8(0xe1, 0x57, 0x59),
    Color::rgb8(0x76, 0xb7, 0xb2),
    Color::rgb8(0x59, 0xa1, 0x4f),
    Color::rgb8(0xed, 0xc9, 0x49),
    Color::rgb8(0xaf, 0x7a, 0xa1),
    Color::rgb8(0xff, 0x9d, 0xa7),
    Color::rgb8(0x9c, 0x75, 0x5f),
    Color::rgb8(0xba, 0xb0, 0xab),
];

const DARK2: &[Color] = &[
    Color::rgb8(0x1b, 0x9e, 0x77),
    Color::rgb8(0xd9, 0x5f, 0x02),
    Color::rgb8(0x75, 0x70, 0xb3),
    Color::rgb8(0xe7, 0x29, 0x8a),
    Color::rgb8(0x66, 0xa6, 0x1e),
    Color::rgb8(0xe6, 0xab, 0x02),
    Color::rgb8(0xa6, 0x76, 0x1d),
    Color::rgb8(0x66, 0x66, 0x66),
];

const SCHEMES: &[ColorScheme] = &[
    ColorScheme {
        name: DEFAULT_COLOR_SCHEME,
        colors: OWID_DISTINCT,
    },
    ColorScheme {
        name: "tableau10",
        colors: TABLEAU10,
    },
    ColorScheme {
        name: "dark2",
        colors: DARK2,
    },
];

impl ColorScheme {
    /// Looks up a palette by name.
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        SCHEMES.iter().copied().find(|scheme| scheme.name == name)
    }

    /// Resolves an optional configured name, falling back to the default palette
    /// when the name is absent or unknown.
    #[must_use]
    pub fn resolve(name: Option<&str>) -> Self {
        name.and_then(Self::named).unwrap_or(SCHEMES[0])
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.name
    }

    /// Returns `count` colors in palette order, cycling when the palette is shorter.
    #[must_use]
    pub fn get_colors(self, count: usize) -> Vec<Color> {
        (0..count)
            .map(|index| self.colors[index % self.colors.len()])
            .collect()
    }
}

/// Picks a series color: an explicit override wins, otherwise the palette entry
/// at `index` is used.
#[must_use]
pub fn resolve_color(explicit: Option<Color>, palette: &[Color], index: usize) -> Color {
    if let Some(color) = explicit {
        return color;
    }
    if palette.is_empty() {
        return FALLBACK_COLOR;
    }
    palette[index % palette.len()]
}

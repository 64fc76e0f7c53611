use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Opaque RGB color as used by notebooks and sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color: {0:?}")]
pub struct ParseColorError(String);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Upper-case `#RRGGBB` form.
    pub fn to_hex(&self) -> String {
        format!("#{}", hex::encode_upper([self.r, self.g, self.b]))
    }

    fn from_hex_digits(digits: &str) -> Option<Self> {
        let expanded;
        let digits = match digits.len() {
            6 => digits,
            3 => {
                expanded = digits.chars().flat_map(|c| [c, c]).collect::<String>();
                expanded.as_str()
            }
            _ => return None,
        };
        let bytes = hex::decode(digits).ok()?;
        Some(Self::rgb(bytes[0], bytes[1], bytes[2]))
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Accepts `#RRGGBB`, `#RGB`, or an HTML color name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed.strip_prefix('#') {
            Some(digits) => Self::from_hex_digits(digits),
            None => NAMED_COLORS
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
                .map(|&(_, color)| color),
        };
        parsed.ok_or_else(|| ParseColorError(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// CSS named colors, sorted by name.
const NAMED_COLORS: &[(&str, Color)] = &[
    ("aliceblue", Color::rgb(0xF0, 0xF8, 0xFF)),
    ("antiquewhite", Color::rgb(0xFA, 0xEB, 0xD7)),
    ("aqua", Color::rgb(0x00, 0xFF, 0xFF)),
    ("aquamarine", Color::rgb(0x7F, 0xFF, 0xD4)),
    ("azure", Color::rgb(0xF0, 0xFF, 0xFF)),
    ("beige", Color::rgb(0xF5, 0xF5, 0xDC)),
    ("bisque", Color::rgb(0xFF, 0xE4, 0xC4)),
    ("black", Color::rgb(0x00, 0x00, 0x00)),
    ("blanchedalmond", Color::rgb(0xFF, 0xEB, 0xCD)),
    ("blue", Color::rgb(0x00, 0x00, 0xFF)),
    ("blueviolet", Color::rgb(0x8A, 0x2B, 0xE2)),
    ("brown", Color::rgb(0xA5, 0x2A, 0x2A)),
    ("burlywood", Color::rgb(0xDE, 0xB8, 0x87)),
    ("cadetblue", Color::rgb(0x5F, 0x9E, 0xA0)),
    ("chartreuse", Color::rgb(0x7F, 0xFF, 0x00)),
    ("chocolate", Color::rgb(0xD2, 0x69, 0x1E)),
    ("coral", Color::rgb(0xFF, 0x7F, 0x50)),
    ("cornflowerblue", Color::rgb(0x64, 0x95, 0xED)),
    ("cornsilk", Color::rgb(0xFF, 0xF8, 0xDC)),
    ("crimson", Color::rgb(0xDC, 0x14, 0x3C)),
    ("cyan", Color::rgb(0x00, 0xFF, 0xFF)),
    ("darkblue", Color::rgb(0x00, 0x00, 0x8B)),
    ("darkcyan", Color::rgb(0x00, 0x8B, 0x8B)),
    ("darkgoldenrod", Color::rgb(0xB8, 0x86, 0x0B)),
    ("darkgray", Color::rgb(0xA9, 0xA9, 0xA9)),
    ("darkgreen", Color::rgb(0x00, 0x64, 0x00)),
    ("darkgrey", Color::rgb(0xA9, 0xA9, 0xA9)),
    ("darkkhaki", Color::rgb(0xBD, 0xB7, 0x6B)),
    ("darkmagenta", Color::rgb(0x8B, 0x00, 0x8B)),
    ("darkolivegreen", Color::rgb(0x55, 0x6B, 0x2F)),
    ("darkorange", Color::rgb(0xFF, 0x8C, 0x00)),
    ("darkorchid", Color::rgb(0x99, 0x32, 0xCC)),
    ("darkred", Color::rgb(0x8B, 0x00, 0x00)),
    ("darksalmon", Color::rgb(0xE9, 0x96, 0x7A)),
    ("darkseagreen", Color::rgb(0x8F, 0xBC, 0x8F)),
    ("darkslateblue", Color::rgb(0x48, 0x3D, 0x8B)),
    ("darkslategray", Color::rgb(0x2F, 0x4F, 0x4F)),
    ("darkslategrey", Color::rgb(0x2F, 0x4F, 0x4F)),
    ("darkturquoise", Color::rgb(0x00, 0xCE, 0xD1)),
    ("darkviolet", Color::rgb(0x94, 0x00, 0xD3)),
    ("deeppink", Color::rgb(0xFF, 0x14, 0x93)),
    ("deepskyblue", Color::rgb(0x00, 0xBF, 0xFF)),
    ("dimgray", Color::rgb(0x69, 0x69, 0x69)),
    ("dimgrey", Color::rgb(0x69, 0x69, 0x69)),
    ("dodgerblue", Color::rgb(0x1E, 0x90, 0xFF)),
    ("firebrick", Color::rgb(0xB2, 0x22, 0x22)),
    ("floralwhite", Color::rgb(0xFF, 0xFA, 0xF0)),
    ("forestgreen", Color::rgb(0x22, 0x8B, 0x22)),
    ("fuchsia", Color::rgb(0xFF, 0x00, 0xFF)),
    ("gainsboro", Color::rgb(0xDC, 0xDC, 0xDC)),
    ("ghostwhite", Color::rgb(0xF8, 0xF8, 0xFF)),
    ("gold", Color::rgb(0xFF, 0xD7, 0x00)),
    ("goldenrod", Color::rgb(0xDA, 0xA5, 0x20)),
    ("gray", Color::rgb(0x80, 0x80, 0x80)),
    ("green", Color::rgb(0x00, 0x80, 0x00)),
    ("greenyellow", Color::rgb(0xAD, 0xFF, 0x2F)),
    ("grey", Color::rgb(0x80, 0x80, 0x80)),
    ("honeydew", Color::rgb(0xF0, 0xFF, 0xF0)),
    ("hotpink", Color::rgb(0xFF, 0x69, 0xB4)),
    ("indianred", Color::rgb(0xCD, 0x5C, 0x5C)),
    ("indigo", Color::rgb(0x4B, 0x00, 0x82)),
    ("ivory", Color::rgb(0xFF, 0xFF, 0xF0)),
    ("khaki", Color::rgb(0xF0, 0xE6, 0x8C)),
    ("lavender", Color::rgb(0xE6, 0xE6, 0xFA)),
    ("lavenderblush", Color::rgb(0xFF, 0xF0, 0xF5)),
    ("lawngreen", Color::rgb(0x7C, 0xFC, 0x00)),
    ("lemonchiffon", Color::rgb(0xFF, 0xFA, 0xCD)),
    ("lightblue", Color::rgb(0xAD, 0xD8, 0xE6)),
    ("lightcoral", Color::rgb(0xF0, 0x80, 0x80)),
    ("lightcyan", Color::rgb(0xE0, 0xFF, 0xFF)),
    ("lightgoldenrodyellow", Color::rgb(0xFA, 0xFA, 0xD2)),
    ("lightgray", Color::rgb(0xD3, 0xD3, 0xD3)),
    ("lightgreen", Color::rgb(0x90, 0xEE, 0x90)),
    ("lightgrey", Color::rgb(0xD3, 0xD3, 0xD3)),
    ("lightpink", Color::rgb(0xFF, 0xB6, 0xC1)),
    ("lightsalmon", Color::rgb(0xFF, 0xA0, 0x7A)),
    ("lightseagreen", Color::rgb(0x20, 0xB2, 0xAA)),
    ("lightskyblue", Color::rgb(0x87, 0xCE, 0xFA)),
    ("lightslategray", Color::rgb(0x77, 0x88, 0x99)),
    ("lightslategrey", Color::rgb(0x77, 0x88, 0x99)),
    ("lightsteelblue", Color::rgb(0xB0, 0xC4, 0xDE)),
    ("lightyellow", Color::rgb(0xFF, 0xFF, 0xE0)),
    ("lime", Color::rgb(0x00, 0xFF, 0x00)),
    ("limegreen", Color::rgb(0x32, 0xCD, 0x32)),
    ("linen", Color::rgb(0xFA, 0xF0, 0xE6)),
    ("magenta", Color::rgb(0xFF, 0x00, 0xFF)),
    ("maroon", Color::rgb(0x80, 0x00, 0x00)),
    ("mediumaquamarine", Color::rgb(0x66, 0xCD, 0xAA)),
    ("mediumblue", Color::rgb(0x00, 0x00, 0xCD)),
    ("mediumorchid", Color::rgb(0xBA, 0x55, 0xD3)),
    ("mediumpurple", Color::rgb(0x93, 0x70, 0xDB)),
    ("mediumseagreen", Color::rgb(0x3C, 0xB3, 0x71)),
    ("mediumslateblue", Color::rgb(0x7B, 0x68, 0xEE)),
    ("mediumspringgreen", Color::rgb(0x00, 0xFA, 0x9A)),
    ("mediumturquoise", Color::rgb(0x48, 0xD1, 0xCC)),
    ("mediumvioletred", Color::rgb(0xC7, 0x15, 0x85)),
    ("midnightblue", Color::rgb(0x19, 0x19, 0x70)),
    ("mintcream", Color::rgb(0xF5, 0xFF, 0xFA)),
    ("mistyrose", Color::rgb(0xFF, 0xE4, 0xE1)),
    ("moccasin", Color::rgb(0xFF, 0xE4, 0xB5)),
    ("navajowhite", Color::rgb(0xFF, 0xDE, 0xAD)),
    ("navy", Color::rgb(0x00, 0x00, 0x80)),
    ("oldlace", Color::rgb(0xFD, 0xF5, 0xE6)),
    ("olive", Color::rgb(0x80, 0x80, 0x00)),
    ("olivedrab", Color::rgb(0x6B, 0x8E, 0x23)),
    ("orange", Color::rgb(0xFF, 0xA5, 0x00)),
    ("orangered", Color::rgb(0xFF, 0x45, 0x00)),
    ("orchid", Color::rgb(0xDA, 0x70, 0xD6)),
    ("palegoldenrod", Color::rgb(0xEE, 0xE8, 0xAA)),
    ("palegreen", Color::rgb(0x98, 0xFB, 0x98)),
    ("paleturquoise", Color::rgb(0xAF, 0xEE, 0xEE)),
    ("palevioletred", Color::rgb(0xDB, 0x70, 0x93)),
    ("papayawhip", Color::rgb(0xFF, 0xEF, 0xD5)),
    ("peachpuff", Color::rgb(0xFF, 0xDA, 0xB9)),
    ("peru", Color::rgb(0xCD, 0x85, 0x3F)),
    ("pink", Color::rgb(0xFF, 0xC0, 0xCB)),
    ("plum", Color::rgb(0xDD, 0xA0, 0xDD)),
    ("powderblue", Color::rgb(0xB0, 0xE0, 0xE6)),
    ("purple", Color::rgb(0x80, 0x00, 0x80)),
    ("rebeccapurple", Color::rgb(0x66, 0x33, 0x99)),
    ("red", Color::rgb(0xFF, 0x00, 0x00)),
    ("rosybrown", Color::rgb(0xBC, 0x8F, 0x8F)),
    ("royalblue", Color::rgb(0x41, 0x69, 0xE1)),
    ("saddlebrown", Color::rgb(0x8B, 0x45, 0x13)),
    ("salmon", Color::rgb(0xFA, 0x80, 0x72)),
    ("sandybrown", Color::rgb(0xF4, 0xA4, 0x60)),
    ("seagreen", Color::rgb(0x2E, 0x8B, 0x57)),
    ("seashell", Color::rgb(0xFF, 0xF5, 0xEE)),
    ("sienna", Color::rgb(0xA0, 0x52, 0x2D)),
    ("silver", Color::rgb(0xC0, 0xC0, 0xC0)),
    ("skyblue", Color::rgb(0x87, 0xCE, 0xEB)),
    ("slateblue", Color::rgb(0x6A, 0x5A, 0xCD)),
    ("slategray", Color::rgb(0x70, 0x80, 0x90)),
    ("slategrey", Color::rgb(0x70, 0x80, 0x90)),
    ("snow", Color::rgb(0xFF, 0xFA, 0xFA)),
    ("springgreen", Color::rgb(0x00, 0xFF, 0x7F)),
    ("steelblue", Color::rgb(0x46, 0x82, 0xB4)),
    ("tan", Color::rgb(0xD2, 0xB4, 0x8C)),
    ("teal", Color::rgb(0x00, 0x80, 0x80)),
    ("thistle", Color::rgb(0xD8, 0xBF, 0xD8)),
    ("tomato", Color::rgb(0xFF, 0x63, 0x47)),
    ("turquoise", Color::rgb(0x40, 0xE0, 0xD0)),
    ("violet", Color::rgb(0xEE, 0x82, 0xEE)),
    ("wheat", Color::rgb(0xF5, 0xDE, 0xB3)),
    ("white", Color::rgb(0xFF, 0xFF, 0xFF)),
    ("whitesmoke", Color::rgb(0xF5, 0xF5, 0xF5)),
    ("yellow", Color::rgb(0xFF, 0xFF, 0x00)),
    ("yellowgreen", Color::rgb(0x9A, 0xCD, 0x32)),
];

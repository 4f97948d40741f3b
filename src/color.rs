//! Symbolic color tokens and their renderer-native values.
//!
//! Scene descriptions carry colors in a legacy toolkit convention, where
//! `gray80` means a neutral gray at 80% intensity. [`translate_color`] maps
//! those tokens to a [`ColorSpec`], and [`ColorSpec::resolve`] turns a spec
//! into the 8-bit RGB value the rasterizer writes.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Color used when an entity carries no color token.
pub const DEFAULT_COLOR: &str = "blue";

/// Background used when a capture happens before a background was set.
pub const DEFAULT_BACKGROUND: &str = "gray";

/// A renderer-native color description.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    /// Normalized RGB triple. Components outside [0, 1] are clamped on resolve.
    Rgb(f32, f32, f32),
    /// Native color name or hex code, validated on resolve.
    Named(String),
}

/// 8-bit RGB pixel value.
pub type Rgb8 = [u8; 3];

/// Color resolution errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("Unknown color name '{0}'")]
    UnknownName(String),
    #[error("Malformed hex color '{0}'")]
    BadHex(String),
}

/// Translate a symbolic color token into a renderer-native color.
///
/// - `None` yields [`DEFAULT_COLOR`].
/// - `grayNN`/`greyNN` (any case) yields a neutral RGB at `NN / 100`, unclamped.
/// - `gray`, `grey` and their light/dark variants map to the native names.
/// - Anything else passes through untouched.
pub fn translate_color(token: Option<&str>) -> ColorSpec {
    let Some(token) = token else {
        return ColorSpec::Named(DEFAULT_COLOR.to_owned());
    };

    let lower = token.to_ascii_lowercase();

    if let Some(level) = parse_gray_level(&lower) {
        let v = level / 100.0;
        return ColorSpec::Rgb(v, v, v);
    }

    let alias = match lower.as_str() {
        "gray" | "grey" => Some("gray"),
        "lightgray" | "lightgrey" => Some("lightgray"),
        "darkgray" | "darkgrey" => Some("darkgray"),
        _ => None,
    };
    match alias {
        Some(name) => ColorSpec::Named(name.to_owned()),
        None => ColorSpec::Named(token.to_owned()),
    }
}

/// Digits following a `gray`/`grey` prefix, if the whole token has that form.
///
/// Parsed as a float so arbitrarily long digit runs still yield a level.
fn parse_gray_level(lower: &str) -> Option<f32> {
    let digits = lower
        .strip_prefix("gray")
        .or_else(|| lower.strip_prefix("grey"))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl ColorSpec {
    /// Resolve to the 8-bit RGB value written into frames.
    pub fn resolve(&self) -> Result<Rgb8, ColorError> {
        match self {
            ColorSpec::Rgb(r, g, b) => Ok([to_u8(*r), to_u8(*g), to_u8(*b)]),
            ColorSpec::Named(name) => resolve_name(name),
        }
    }
}

/// Translate and resolve in one step.
pub fn resolve_token(token: Option<&str>) -> Result<Rgb8, ColorError> {
    translate_color(token).resolve()
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn resolve_name(name: &str) -> Result<Rgb8, ColorError> {
    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ColorError::BadHex(name.to_owned()));
    }
    named_colors()
        .get(name.to_ascii_lowercase().as_str())
        .copied()
        .ok_or_else(|| ColorError::UnknownName(name.to_owned()))
}

/// `rgb`, `rgba`, `rrggbb` or `rrggbbaa`. Alpha is accepted and dropped.
fn parse_hex(hex: &str) -> Option<Rgb8> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 | 4 => {
            let mut out = [0u8; 3];
            for (slot, c) in out.iter_mut().zip(hex.chars()) {
                *slot = c.to_digit(16)? as u8 * 17;
            }
            Some(out)
        }
        6 | 8 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some([channel(0)?, channel(2)?, channel(4)?])
        }
        _ => None,
    }
}

/// Native color table, built once per process and read-only afterwards.
fn named_colors() -> &'static HashMap<&'static str, Rgb8> {
    static TABLE: OnceLock<HashMap<&'static str, Rgb8>> = OnceLock::new();
    TABLE.get_or_init(|| {
        NAMED_COLORS
            .iter()
            .map(|&(name, rgb)| {
                let [_, r, g, b] = rgb.to_be_bytes();
                (name, [r, g, b])
            })
            .collect()
    })
}

const NAMED_COLORS: &[(&str, u32)] = &[
    // Single-letter shorthands
    ("b", 0x0000FF),
    ("g", 0x008000),
    ("r", 0xFF0000),
    ("c", 0x00BFBF),
    ("m", 0xBF00BF),
    ("y", 0xBFBF00),
    ("k", 0x000000),
    ("w", 0xFFFFFF),
    // Tableau palette
    ("tab:blue", 0x1F77B4),
    ("tab:orange", 0xFF7F0E),
    ("tab:green", 0x2CA02C),
    ("tab:red", 0xD62728),
    ("tab:purple", 0x9467BD),
    ("tab:brown", 0x8C564B),
    ("tab:pink", 0xE377C2),
    ("tab:gray", 0x7F7F7F),
    ("tab:grey", 0x7F7F7F),
    ("tab:olive", 0xBCBD22),
    ("tab:cyan", 0x17BECF),
    // CSS4
    ("aliceblue", 0xF0F8FF),
    ("antiquewhite", 0xFAEBD7),
    ("aqua", 0x00FFFF),
    ("aquamarine", 0x7FFFD4),
    ("azure", 0xF0FFFF),
    ("beige", 0xF5F5DC),
    ("bisque", 0xFFE4C4),
    ("black", 0x000000),
    ("blanchedalmond", 0xFFEBCD),
    ("blue", 0x0000FF),
    ("blueviolet", 0x8A2BE2),
    ("brown", 0xA52A2A),
    ("burlywood", 0xDEB887),
    ("cadetblue", 0x5F9EA0),
    ("chartreuse", 0x7FFF00),
    ("chocolate", 0xD2691E),
    ("coral", 0xFF7F50),
    ("cornflowerblue", 0x6495ED),
    ("cornsilk", 0xFFF8DC),
    ("crimson", 0xDC143C),
    ("cyan", 0x00FFFF),
    ("darkblue", 0x00008B),
    ("darkcyan", 0x008B8B),
    ("darkgoldenrod", 0xB8860B),
    ("darkgray", 0xA9A9A9),
    ("darkgreen", 0x006400),
    ("darkgrey", 0xA9A9A9),
    ("darkkhaki", 0xBDB76B),
    ("darkmagenta", 0x8B008B),
    ("darkolivegreen", 0x556B2F),
    ("darkorange", 0xFF8C00),
    ("darkorchid", 0x9932CC),
    ("darkred", 0x8B0000),
    ("darksalmon", 0xE9967A),
    ("darkseagreen", 0x8FBC8F),
    ("darkslateblue", 0x483D8B),
    ("darkslategray", 0x2F4F4F),
    ("darkslategrey", 0x2F4F4F),
    ("darkturquoise", 0x00CED1),
    ("darkviolet", 0x9400D3),
    ("deeppink", 0xFF1493),
    ("deepskyblue", 0x00BFFF),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("dodgerblue", 0x1E90FF),
    ("firebrick", 0xB22222),
    ("floralwhite", 0xFFFAF0),
    ("forestgreen", 0x228B22),
    ("fuchsia", 0xFF00FF),
    ("gainsboro", 0xDCDCDC),
    ("ghostwhite", 0xF8F8FF),
    ("gold", 0xFFD700),
    ("goldenrod", 0xDAA520),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("greenyellow", 0xADFF2F),
    ("grey", 0x808080),
    ("honeydew", 0xF0FFF0),
    ("hotpink", 0xFF69B4),
    ("indianred", 0xCD5C5C),
    ("indigo", 0x4B0082),
    ("ivory", 0xFFFFF0),
    ("khaki", 0xF0E68C),
    ("lavender", 0xE6E6FA),
    ("lavenderblush", 0xFFF0F5),
    ("lawngreen", 0x7CFC00),
    ("lemonchiffon", 0xFFFACD),
    ("lightblue", 0xADD8E6),
    ("lightcoral", 0xF08080),
    ("lightcyan", 0xE0FFFF),
    ("lightgoldenrodyellow", 0xFAFAD2),
    ("lightgray", 0xD3D3D3),
    ("lightgreen", 0x90EE90),
    ("lightgrey", 0xD3D3D3),
    ("lightpink", 0xFFB6C1),
    ("lightsalmon", 0xFFA07A),
    ("lightseagreen", 0x20B2AA),
    ("lightskyblue", 0x87CEFA),
    ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xB0C4DE),
    ("lightyellow", 0xFFFFE0),
    ("lime", 0x00FF00),
    ("limegreen", 0x32CD32),
    ("linen", 0xFAF0E6),
    ("magenta", 0xFF00FF),
    ("maroon", 0x800000),
    ("mediumaquamarine", 0x66CDAA),
    ("mediumblue", 0x0000CD),
    ("mediumorchid", 0xBA55D3),
    ("mediumpurple", 0x9370DB),
    ("mediumseagreen", 0x3CB371),
    ("mediumslateblue", 0x7B68EE),
    ("mediumspringgreen", 0x00FA9A),
    ("mediumturquoise", 0x48D1CC),
    ("mediumvioletred", 0xC71585),
    ("midnightblue", 0x191970),
    ("mintcream", 0xF5FFFA),
    ("mistyrose", 0xFFE4E1),
    ("moccasin", 0xFFE4B5),
    ("navajowhite", 0xFFDEAD),
    ("navy", 0x000080),
    ("oldlace", 0xFDF5E6),
    ("olive", 0x808000),
    ("olivedrab", 0x6B8E23),
    ("orange", 0xFFA500),
    ("orangered", 0xFF4500),
    ("orchid", 0xDA70D6),
    ("palegoldenrod", 0xEEE8AA),
    ("palegreen", 0x98FB98),
    ("paleturquoise", 0xAFEEEE),
    ("palevioletred", 0xDB7093),
    ("papayawhip", 0xFFEFD5),
    ("peachpuff", 0xFFDAB9),
    ("peru", 0xCD853F),
    ("pink", 0xFFC0CB),
    ("plum", 0xDDA0DD),
    ("powderblue", 0xB0E0E6),
    ("purple", 0x800080),
    ("rebeccapurple", 0x663399),
    ("red", 0xFF0000),
    ("rosybrown", 0xBC8F8F),
    ("royalblue", 0x4169E1),
    ("saddlebrown", 0x8B4513),
    ("salmon", 0xFA8072),
    ("sandybrown", 0xF4A460),
    ("seagreen", 0x2E8B57),
    ("seashell", 0xFFF5EE),
    ("sienna", 0xA0522D),
    ("silver", 0xC0C0C0),
    ("skyblue", 0x87CEEB),
    ("slateblue", 0x6A5ACD),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
    ("snow", 0xFFFAFA),
    ("springgreen", 0x00FF7F),
    ("steelblue", 0x4682B4),
    ("tan", 0xD2B48C),
    ("teal", 0x008080),
    ("thistle", 0xD8BFD8),
    ("tomato", 0xFF6347),
    ("turquoise", 0x40E0D0),
    ("violet", 0xEE82EE),
    ("wheat", 0xF5DEB3),
    ("white", 0xFFFFFF),
    ("whitesmoke", 0xF5F5F5),
    ("yellow", 0xFFFF00),
    ("yellowgreen", 0x9ACD32),
];

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_none_is_default_blue() {
        assert_eq!(translate_color(None), ColorSpec::Named("blue".into()));
        assert_eq!(resolve_token(None), Ok([0, 0, 255]));
    }

    #[test]
    fn test_gray_spellings_match() {
        assert_eq!(translate_color(Some("grey50")), translate_color(Some("gray50")));
        assert_eq!(translate_color(Some("GRAY50")), translate_color(Some("gray50")));
    }

    #[test]
    fn test_gray_above_100_not_clamped_until_resolve() {
        assert_eq!(translate_color(Some("gray150")), ColorSpec::Rgb(1.5, 1.5, 1.5));
        assert_eq!(resolve_token(Some("gray150")), Ok([255, 255, 255]));
    }

    #[test]
    fn test_aliases() {
        assert_eq!(translate_color(Some("Grey")), ColorSpec::Named("gray".into()));
        assert_eq!(
            translate_color(Some("LIGHTGREY")),
            ColorSpec::Named("lightgray".into())
        );
        assert_eq!(
            translate_color(Some("darkgrey")),
            ColorSpec::Named("darkgray".into())
        );
    }

    #[test]
    fn test_unrecognized_passes_through() {
        assert_eq!(
            translate_color(Some("#ff00ff")),
            ColorSpec::Named("#ff00ff".into())
        );
        assert_eq!(translate_color(Some("gray8x")), ColorSpec::Named("gray8x".into()));
        assert_eq!(translate_color(Some("White")), ColorSpec::Named("White".into()));
    }

    #[test]
    fn test_resolve_hex_and_names() {
        assert_eq!(resolve_token(Some("#ff00ff")), Ok([255, 0, 255]));
        assert_eq!(resolve_token(Some("#0f0")), Ok([0, 255, 0]));
        assert_eq!(resolve_token(Some("White")), Ok([255, 255, 255]));
        assert_eq!(resolve_token(Some("gray80")), Ok([204, 204, 204]));
    }

    #[test]
    fn test_resolve_failures() {
        assert_eq!(
            resolve_token(Some("notacolor")),
            Err(ColorError::UnknownName("notacolor".into()))
        );
        assert_eq!(
            resolve_token(Some("#12345")),
            Err(ColorError::BadHex("#12345".into()))
        );
        assert_eq!(
            resolve_token(Some("#ff00008")),
            Err(ColorError::BadHex("#ff00008".into()))
        );
    }

    #[test]
    fn test_resolve_full_css_table() {
        assert_eq!(resolve_token(Some("darkorange")), Ok([255, 140, 0]));
        assert_eq!(resolve_token(Some("chartreuse")), Ok([127, 255, 0]));
        assert_eq!(resolve_token(Some("lightgreen")), Ok([144, 238, 144]));
        assert_eq!(resolve_token(Some("orchid")), Ok([218, 112, 214]));
        assert_eq!(resolve_token(Some("lavender")), Ok([230, 230, 250]));
        assert_eq!(resolve_token(Some("YellowGreen")), Ok([154, 205, 50]));
        assert_eq!(resolve_token(Some("rebeccapurple")), Ok([102, 51, 153]));
        assert_eq!(resolve_token(Some("tab:blue")), Ok([31, 119, 180]));
        assert_eq!(
            NAMED_COLORS
                .iter()
                .filter(|(name, _)| name.len() > 1 && !name.starts_with("tab:"))
                .count(),
            148
        );
    }

    #[test]
    fn test_resolve_hex_with_alpha() {
        assert_eq!(resolve_token(Some("#ff000080")), Ok([255, 0, 0]));
        assert_eq!(resolve_token(Some("#0f08")), Ok([0, 255, 0]));
    }

    #[test]
    fn test_huge_gray_level_is_still_neutral() {
        let ColorSpec::Rgb(r, g, b) = translate_color(Some("gray4294967296")) else {
            panic!("expected rgb");
        };
        assert!(r > 1.0);
        assert_eq!((r, g), (g, b));
        assert_eq!(resolve_token(Some("gray4294967296")), Ok([255, 255, 255]));
        assert_eq!(resolve_token(Some(&format!("grey{}", "9".repeat(60)))), Ok([255, 255, 255]));
    }

    proptest! {
        #[test]
        fn prop_gray_levels_are_neutral(n in 0u32..=100, grey in any::<bool>()) {
            let token = format!("{}{}", if grey { "grey" } else { "gray" }, n);
            let ColorSpec::Rgb(r, g, b) = translate_color(Some(&token)) else {
                panic!("expected rgb for {token}");
            };
            let expected = n as f32 / 100.0;
            prop_assert!((r - expected).abs() < 1e-6);
            prop_assert_eq!(r, g);
            prop_assert_eq!(g, b);
        }
    }
}

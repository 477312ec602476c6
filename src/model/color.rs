use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Linear RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
}

impl Rgb {
    /// Plain white, used when a color is missing or unreadable.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Build a color from float components (clamped to `0.0..=1.0`).
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Build a color from a packed `0xRRGGBB` integer.
    #[must_use]
    pub fn from_hex(packed: u32) -> Self {
        let channel = |shift: u32| ((packed >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Parse a CSS-style hex string: `#rrggbb`, `rrggbb`, `#rgb` or
    /// `0xrrggbb`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .unwrap_or(trimmed);

        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::from_hex),
            3 => {
                let short = u32::from_str_radix(digits, 16).ok()?;
                // Expand each nibble: 0xabc -> 0xaabbcc
                let expand = |n: u32| (n & 0xf) * 0x11;
                let packed = (expand(short >> 8) << 16)
                    | (expand(short >> 4) << 8)
                    | expand(short);
                Some(Self::from_hex(packed))
            }
            _ => None,
        }
    }

    /// Components as an array, for GPU upload.
    #[must_use]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Rgb {
    /// Read a color from a packed integer, a hex string or a float triple.
    /// Anything else yields `None`.
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .and_then(|packed| u32::try_from(packed).ok())
                .map(Self::from_hex),
            Value::String(text) => Self::parse(text),
            Value::Array(items) => match items.as_slice() {
                [r, g, b] => Some(Self::new(
                    r.as_f64()? as f32,
                    g.as_f64()? as f32,
                    b.as_f64()? as f32,
                )),
                _ => None,
            },
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Rgb {
    /// Unreadable colors become white with a warning.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value).unwrap_or_else(|| {
            log::warn!("unreadable color {value}, using white");
            Self::WHITE
        }))
    }
}

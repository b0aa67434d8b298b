use std::fmt::Display;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0x00, 0x00, 0x00);
    pub const WHITE: Rgba = Rgba::opaque(0xFF, 0xFF, 0xFF);
    pub const TRANSPARENT: Rgba = Rgba::new(0x00, 0x00, 0x00, 0x00);

    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Rgba {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Rgba::new(red, green, blue, 0xFF)
    }

    /// Parses `#rrggbb` (hex digits in either case) into an opaque color.
    pub fn from_hex(value: &str) -> Result<Self, ParseColorError> {
        let digits = value
            .strip_prefix('#')
            .filter(|digits| digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| ParseColorError(value.to_owned()))?;
        let component = |index: usize| {
            u8::from_str_radix(&digits[index..index + 2], 16)
                .map_err(|_| ParseColorError(value.to_owned()))
        };
        Ok(Rgba::opaque(component(0)?, component(2)?, component(4)?))
    }

    /// Packs the color as `red | green << 8 | blue << 16 | alpha << 24`.
    pub fn to_le_u32(self) -> u32 {
        u32::from_le_bytes([self.red, self.green, self.blue, self.alpha])
    }

    pub fn from_le_u32(value: u32) -> Self {
        let [red, green, blue, alpha] = value.to_le_bytes();
        Rgba::new(red, green, blue, alpha)
    }
}

impl FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgba::from_hex(s)
    }
}

impl Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl Display for ParseColorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not a color of the form #rrggbb", self.0)
    }
}

impl std::error::Error for ParseColorError {}

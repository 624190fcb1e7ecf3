use crate::error::SimError;
use std::fmt;
use std::str::FromStr;

/// An RGB color, as stored in a canvas and read by a corner sensor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const GRAY: Rgb = Rgb(127, 127, 127);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
}

/// Ring colors used when none are configured, from the outermost ring inward
pub const BAND_COLORS: [Rgb; 3] = [Rgb::WHITE, Rgb::BLACK, Rgb::GRAY];

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0, self.1, self.2)
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(color: Rgb) -> Self {
        crossterm::style::Color::Rgb {
            r: color.0,
            g: color.1,
            b: color.2,
        }
    }
}

impl FromStr for Rgb {
    type Err = SimError;

    /// Parses a color name or a `#rrggbb` hex triple
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let named = match trimmed.to_ascii_lowercase().as_str() {
            "white" => Some(Rgb::WHITE),
            "gray" | "grey" => Some(Rgb::GRAY),
            "black" => Some(Rgb::BLACK),
            "red" => Some(Rgb::RED),
            "green" => Some(Rgb::GREEN),
            "blue" => Some(Rgb::BLUE),
            _ => None,
        };
        if let Some(color) = named {
            return Ok(color);
        }

        let hex = trimmed
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6 && hex.is_ascii())
            .ok_or_else(|| SimError::InvalidColor(s.to_string()))?;
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| SimError::InvalidColor(s.to_string()))
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("White".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert_eq!(" grey ".parse::<Rgb>().unwrap(), Rgb::GRAY);
        assert_eq!("BLACK".parse::<Rgb>().unwrap(), Rgb::BLACK);
    }

    #[test]
    fn parses_hex_triples() {
        assert_eq!("#7f7f7f".parse::<Rgb>().unwrap(), Rgb::GRAY);
        assert_eq!("#FF8000".parse::<Rgb>().unwrap(), Rgb(255, 128, 0));
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["", "purple", "#fff", "#gg0000", "ff0000", "#ff00000"] {
            assert!(bad.parse::<Rgb>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn displays_as_tuple() {
        assert_eq!(Rgb::GRAY.to_string(), "(127, 127, 127)");
    }
}

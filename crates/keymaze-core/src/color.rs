//! The [`Color`] code vocabulary of maze rasters.
//!
//! Five codes are reserved; every other 24-bit value is a *locked-zone*
//! color, acting both as a key identity and as a barrier identity.

use std::fmt;

/// A packed `0x00RRGGBB` color code.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    /// Impassable cell (black).
    pub const WALL: Color = Color(0x0000_0000);
    /// Plain walkable cell (white).
    pub const FLOOR: Color = Color(0x00FF_FFFF);
    /// The single start cell.
    pub const START: Color = Color(0x00C3_C3C3);
    /// A goal-zone cell.
    pub const GOAL: Color = Color(0x007F_7F7F);
    /// Marker written when rendering a solved route (red).
    pub const TRAIL: Color = Color(0x00FF_0000);

    /// Pack an RGB triple into a color code.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Unpack into an RGB triple.
    #[inline]
    pub const fn rgb(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }

    /// Whether this is a locked-zone / key color, i.e. any code outside the
    /// reserved vocabulary.
    #[inline]
    pub fn is_zone(self) -> bool {
        self != Self::WALL
            && self != Self::FLOOR
            && self != Self::START
            && self != Self::GOAL
            && self != Self::TRAIL
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_round_trip() {
        let c = Color::from_rgb(0x12, 0x34, 0x56);
        assert_eq!(c, Color(0x0012_3456));
        assert_eq!(c.rgb(), (0x12, 0x34, 0x56));
    }

    #[test]
    fn reserved_codes_are_not_zones() {
        for c in [
            Color::WALL,
            Color::FLOOR,
            Color::START,
            Color::GOAL,
            Color::TRAIL,
        ] {
            assert!(!c.is_zone(), "{c} must not classify as a zone color");
        }
    }

    #[test]
    fn any_other_code_is_a_zone() {
        assert!(Color::from_rgb(0, 0, 255).is_zone());
        assert!(Color::from_rgb(0, 128, 0).is_zone());
        assert!(Color(0x00AB_CDEF).is_zone());
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(Color::TRAIL.to_string(), "#FF0000");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn color_round_trips_through_serde() {
        let c = Color::from_rgb(0x12, 0x34, 0x56);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(serde_json::from_str::<Color>(&json).unwrap(), c);
    }
}

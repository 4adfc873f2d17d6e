//! Diverging color scale for the percentage-change metric.
//!
//! Three stops: bright red at the negative endpoint, neutral gray at zero,
//! bright green at the positive endpoint. Continuous linear interpolation
//! between stops; values beyond the endpoints clip.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 8-bit RGB color, serialized as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation toward `other`, `t` in [0, 1].
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).ok_or_else(|| D::Error::custom(format!("invalid hex color '{s}'")))
    }
}

/// Three-stop diverging scale with a fixed midpoint and endpoint clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivergingScale {
    pub negative: Rgb,
    pub midpoint: Rgb,
    pub positive: Rgb,
    /// Half-width of the mapped range: values in [−range, +range] spread
    /// across the scale, everything outside clips to the endpoints.
    pub range: f64,
}

impl DivergingScale {
    /// The heatmap scale: −5% bright red, 0% neutral gray, +5% bright green.
    pub fn heatmap() -> Self {
        Self {
            negative: Rgb::new(0xff, 0x2c, 0x1c),
            midpoint: Rgb::new(0x48, 0x44, 0x54),
            positive: Rgb::new(0x30, 0xdc, 0x5c),
            range: 5.0,
        }
    }

    /// Map a percentage-change value to its fill color.
    pub fn color_for(&self, value: f64) -> Rgb {
        let clipped = value.clamp(-self.range, self.range);
        if clipped < 0.0 {
            // −range → negative stop, 0 → midpoint
            self.negative.lerp(self.midpoint, 1.0 + clipped / self.range)
        } else {
            self.midpoint.lerp(self.positive, clipped / self.range)
        }
    }
}

impl Default for DivergingScale {
    fn default() -> Self {
        Self::heatmap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_maps_to_the_declared_midpoint() {
        let scale = DivergingScale::heatmap();
        assert_eq!(scale.color_for(0.0), Rgb::from_hex("#484454").unwrap());
    }

    #[test]
    fn endpoints_and_beyond_clip() {
        let scale = DivergingScale::heatmap();
        let red = Rgb::from_hex("#ff2c1c").unwrap();
        let green = Rgb::from_hex("#30dc5c").unwrap();

        assert_eq!(scale.color_for(-5.0), red);
        assert_eq!(scale.color_for(-12.5), red);
        assert_eq!(scale.color_for(5.0), green);
        assert_eq!(scale.color_for(9.9), green);
    }

    #[test]
    fn interpolation_is_strictly_between_stops() {
        let scale = DivergingScale::heatmap();
        let mid = scale.midpoint;
        let half_up = scale.color_for(2.5);
        assert_ne!(half_up, mid);
        assert_ne!(half_up, scale.positive);
        // Green channel rises monotonically on the positive side.
        assert!(half_up.g > mid.g && half_up.g < scale.positive.g);
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(255, 255, 255);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(128, 128, 128));
    }

    #[test]
    fn hex_round_trip() {
        let c = Rgb::new(0x30, 0xdc, 0x5c);
        assert_eq!(Rgb::from_hex(&c.to_hex()), Some(c));
        assert_eq!(Rgb::from_hex("30dc5c"), None);
        assert_eq!(Rgb::from_hex("#30dc5"), None);
        assert_eq!(Rgb::from_hex("#zzdc5c"), None);
    }

    #[test]
    fn serde_round_trips_hex_strings() {
        let c = Rgb::new(0xff, 0x2c, 0x1c);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#ff2c1c\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}

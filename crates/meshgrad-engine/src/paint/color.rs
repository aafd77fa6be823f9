use std::fmt;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::InvalidColorFormat;

/// Straight sRGB color with 8-bit channels.
///
/// This is the only color model the engine persists or renders. Text form is
/// always `#rrggbb` (lowercase on output, either case accepted on input).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses exactly six hex digits with an optional leading `#`.
    pub fn from_hex(hex: &str) -> Result<Self, InvalidColorFormat> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidColorFormat::new(hex));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| InvalidColorFormat::new(hex))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Builds a color from `[0, 1]` channel values, rounding to nearest.
    #[inline]
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        Self::new(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b))
    }

    #[inline]
    pub fn to_unit(self) -> (f64, f64, f64) {
        (self.r as f64 / 255.0, self.g as f64 / 255.0, self.b as f64 / 255.0)
    }

    /// Per-channel linear interpolation, rounded to nearest.
    ///
    /// `t` is clamped to `[0, 1]`; a non-finite `t` yields `self`.
    #[inline]
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        if !t.is_finite() {
            return self;
        }
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| {
            let a = a as f64;
            (a + (b as f64 - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    #[inline]
    pub const fn opaque(self) -> Rgba8 {
        Rgba8 { r: self.r, g: self.g, b: self.b, a: 255 }
    }

    /// HSV view of this color (no rounding).
    pub fn to_hsv(self) -> Hsv {
        let (r, g, b) = self.to_unit();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let s = if max == 0.0 { 0.0 } else { delta / max * 100.0 };

        Hsv::new(h, s, max * 100.0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = InvalidColorFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = InvalidColorFormat;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// One output pixel: straight RGBA, 8 bits per channel.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Rgba8 = Rgba8 { r: 0, g: 0, b: 0, a: 0 };

    #[inline]
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

/// Hue in degrees `[0, 360)`, saturation and value in `[0, 100]`.
///
/// Transient picker view; never persisted.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h: normalize_hue(h), s: s.clamp(0.0, 100.0), v: v.clamp(0.0, 100.0) }
    }

    pub fn to_rgb(self) -> Rgb {
        let s = self.s / 100.0;
        let v = self.v / 100.0;
        let f = |n: f64| {
            let k = (n + self.h / 60.0).rem_euclid(6.0);
            v * (1.0 - s * k.min(4.0 - k).min(1.0).max(0.0))
        };
        Rgb::from_unit(f(5.0), f(3.0), f(1.0))
    }

    /// HSL view of the same color.
    ///
    /// Lightness of exactly 0 or 1 gives saturation 0.
    pub fn to_hsl(self) -> Hsl {
        let s = self.s / 100.0;
        let v = self.v / 100.0;
        let l = (2.0 - s) * v / 2.0;
        let s_hsl = if l <= 0.0 || l >= 1.0 {
            0.0
        } else {
            s * v / if l < 0.5 { l * 2.0 } else { 2.0 - l * 2.0 }
        };
        Hsl::new(self.h, s_hsl * 100.0, l * 100.0)
    }
}

impl fmt::Display for Hsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsv({}, {}%, {}%)",
            display_hue(self.h),
            self.s.round() as i64,
            self.v.round() as i64
        )
    }
}

/// Hue in degrees `[0, 360)`, saturation and lightness in `[0, 100]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h: normalize_hue(h), s: s.clamp(0.0, 100.0), l: l.clamp(0.0, 100.0) }
    }

    pub fn to_rgb(self) -> Rgb {
        let s = self.s / 100.0;
        let l = self.l / 100.0;
        let a = s * l.min(1.0 - l);
        let f = |n: f64| {
            let k = (n + self.h / 30.0).rem_euclid(12.0);
            l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
        };
        Rgb::from_unit(f(0.0), f(8.0), f(4.0))
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            display_hue(self.h),
            self.s.round() as i64,
            self.l.round() as i64
        )
    }
}

/// Wraps any finite hue into `[0, 360)`. Non-finite input maps to 0.
#[inline]
pub fn normalize_hue(h: f64) -> f64 {
    if !h.is_finite() {
        return 0.0;
    }
    let h = h.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs.
    if h >= 360.0 { 0.0 } else { h }
}

fn display_hue(h: f64) -> i64 {
    (h.round() as i64) % 360
}

#[inline]
fn unit_to_u8(c: f64) -> u8 {
    if c.is_finite() { (c * 255.0).round().clamp(0.0, 255.0) as u8 } else { 0 }
}

pub fn hex_to_rgb(hex: &str) -> Result<Rgb, InvalidColorFormat> {
    Rgb::from_hex(hex)
}

pub fn rgb_to_hex(rgb: Rgb) -> String {
    rgb.to_hex()
}

pub fn hex_to_hsv(hex: &str) -> Result<Hsv, InvalidColorFormat> {
    Rgb::from_hex(hex).map(Rgb::to_hsv)
}

pub fn hsv_to_hex(hsv: Hsv) -> String {
    hsv.to_rgb().to_hex()
}

pub fn hsv_to_hsl(hsv: Hsv) -> Hsl {
    hsv.to_hsl()
}

pub fn hsl_to_hex(hsl: Hsl) -> String {
    hsl.to_rgb().to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within_one(a: Rgb, b: Rgb) -> bool {
        a.r.abs_diff(b.r) <= 1 && a.g.abs_diff(b.g) <= 1 && a.b.abs_diff(b.b) <= 1
    }

    // ── hex parsing ───────────────────────────────────────────────────────

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(hex_to_rgb("#FF8000").unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(hex_to_rgb("ff8000").unwrap(), Rgb::new(255, 128, 0));
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#", "#fff", "#ff80001", "#gg0000", "##ff8000", " ff8000", "#ff80é"] {
            assert!(hex_to_rgb(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn hex_round_trip_is_case_insensitive() {
        for hex in ["#000000", "#FFFFFF", "#12ab9F", "#7f7f7f", "#c0ffee"] {
            let back = rgb_to_hex(hex_to_rgb(hex).unwrap());
            assert!(back.eq_ignore_ascii_case(hex), "{hex} -> {back}");
        }
    }

    #[test]
    fn hex_round_trip_all_grey_and_primary_ramps() {
        for v in 0..=255u8 {
            for rgb in [Rgb::new(v, v, v), Rgb::new(v, 0, 0), Rgb::new(0, v, 255 - v)] {
                assert_eq!(hex_to_rgb(&rgb_to_hex(rgb)).unwrap(), rgb);
            }
        }
    }

    // ── HSV ───────────────────────────────────────────────────────────────

    #[test]
    fn achromatic_has_zero_hue_and_saturation() {
        let hsv = hex_to_hsv("#808080").unwrap();
        assert_eq!(hsv.h, 0.0);
        assert_eq!(hsv.s, 0.0);

        let black = hex_to_hsv("#000000").unwrap();
        assert_eq!(black.s, 0.0);
        assert_eq!(black.v, 0.0);
    }

    #[test]
    fn primary_hues() {
        assert_eq!(hex_to_hsv("#ff0000").unwrap().h, 0.0);
        assert_eq!(hex_to_hsv("#00ff00").unwrap().h, 120.0);
        assert_eq!(hex_to_hsv("#0000ff").unwrap().h, 240.0);
        // Magenta-ish reds produce a negative raw hue that must wrap.
        let h = hex_to_hsv("#ff0080").unwrap().h;
        assert!((0.0..360.0).contains(&h) && h > 300.0);
    }

    #[test]
    fn hsv_round_trip_within_one_per_channel() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..2000 {
            let rgb = Rgb::new(rng.u8(..), rng.u8(..), rng.u8(..));
            let back = hex_to_rgb(&hsv_to_hex(hex_to_hsv(&rgb_to_hex(rgb)).unwrap())).unwrap();
            assert!(within_one(rgb, back), "{rgb} -> {back}");
        }
    }

    #[test]
    fn hue_is_normalized() {
        assert_eq!(Hsv::new(360.0, 50.0, 50.0).h, 0.0);
        assert_eq!(Hsv::new(-90.0, 50.0, 50.0).h, 270.0);
        assert_eq!(Hsv::new(f64::NAN, 50.0, 50.0).h, 0.0);
        assert_eq!(hsv_to_hex(Hsv::new(720.0, 100.0, 100.0)), "#ff0000");
    }

    // ── HSL ───────────────────────────────────────────────────────────────

    #[test]
    fn hsl_extremes_have_zero_saturation() {
        assert_eq!(hsv_to_hsl(Hsv::new(200.0, 80.0, 0.0)).s, 0.0);
        assert_eq!(hsv_to_hsl(Hsv::new(200.0, 0.0, 100.0)).s, 0.0);
    }

    #[test]
    fn hsl_round_trip_through_hsv() {
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..2000 {
            let rgb = Rgb::new(rng.u8(..), rng.u8(..), rng.u8(..));
            let hsl = hsv_to_hsl(rgb.to_hsv());
            let back = hex_to_rgb(&hsl_to_hex(hsl)).unwrap();
            assert!(within_one(rgb, back), "{rgb} -> {back}");
        }
    }

    #[test]
    fn pure_red_hsl() {
        let hsl = hsv_to_hsl(hex_to_hsv("#ff0000").unwrap());
        assert_eq!((hsl.h, hsl.s.round(), hsl.l.round()), (0.0, 100.0, 50.0));
        assert_eq!(hsl.to_string(), "hsl(0, 100%, 50%)");
    }

    // ── lerp ──────────────────────────────────────────────────────────────

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Rgb::BLACK;
        let b = Rgb::WHITE;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(128, 128, 128));
        assert_eq!(a.lerp(b, f64::NAN), a);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Rgb::new(1, 2, 255)).unwrap();
        assert_eq!(json, "\"#0102ff\"");
        let back: Rgb = serde_json::from_str("\"#0102FF\"").unwrap();
        assert_eq!(back, Rgb::new(1, 2, 255));
        assert!(serde_json::from_str::<Rgb>("\"nope\"").is_err());
    }
}

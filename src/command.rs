//! Parameter parsing for the rounded-move command surface.
//!
//! A rounded move is one logical command with optional `X`, `Y`, `Z`
//! (default: current logical position), `F` (feed rate, 0 = inherit) and
//! `D` (deviation bound, default 0.0 = flush).

use crate::error::RoundedPathError;
use crate::vector::Vec3;

/// Parsed parameters of one rounded-move command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveParams {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub feed_rate: Option<f64>,
    pub max_deviation: Option<f64>,
}

impl MoveParams {
    /// Parse the argument portion of a command line, e.g.
    /// `"X10.5 Y-3 D0.4 F3000"`. Unrecognized words are ignored.
    pub fn parse(args: &str) -> Result<Self, RoundedPathError> {
        let mut params = MoveParams::default();
        for word in args.split_whitespace() {
            let Some(letter) = word.chars().next() else {
                continue;
            };
            let value: f64 = word[letter.len_utf8()..].parse().map_err(|e| {
                RoundedPathError::InvalidParameter {
                    word: word.to_string(),
                    reason: format!("{e}"),
                }
            })?;
            match letter.to_ascii_uppercase() {
                'X' => params.x = Some(value),
                'Y' => params.y = Some(value),
                'Z' => params.z = Some(value),
                'F' => params.feed_rate = Some(value),
                'D' => params.max_deviation = Some(value),
                _ => {}
            }
        }
        Ok(params)
    }

    /// Target position, with unspecified axes defaulting to `fallback`.
    pub fn resolve(&self, fallback: Vec3) -> Vec3 {
        [
            self.x.unwrap_or(fallback[0]),
            self.y.unwrap_or(fallback[1]),
            self.z.unwrap_or(fallback[2]),
        ]
    }

    /// Target position in relative mode: words are offsets from `base`,
    /// with unspecified axes moving by zero.
    pub fn resolve_relative(&self, base: Vec3) -> Vec3 {
        [
            base[0] + self.x.unwrap_or(0.0),
            base[1] + self.y.unwrap_or(0.0),
            base[2] + self.z.unwrap_or(0.0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_words() {
        let p = MoveParams::parse("X10.5 Y-3 Z0 F3000 D0.4").unwrap();
        assert_eq!(p.x, Some(10.5));
        assert_eq!(p.y, Some(-3.0));
        assert_eq!(p.z, Some(0.0));
        assert_eq!(p.feed_rate, Some(3000.0));
        assert_eq!(p.max_deviation, Some(0.4));
    }

    #[test]
    fn lowercase_letters_accepted() {
        let p = MoveParams::parse("x1 d0.2").unwrap();
        assert_eq!(p.x, Some(1.0));
        assert_eq!(p.max_deviation, Some(0.2));
    }

    #[test]
    fn unknown_words_ignored() {
        let p = MoveParams::parse("X1 E5 S200").unwrap();
        assert_eq!(p.x, Some(1.0));
        assert_eq!(p, MoveParams { x: Some(1.0), feed_rate: None, ..Default::default() });
    }

    #[test]
    fn bad_float_is_an_error() {
        let err = MoveParams::parse("Xabc").unwrap_err();
        assert!(matches!(
            err,
            crate::error::RoundedPathError::InvalidParameter { .. }
        ));
    }

    #[test]
    fn resolve_defaults_missing_axes() {
        let p = MoveParams::parse("Y2").unwrap();
        assert_eq!(p.resolve([5.0, 6.0, 7.0]), [5.0, 2.0, 7.0]);
    }

    #[test]
    fn resolve_relative_offsets_from_base() {
        let p = MoveParams::parse("X1 Z-2").unwrap();
        assert_eq!(p.resolve_relative([5.0, 6.0, 7.0]), [6.0, 6.0, 5.0]);
    }
}

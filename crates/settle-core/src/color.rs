//! CSS color handling.
//!
//! [`Color`] wraps `DynamicColor` from the color crate so configured and
//! dataset-provided color strings are validated before they reach a renderer.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A parsed CSS color
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parse a CSS color string such as `"#ff0000"`, `"rgb(255, 0, 0)"` or `"red"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use settle_core::color::Color;
    ///
    /// assert!(Color::new("#0a0a0f").is_ok());
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// Returns this color with the given alpha, clamped to `[0, 1]`
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            color: self.color.with_alpha(alpha.clamp(0.0, 1.0)),
        }
    }

    pub fn alpha(self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("steelblue").is_ok());

        let err = Color::new("not-a-color").unwrap_err();
        assert!(err.contains("not-a-color"));
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("#4e79a7").unwrap();
        assert!((color.alpha() - 1.0).abs() < 0.001);
        assert!((color.with_alpha(0.3).alpha() - 0.3).abs() < 0.001);
        assert!((color.with_alpha(4.0).alpha() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_color_display_round_trips() {
        let color = Color::new("#e15759").unwrap();
        let reparsed = Color::new(&color.to_string()).unwrap();
        assert_eq!(color.to_string(), reparsed.to_string());
    }
}

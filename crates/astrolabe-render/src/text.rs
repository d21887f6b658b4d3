//! Text layout flags, screen rectangles and approximate text metrics.

use bitflags::bitflags;
use glam::DVec2;

use crate::painter::Rgba;

bitflags! {
    /// Placement of a text relative to its anchor point.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Align: u8 {
        /// Text starts at the anchor and extends right.
        const LEFT = 1 << 0;
        const CENTER = 1 << 1;
        /// Text ends at the anchor.
        const RIGHT = 1 << 2;
        /// Text hangs below the anchor.
        const TOP = 1 << 3;
        const MIDDLE = 1 << 4;
        /// Text sits above the anchor.
        const BOTTOM = 1 << 5;
        const BASELINE = 1 << 6;
    }
}

bitflags! {
    /// Rendering effects applied to a text.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TextEffects: u8 {
        const UPPERCASE = 1 << 0;
        const BOLD = 1 << 1;
        /// Extra letter spacing.
        const SPACED = 1 << 2;
        /// Text may be hidden when it overlaps other texts.
        const FLOAT = 1 << 3;
        /// Honour line breaks.
        const MULTILINES = 1 << 4;
    }
}

/// Visual style of a text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Text height in window units.
    pub size: f64,
    pub color: Rgba,
    /// Screen rotation in radians.
    pub angle: f64,
    pub align: Align,
    pub effects: TextEffects,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 15.0,
            color: [1.0, 1.0, 1.0, 1.0],
            angle: 0.0,
            align: Align::CENTER | Align::BOTTOM,
            effects: TextEffects::empty(),
        }
    }
}

impl TextStyle {
    /// Approximate size of `text` on screen.
    pub fn measure(&self, text: &str) -> DVec2 {
        let lines: Vec<&str> = if self.effects.contains(TextEffects::MULTILINES) {
            text.split('\n').collect()
        } else {
            vec![text]
        };
        let mut advance = 0.55;
        if self.effects.contains(TextEffects::BOLD) {
            advance += 0.05;
        }
        let spacing = if self.effects.contains(TextEffects::SPACED) {
            0.15
        } else {
            0.0
        };
        let width = lines
            .iter()
            .map(|line| {
                let n = line.chars().count() as f64;
                n * advance * self.size + (n - 1.0).max(0.0) * spacing * self.size
            })
            .fold(0.0, f64::max);
        DVec2::new(width, lines.len() as f64 * self.size * 1.2)
    }

    /// Screen bounds of `text` anchored at `pos`.
    pub fn bounds(&self, text: &str, pos: DVec2) -> Rect {
        let size = self.measure(text);
        let x = if self.align.contains(Align::LEFT) {
            pos.x
        } else if self.align.contains(Align::RIGHT) {
            pos.x - size.x
        } else {
            pos.x - size.x / 2.0
        };
        let y = if self.align.contains(Align::TOP) {
            pos.y
        } else if self.align.contains(Align::BOTTOM) {
            pos.y - size.y
        } else if self.align.contains(Align::BASELINE) {
            pos.y - size.y * 0.8
        } else {
            pos.y - size.y / 2.0
        };
        Rect::new(DVec2::new(x, y), DVec2::new(x + size.x, y + size.y))
    }
}

/// Axis-aligned screen rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        min: DVec2::ZERO,
        max: DVec2::ZERO,
    };

    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Overlapping area of two rectangles, `None` if they only touch or
    /// are disjoint.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min.x >= max.x || min.y >= max.y {
            return None;
        }
        Some(Rect { min, max })
    }

    /// Distance from `p` to the rectangle, zero inside.
    pub fn distance_to(&self, p: DVec2) -> f64 {
        let center = (self.min + self.max) / 2.0;
        let half = DVec2::new(self.width(), self.height()) / 2.0;
        let d = ((p - center).abs() - half).max(DVec2::ZERO);
        d.length()
    }
}

/// Whether a language renders extra letter spacing.
///
/// Scripts without word spacing (Arabic, Chinese, Japanese, Korean) do not.
pub fn lang_supports_spacing(lang: &str) -> bool {
    !["ar", "zh", "ja", "ko"].iter().any(|p| lang.starts_with(p))
}

/// Greedy word wrap so that lines hold at most `max_chars` characters.
///
/// Words longer than `max_chars` get a line of their own. Returns the
/// wrapped text and the length of its longest line, in characters.
pub fn split_lines(text: &str, max_chars: usize) -> (String, usize) {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }
    if current_len > 0 {
        lines.push(current);
    }
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    (lines.join("\n"), longest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_short_text_untouched() {
        assert_eq!(split_lines("Orion", 15), ("Orion".to_string(), 5));
    }

    #[test]
    fn test_split_wraps_at_spaces() {
        let (text, longest) = split_lines("Triangulum Australe", 15);
        assert_eq!(text, "Triangulum\nAustrale");
        assert_eq!(longest, 10);
        let (text, longest) = split_lines("Canis Major", 15);
        assert_eq!(text, "Canis Major");
        assert_eq!(longest, 11);
    }

    #[test]
    fn test_split_long_word_kept_whole() {
        let (text, longest) = split_lines("Camelopardalis x", 5);
        assert_eq!(text, "Camelopardalis\nx");
        assert_eq!(longest, 14);
    }

    #[test]
    fn test_split_counts_characters_not_bytes() {
        let (_, longest) = split_lines("へびつかい座", 15);
        assert_eq!(longest, 6);
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(DVec2::new(0.0, 0.0), DVec2::new(10.0, 10.0));
        let b = Rect::new(DVec2::new(5.0, 8.0), DVec2::new(20.0, 20.0));
        let i = a.intersection(&b).unwrap();
        assert_eq!(i.width(), 5.0);
        assert_eq!(i.height(), 2.0);
        let c = Rect::new(DVec2::new(10.0, 0.0), DVec2::new(12.0, 5.0));
        assert!(a.intersection(&c).is_none());
        assert!(Rect::ZERO.intersection(&a).is_none());
    }

    #[test]
    fn test_rect_distance() {
        let r = Rect::new(DVec2::new(0.0, 0.0), DVec2::new(10.0, 10.0));
        assert_eq!(r.distance_to(DVec2::new(5.0, 5.0)), 0.0);
        assert_eq!(r.distance_to(DVec2::new(13.0, 14.0)), 5.0);
    }

    #[test]
    fn test_bounds_alignment() {
        let style = TextStyle {
            size: 10.0,
            align: Align::LEFT | Align::TOP,
            ..TextStyle::default()
        };
        let r = style.bounds("ab", DVec2::new(100.0, 50.0));
        assert_eq!(r.min, DVec2::new(100.0, 50.0));
        assert!((r.width() - 11.0).abs() < 1e-9);
        let centered = TextStyle {
            align: Align::CENTER | Align::MIDDLE,
            ..style
        };
        let r = centered.bounds("ab", DVec2::new(100.0, 50.0));
        assert!(((r.min + r.max) / 2.0 - DVec2::new(100.0, 50.0)).length() < 1e-9);
    }

    #[test]
    fn test_multiline_height() {
        let style = TextStyle {
            effects: TextEffects::MULTILINES,
            ..TextStyle::default()
        };
        let one = style.measure("ORION");
        let two = style.measure("TRIANGULUM\nAUSTRALE");
        assert!((two.y - 2.0 * one.y).abs() < 1e-9);
    }

    #[test]
    fn test_lang_spacing() {
        assert!(lang_supports_spacing("en"));
        assert!(lang_supports_spacing("fr-FR"));
        assert!(!lang_supports_spacing("ja"));
        assert!(!lang_supports_spacing("zh-Hant"));
    }
}

//! Dashboard color palette.

use crate::data::schema::{EXTROVERT, INTROVERT, PERSONALITY};
use crate::stats::CountTable;
use plotters::style::RGBColor;

pub const INTROVERT_COLOR: RGBColor = RGBColor(0xff, 0x99, 0x99);
pub const EXTROVERT_COLOR: RGBColor = RGBColor(0x66, 0xb3, 0xff);

/// Colors for labels outside the two-color palette.
pub const EXTRA_COLORS: [RGBColor; 6] = [
    RGBColor(46, 204, 113),  // Green
    RGBColor(155, 89, 182),  // Purple
    RGBColor(243, 156, 18),  // Orange
    RGBColor(26, 188, 156),  // Teal
    RGBColor(121, 85, 72),   // Brown
    RGBColor(96, 125, 139),  // Blue Grey
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub introvert: RGBColor,
    pub extrovert: RGBColor,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            introvert: INTROVERT_COLOR,
            extrovert: EXTROVERT_COLOR,
        }
    }
}

impl Palette {
    /// Color of a personality label; unknown labels take the extra colors by `fallback`.
    pub fn label_color(&self, label: &str, fallback: usize) -> RGBColor {
        match label {
            INTROVERT => self.introvert,
            EXTROVERT => self.extrovert,
            _ => EXTRA_COLORS[fallback % EXTRA_COLORS.len()],
        }
    }

    /// Colors for a sequence of personality labels. Unknown labels take the
    /// extra colors in order of appearance.
    pub fn label_colors<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> Vec<RGBColor> {
        let mut extra = 0;
        labels
            .into_iter()
            .map(|label| {
                let color = self.label_color(label, extra);
                if label != INTROVERT && label != EXTROVERT {
                    extra += 1;
                }
                color
            })
            .collect()
    }

    /// Slice colors for a pie, one per table entry in label order.
    ///
    /// Colors are assigned by position. The personality pie takes the pair
    /// introvert color first; the Yes/No pies take it extrovert color first.
    pub fn pie_colors(&self, table: &CountTable) -> Vec<RGBColor> {
        let pair = if table.field == PERSONALITY.name {
            [self.introvert, self.extrovert]
        } else {
            [self.extrovert, self.introvert]
        };

        (0..table.iter().count())
            .map(|i| match pair.get(i) {
                Some(&color) => color,
                None => EXTRA_COLORS[(i - pair.len()) % EXTRA_COLORS.len()],
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Aggregator;
    use polars::prelude::*;

    #[test]
    fn test_personality_pie_is_positional() {
        let df = df!("personality" => ["Introvert", "Extrovert", "Introvert"]).unwrap();
        let table = Aggregator::count(&df, "personality").unwrap();
        let palette = Palette::default();

        // Sorted labels are Extrovert, Introvert; the pair starts with the
        // introvert color, so the Extrovert slice is pink.
        assert_eq!(
            palette.pie_colors(&table),
            vec![INTROVERT_COLOR, EXTROVERT_COLOR]
        );
    }

    #[test]
    fn test_yes_no_pie_is_positional() {
        let df = df!("stage_fear" => ["Yes", "No", "Maybe"]).unwrap();
        let table = Aggregator::count(&df, "stage_fear").unwrap();
        let palette = Palette::default();

        assert_eq!(
            palette.pie_colors(&table),
            vec![EXTROVERT_COLOR, INTROVERT_COLOR, EXTRA_COLORS[0]]
        );
    }

    #[test]
    fn test_label_colors_in_stacking_order() {
        let palette = Palette::default();
        assert_eq!(
            palette.label_colors(["Introvert", "Extrovert", "Ambivert", "Omnivert"]),
            vec![INTROVERT_COLOR, EXTROVERT_COLOR, EXTRA_COLORS[0], EXTRA_COLORS[1]]
        );
    }

    #[test]
    fn test_unknown_labels_use_extra_colors() {
        let palette = Palette::default();
        assert_eq!(palette.label_color("Introvert", 3), INTROVERT_COLOR);
        assert_eq!(palette.label_color("Ambivert", 1), EXTRA_COLORS[1]);
        assert_eq!(palette.label_color("Ambivert", 7), EXTRA_COLORS[1]);
    }
}

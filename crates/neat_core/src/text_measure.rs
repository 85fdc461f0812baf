//! Text measurement
//!
//! Widgets that size themselves around labels need real label widths. A host
//! measures the labels a widget declares *after* the view has been committed,
//! then feeds the widths back before the next width target is computed.
//!
//! Without font access, [`EstimatedTextMeasurer`] gives a proportional-font
//! estimate and [`TableTextMeasurer`] lets callers pin exact widths.

use rustc_hash::FxHashMap;

/// Text layout options that affect measurement
#[derive(Debug, Clone)]
pub struct TextLayoutOptions {
    /// Extra spacing between letters in pixels
    pub letter_spacing: f32,
    /// Average advance per character, as a fraction of the font size
    pub char_advance: f32,
}

impl TextLayoutOptions {
    pub fn new() -> Self {
        Self {
            letter_spacing: 0.0,
            char_advance: 0.55,
        }
    }

    /// Set letter spacing
    pub fn with_letter_spacing(mut self, spacing: f32) -> Self {
        self.letter_spacing = spacing;
        self
    }

    /// Set the average character advance (in em)
    pub fn with_char_advance(mut self, advance: f32) -> Self {
        self.char_advance = advance;
        self
    }
}

impl Default for TextLayoutOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Text measurement result
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

/// Trait for measuring text dimensions
pub trait TextMeasurer: Send + Sync {
    /// Measure a single line of text
    fn measure_with_options(
        &self,
        text: &str,
        font_size: f32,
        options: &TextLayoutOptions,
    ) -> TextMetrics;

    /// Measure text with default options
    fn measure(&self, text: &str, font_size: f32) -> TextMetrics {
        self.measure_with_options(text, font_size, &TextLayoutOptions::new())
    }
}

/// A text measurer that uses per-character estimates
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure_with_options(
        &self,
        text: &str,
        font_size: f32,
        options: &TextLayoutOptions,
    ) -> TextMetrics {
        let char_count = text.chars().count() as f32;
        let base_width = char_count * font_size * options.char_advance;

        let letter_spacing_total = if char_count > 1.0 {
            (char_count - 1.0) * options.letter_spacing
        } else {
            0.0
        };

        TextMetrics {
            width: base_width + letter_spacing_total,
            height: font_size * 1.25,
        }
    }
}

/// A measurer with pinned widths for known labels
///
/// Labels missing from the table fall back to the estimate.
#[derive(Debug, Clone, Default)]
pub struct TableTextMeasurer {
    widths: FxHashMap<String, f32>,
    options: TextLayoutOptions,
}

impl TableTextMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the width of a label
    pub fn with_width(mut self, text: impl Into<String>, width: f32) -> Self {
        self.widths.insert(text.into(), width);
        self
    }

    /// Options used for labels that are not pinned
    pub fn with_options(mut self, options: TextLayoutOptions) -> Self {
        self.options = options;
        self
    }

    pub fn insert(&mut self, text: impl Into<String>, width: f32) {
        self.widths.insert(text.into(), width);
    }
}

impl TextMeasurer for TableTextMeasurer {
    fn measure_with_options(
        &self,
        text: &str,
        font_size: f32,
        options: &TextLayoutOptions,
    ) -> TextMetrics {
        match self.widths.get(text) {
            Some(&width) => TextMetrics {
                width,
                height: font_size * 1.25,
            },
            None => EstimatedTextMeasurer.measure_with_options(text, font_size, options),
        }
    }

    fn measure(&self, text: &str, font_size: f32) -> TextMetrics {
        self.measure_with_options(text, font_size, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_scales_with_length() {
        let m = EstimatedTextMeasurer;
        let short = m.measure("Failed", 16.0);
        let long = m.measure("Processing", 16.0);

        assert!((short.width - 6.0 * 16.0 * 0.55).abs() < 1e-4);
        assert!(long.width > short.width);
    }

    #[test]
    fn test_table_overrides_and_falls_back() {
        let m = TableTextMeasurer::new().with_width("Schedule", 70.0);

        assert_eq!(m.measure("Schedule", 16.0).width, 70.0);
        assert!((m.measure("Meeting", 16.0).width - 7.0 * 16.0 * 0.55).abs() < 1e-4);
    }
}

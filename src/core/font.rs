//! Display font size for the text area

use crate::core::config::EditorConfig;

/// Result of a font size adjustment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontChange {
    /// Size changed to the contained value
    Changed(f32),
    /// Size is already at the limit and stays at the contained value
    AtLimit(f32),
}

/// Bounded font size
#[derive(Debug, Clone, PartialEq)]
pub struct FontSize {
    current: f32,
    default: f32,
    min: f32,
    max: f32,
    step: f32,
}

impl FontSize {
    /// Build from editor settings. Out-of-order bounds are swapped and the
    /// sizes are clamped into range.
    pub fn from_config(config: &EditorConfig) -> Self {
        let (min, max) = if config.min_font_size <= config.max_font_size {
            (config.min_font_size, config.max_font_size)
        } else {
            (config.max_font_size, config.min_font_size)
        };
        let default = config.default_font_size.clamp(min, max);
        Self {
            current: config.font_size.clamp(min, max),
            default,
            min,
            max,
            step: config.font_step.abs().max(0.5),
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn increase(&mut self) -> FontChange {
        if self.current < self.max {
            self.current = (self.current + self.step).min(self.max);
            FontChange::Changed(self.current)
        } else {
            FontChange::AtLimit(self.current)
        }
    }

    pub fn decrease(&mut self) -> FontChange {
        if self.current > self.min {
            self.current = (self.current - self.step).max(self.min);
            FontChange::Changed(self.current)
        } else {
            FontChange::AtLimit(self.current)
        }
    }

    /// Restore the default size
    pub fn reset(&mut self) -> FontChange {
        self.current = self.default;
        FontChange::Changed(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_font() -> FontSize {
        FontSize::from_config(&EditorConfig::default())
    }

    #[test]
    fn test_increase_stops_at_max() {
        let mut font = default_font();
        assert_eq!(font.current(), 14.0);

        let mut last = font.increase();
        while let FontChange::Changed(_) = last {
            last = font.increase();
        }
        assert_eq!(last, FontChange::AtLimit(24.0));
        assert_eq!(font.current(), 24.0);
    }

    #[test]
    fn test_decrease_stops_at_min() {
        let mut font = default_font();
        assert_eq!(font.decrease(), FontChange::Changed(12.0));
        assert_eq!(font.decrease(), FontChange::Changed(10.0));
        assert_eq!(font.decrease(), FontChange::AtLimit(10.0));
    }

    #[test]
    fn test_step_is_clamped_to_bounds() {
        let config = EditorConfig {
            font_size: 23.0,
            ..EditorConfig::default()
        };
        let mut font = FontSize::from_config(&config);
        assert_eq!(font.increase(), FontChange::Changed(24.0));
    }

    #[test]
    fn test_reset_restores_default() {
        let mut font = default_font();
        font.increase();
        font.increase();
        assert_eq!(font.reset(), FontChange::Changed(14.0));
    }

    #[test]
    fn test_inverted_bounds_are_swapped() {
        let config = EditorConfig {
            min_font_size: 30.0,
            max_font_size: 8.0,
            font_size: 50.0,
            ..EditorConfig::default()
        };
        let font = FontSize::from_config(&config);
        assert_eq!(font.current(), 30.0);
    }
}

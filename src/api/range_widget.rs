use crate::core::TimeWindow;
use crate::error::{DashError, DashResult};

/// Dual-handle range-slider capability supplied by the host page.
pub trait RangeSelector {
    /// Moves the handles to `window` without emitting a new event.
    fn set_window(&mut self, window: TimeWindow);
}

/// Degraded substitute for a missing slider: two numeric text inputs and an
/// apply button.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FallbackRangeInputs {
    pub start_text: String,
    pub end_text: String,
}

impl FallbackRangeInputs {
    /// Parses the inputs into raw index bounds, clamped later by the controller.
    pub fn parse(&self) -> DashResult<(i64, i64)> {
        let parse = |field: &str, text: &str| {
            text.trim().parse::<i64>().map_err(|_| {
                DashError::InvalidData(format!("{field} index `{}` is not an integer", text.trim()))
            })
        };
        Ok((
            parse("start", &self.start_text)?,
            parse("end", &self.end_text)?,
        ))
    }
}

impl RangeSelector for FallbackRangeInputs {
    fn set_window(&mut self, window: TimeWindow) {
        self.start_text = window.start().to_string();
        self.end_text = window.end().to_string();
    }
}

/// Range-selection widget backing a session.
pub enum RangeWidget {
    Slider(Box<dyn RangeSelector>),
    TextInputs(FallbackRangeInputs),
}

impl RangeWidget {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::TextInputs(_))
    }

    pub fn set_window(&mut self, window: TimeWindow) {
        match self {
            Self::Slider(slider) => slider.set_window(window),
            Self::TextInputs(inputs) => inputs.set_window(window),
        }
    }

    #[must_use]
    pub fn text_inputs(&self) -> Option<&FallbackRangeInputs> {
        match self {
            Self::TextInputs(inputs) => Some(inputs),
            Self::Slider(_) => None,
        }
    }

    pub fn text_inputs_mut(&mut self) -> Option<&mut FallbackRangeInputs> {
        match self {
            Self::TextInputs(inputs) => Some(inputs),
            Self::Slider(_) => None,
        }
    }
}

impl std::fmt::Debug for RangeWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Slider(_) => f.write_str("RangeWidget::Slider"),
            Self::TextInputs(inputs) => f.debug_tuple("RangeWidget::TextInputs").field(inputs).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FallbackRangeInputs;

    #[test]
    fn fallback_inputs_parse_signed_integers() {
        let inputs = FallbackRangeInputs {
            start_text: " -3".to_owned(),
            end_text: "40".to_owned(),
        };
        assert_eq!(inputs.parse().expect("bounds"), (-3, 40));
    }

    #[test]
    fn fallback_inputs_reject_text() {
        let inputs = FallbackRangeInputs {
            start_text: "a".to_owned(),
            end_text: "4".to_owned(),
        };
        assert!(inputs.parse().is_err());
    }
}

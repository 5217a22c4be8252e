use serde::{Deserialize, Serialize};

use crate::core::TimeWindow;

/// Textual "from / to / count" readout refreshed on every range event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RangeDisplay {
    pub from_label: String,
    pub to_label: String,
    pub point_count: usize,
}

impl RangeDisplay {
    #[must_use]
    pub fn for_window(time_labels: &[String], window: TimeWindow, max_chars: usize) -> Self {
        Self {
            from_label: display_label(time_labels, window.start(), max_chars),
            to_label: display_label(time_labels, window.end(), max_chars),
            point_count: window.len(),
        }
    }
}

fn display_label(time_labels: &[String], index: usize, max_chars: usize) -> String {
    match time_labels.get(index) {
        Some(label) => truncate_chars(label, max_chars),
        None => truncate_chars(&format!("Index {index}"), max_chars),
    }
}

/// Label shown on a slider handle: a label prefix, or the bare index.
#[must_use]
pub fn slider_tooltip(time_labels: &[String], index: usize, max_chars: usize) -> String {
    match time_labels.get(index) {
        Some(label) => truncate_chars(label, max_chars),
        None => index.to_string(),
    }
}

pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::{RangeDisplay, slider_tooltip};
    use crate::core::TimeWindow;

    fn labels() -> Vec<String> {
        vec![
            "2024-01-01 00:00:00".to_owned(),
            "2024-01-01 01:00:00".to_owned(),
        ]
    }

    #[test]
    fn display_truncates_and_falls_back_to_index() {
        let window = TimeWindow::new(1, 5).expect("window");
        let display = RangeDisplay::for_window(&labels(), window, 16);
        assert_eq!(display.from_label, "2024-01-01 01:00");
        assert_eq!(display.to_label, "Index 5");
        assert_eq!(display.point_count, 5);
    }

    #[test]
    fn slider_tooltip_uses_date_prefix() {
        assert_eq!(slider_tooltip(&labels(), 0, 10), "2024-01-01");
        assert_eq!(slider_tooltip(&labels(), 7, 10), "7");
    }
}

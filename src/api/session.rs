use std::time::Instant;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{ChartData, Dataset, HeatmapPoint, TimeWindow, ValueBounds, filter_chart};
use crate::error::{DashError, DashResult};
use crate::render::{ChartHost, ChartSurface, build_chart_spec, heatmap_tooltip};

use super::config::DashboardConfig;
use super::debounce::TrailingDebouncer;
use super::diagnostics::{Diagnostic, DiagnosticKind};
use super::range_controller::{RangeController, RangeDecision};
use super::range_display::{RangeDisplay, slider_tooltip};
use super::range_widget::{FallbackRangeInputs, RangeSelector, RangeWidget};
use super::value_range::{ValueRangeControl, format_bound, parse_value_bounds};

/// Range-selection event delivered by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeEvent {
    /// Handle still moving.
    Drag { start: i64, end: i64 },
    /// Drag finished, keyboard step, or any other discrete selection.
    Commit { start: i64, end: i64 },
}

/// Everything one loaded dashboard page owns.
///
/// Built once per load by [`DashboardSession::init`]; dropping it is teardown.
pub struct DashboardSession<S: ChartSurface> {
    dataset: Dataset,
    config: DashboardConfig,
    controller: RangeController,
    display: Option<RangeDisplay>,
    surfaces: IndexMap<String, S>,
    value_overrides: IndexMap<String, ValueBounds>,
    widget: RangeWidget,
    resize: TrailingDebouncer,
    diagnostics: Vec<Diagnostic>,
    /// Surfaces whose last update failed; a fault streak is diagnosed once.
    faulted: IndexSet<String>,
    render_passes: u64,
}

impl<S: ChartSurface> DashboardSession<S> {
    /// Mounts every valid chart, selects the default window and draws it.
    ///
    /// Only an invalid `config` is an error. Bad chart definitions, missing
    /// mount points, a missing charting engine or a missing slider are
    /// recorded as diagnostics and the rest of the dashboard still starts.
    pub fn init<H>(
        dataset: Dataset,
        config: DashboardConfig,
        host: &mut H,
        slider: Option<Box<dyn RangeSelector>>,
    ) -> DashResult<Self>
    where
        H: ChartHost<Surface = S>,
    {
        config.validate()?;
        let mut diagnostics = Vec::new();

        let invalid: Vec<String> = dataset
            .invalid_charts()
            .into_iter()
            .map(|(chart_id, err)| {
                warn!(chart_id = %chart_id, error = %err, "skipping misaligned chart");
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::InvalidChart,
                    chart_id.as_str(),
                    err.to_string(),
                ));
                chart_id
            })
            .collect();

        let mut surfaces = IndexMap::new();
        for (chart_id, _) in dataset.charts() {
            if invalid.iter().any(|id| id == chart_id) {
                continue;
            }
            match host.mount(chart_id) {
                Ok(surface) => {
                    debug!(chart_id, "mounted chart surface");
                    surfaces.insert(chart_id.to_owned(), surface);
                }
                Err(err @ DashError::MissingDependency(_)) => {
                    warn!(error = %err, "charting engine unavailable, no charts mounted");
                    diagnostics.push(Diagnostic::from_error("charting engine", &err));
                    break;
                }
                Err(err) => {
                    warn!(chart_id, error = %err, "failed to mount chart");
                    diagnostics.push(Diagnostic::from_error(chart_id, &err));
                }
            }
        }

        let widget = match slider {
            Some(slider) => RangeWidget::Slider(slider),
            None => {
                warn!("range slider unavailable, using text inputs");
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::MissingDependency,
                    "range slider",
                    "range slider widget not loaded; falling back to text inputs",
                ));
                RangeWidget::TextInputs(FallbackRangeInputs::default())
            }
        };

        let controller = RangeController::new(
            dataset.total_points(),
            config.default_window_points,
            config.busy_policy,
        );

        let mut session = Self {
            dataset,
            config,
            controller,
            display: None,
            surfaces,
            value_overrides: IndexMap::new(),
            widget,
            resize: TrailingDebouncer::new(config.resize_debounce()),
            diagnostics,
            faulted: IndexSet::new(),
            render_passes: 0,
        };

        if let Some(window) = session.controller.current_window() {
            session.widget.set_window(window);
        }
        let decision = session.controller.request_current();
        session.settle(decision);

        info!(
            total_points = session.dataset.total_points(),
            charts = session.surfaces.len(),
            diagnostics = session.diagnostics.len(),
            "dashboard session initialized"
        );
        Ok(session)
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn config(&self) -> DashboardConfig {
        self.config
    }

    #[must_use]
    pub fn controller(&self) -> &RangeController {
        &self.controller
    }

    #[must_use]
    pub fn current_window(&self) -> Option<TimeWindow> {
        self.controller.current_window()
    }

    #[must_use]
    pub fn display(&self) -> Option<&RangeDisplay> {
        self.display.as_ref()
    }

    /// Number of completed full render passes over all mounted charts.
    #[must_use]
    pub fn render_passes(&self) -> u64 {
        self.render_passes
    }

    #[must_use]
    pub fn surface(&self, chart_id: &str) -> Option<&S> {
        self.surfaces.get(chart_id)
    }

    pub fn mounted_chart_ids(&self) -> impl Iterator<Item = &str> {
        self.surfaces.keys().map(String::as_str)
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    #[must_use]
    pub fn widget(&self) -> &RangeWidget {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut RangeWidget {
        &mut self.widget
    }

    #[must_use]
    pub fn value_override(&self, chart_id: &str) -> Option<ValueBounds> {
        self.value_overrides.get(chart_id).copied()
    }

    pub(crate) fn value_overrides(&self) -> &IndexMap<String, ValueBounds> {
        &self.value_overrides
    }

    pub fn handle(&mut self, event: RangeEvent) -> RangeDecision {
        match event {
            RangeEvent::Drag { start, end } => self.drag_window(start, end),
            RangeEvent::Commit { start, end } => self.request_window(start, end),
        }
    }

    /// Continuous drag: refreshes the range display only.
    pub fn drag_window(&mut self, start: i64, end: i64) -> RangeDecision {
        let decision = self.controller.drag(start, end);
        self.settle(decision);
        decision
    }

    /// Discrete selection: refreshes the display and re-renders every chart
    /// unless the window is already drawn or a pass is in flight.
    pub fn request_window(&mut self, start: i64, end: i64) -> RangeDecision {
        let decision = self.controller.request_window(start, end);
        self.settle(decision);
        decision
    }

    /// Selects the whole dataset and moves the widget handles to match.
    pub fn reset_window(&mut self) -> RangeDecision {
        let Some(full) = self.controller.full_window() else {
            return RangeDecision::Rejected;
        };
        self.widget.set_window(full);
        self.request_window(full.start() as i64, full.end() as i64)
    }

    /// Applies the fallback text inputs, when the session runs without a slider.
    pub fn apply_text_inputs(&mut self) -> DashResult<RangeDecision> {
        let Some(inputs) = self.widget.text_inputs() else {
            return Err(DashError::InvalidData(
                "range slider is active; text inputs are not in use".to_owned(),
            ));
        };
        match inputs.parse() {
            Ok((start, end)) => {
                let decision = self.request_window(start, end);
                if let Some(window) = decision.window() {
                    self.widget.set_window(window);
                }
                Ok(decision)
            }
            Err(err) => {
                warn!(error = %err, "ignoring malformed range inputs");
                self.diagnostics
                    .push(Diagnostic::new(DiagnosticKind::MalformedInput, "range inputs", err.to_string()));
                Err(err)
            }
        }
    }

    /// Text for a slider handle positioned at `index`.
    #[must_use]
    pub fn slider_tooltip(&self, index: usize) -> String {
        slider_tooltip(
            self.dataset.time_labels(),
            index,
            self.config.slider_label_chars,
        )
    }

    /// Sets explicit value bounds for one chart and redraws only that chart.
    ///
    /// Unparsable input leaves the chart untouched and is returned as
    /// `InvalidValueRange` so the host can surface it.
    pub fn apply_value_range(
        &mut self,
        chart_id: &str,
        min_text: &str,
        max_text: &str,
    ) -> DashResult<()> {
        if !self.surfaces.contains_key(chart_id) {
            return Err(DashError::UnknownChart(chart_id.to_owned()));
        }
        let bounds = match parse_value_bounds(min_text, max_text) {
            Ok(bounds) => bounds,
            Err(err) => {
                warn!(chart_id, error = %err, "ignoring malformed value range");
                self.diagnostics
                    .push(Diagnostic::new(DiagnosticKind::MalformedInput, chart_id, err.to_string()));
                return Err(err);
            }
        };
        self.value_overrides.insert(chart_id.to_owned(), bounds);
        debug!(chart_id, min = bounds.min, max = bounds.max, "value range applied");
        self.redraw_chart(chart_id);
        Ok(())
    }

    /// Applies the chart's full data range and returns the input texts to show.
    pub fn reset_value_range(&mut self, chart_id: &str) -> DashResult<(String, String)> {
        let chart = self
            .dataset
            .chart(chart_id)
            .ok_or_else(|| DashError::UnknownChart(chart_id.to_owned()))?;
        let min_text = format_bound(chart.stats.min);
        let max_text = format_bound(chart.stats.max);
        self.apply_value_range(chart_id, &min_text, &max_text)?;
        Ok((min_text, max_text))
    }

    /// Drops any user bounds so the chart falls back to config or data range.
    pub fn clear_value_range(&mut self, chart_id: &str) -> DashResult<()> {
        if !self.surfaces.contains_key(chart_id) {
            return Err(DashError::UnknownChart(chart_id.to_owned()));
        }
        if self.value_overrides.shift_remove(chart_id).is_some() {
            self.redraw_chart(chart_id);
        }
        Ok(())
    }

    /// Value-range controls for every mounted chart that shows them.
    #[must_use]
    pub fn value_range_controls(&self) -> Vec<ValueRangeControl> {
        self.surfaces
            .keys()
            .filter_map(|chart_id| {
                let chart = self.dataset.chart(chart_id)?;
                ValueRangeControl::for_chart(chart_id, chart, self.config.control_title_chars)
            })
            .collect()
    }

    /// Tooltip text for a cell of a rendered heatmap.
    #[must_use]
    pub fn heatmap_tooltip(&self, chart_id: &str, point: HeatmapPoint) -> Option<String> {
        let window = self.controller.last_applied_window()?;
        match &self.dataset.chart(chart_id)?.data {
            ChartData::Heatmap { columns, .. } => Some(heatmap_tooltip(
                self.dataset.time_labels(),
                columns,
                window,
                point,
            )),
            ChartData::Line { .. } => None,
        }
    }

    /// Records a viewport resize; canvases resize once the burst settles.
    pub fn on_resize(&mut self, now: Instant) {
        self.resize.trigger(now);
    }

    /// Drives timers. Returns `true` when a debounced resize ran.
    pub fn poll_timers(&mut self, now: Instant) -> bool {
        if !self.resize.poll(now) {
            return false;
        }
        for (chart_id, surface) in &mut self.surfaces {
            let result = surface.resize();
            note_surface_result(&mut self.diagnostics, &mut self.faulted, chart_id, result);
        }
        debug!(charts = self.surfaces.len(), "resized chart surfaces");
        true
    }

    fn settle(&mut self, decision: RangeDecision) {
        if let Some(window) = decision.window() {
            self.display = Some(RangeDisplay::for_window(
                self.dataset.time_labels(),
                window,
                self.config.range_label_chars,
            ));
        }
        if let RangeDecision::Render(window) = decision {
            self.run_render_passes(window);
        }
    }

    fn run_render_passes(&mut self, first: TimeWindow) {
        let mut window = first;
        loop {
            self.render_all(window);
            match self.controller.finish_render() {
                Some(next) => window = next,
                None => break,
            }
        }
    }

    fn render_all(&mut self, window: TimeWindow) {
        let labels = self.dataset.time_labels();
        for (chart_id, surface) in &mut self.surfaces {
            let Some(chart) = self.dataset.chart(chart_id) else {
                continue;
            };
            let slice = filter_chart(chart, labels, window);
            let spec = build_chart_spec(chart, &slice, self.value_overrides.get(chart_id).copied());
            let result = surface.set_option(&spec);
            note_surface_result(&mut self.diagnostics, &mut self.faulted, chart_id, result);
        }
        self.render_passes += 1;
        debug!(
            start = window.start(),
            end = window.end(),
            charts = self.surfaces.len(),
            "rendered window"
        );
    }

    fn redraw_chart(&mut self, chart_id: &str) {
        let Some(window) = self.controller.last_applied_window() else {
            return;
        };
        let (Some(chart), Some(surface)) =
            (self.dataset.chart(chart_id), self.surfaces.get_mut(chart_id))
        else {
            return;
        };
        let slice = filter_chart(chart, self.dataset.time_labels(), window);
        let spec = build_chart_spec(chart, &slice, self.value_overrides.get(chart_id).copied());
        let result = surface.set_option(&spec);
        note_surface_result(&mut self.diagnostics, &mut self.faulted, chart_id, result);
    }
}

/// Records the first failure of a fault streak; a success ends the streak.
fn note_surface_result(
    diagnostics: &mut Vec<Diagnostic>,
    faulted: &mut IndexSet<String>,
    chart_id: &str,
    result: DashResult<()>,
) {
    match result {
        Ok(()) => {
            faulted.shift_remove(chart_id);
        }
        Err(err) if faulted.insert(chart_id.to_owned()) => {
            warn!(chart_id, error = %err, "chart surface update failed");
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::RenderFault,
                chart_id,
                err.to_string(),
            ));
        }
        Err(err) => {
            debug!(chart_id, error = %err, "chart surface still failing");
        }
    }
}

impl<S: ChartSurface> std::fmt::Debug for DashboardSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardSession")
            .field("total_points", &self.dataset.total_points())
            .field("charts", &self.surfaces.len())
            .field("controller", &self.controller)
            .field("render_passes", &self.render_passes)
            .finish_non_exhaustive()
    }
}

use std::collections::HashSet;

use crate::error::{DashError, DashResult};

use super::spec::ChartSpec;

/// One mounted canvas owned by the external charting engine.
pub trait ChartSurface {
    /// Replaces the declarative option object and redraws.
    fn set_option(&mut self, spec: &ChartSpec) -> DashResult<()>;

    /// Re-measures the mount point and resizes the canvas.
    fn resize(&mut self) -> DashResult<()>;
}

/// External charting capability: creates surfaces on named mount points.
pub trait ChartHost {
    type Surface: ChartSurface;

    /// Initializes a canvas on the mount point named `chart_id`.
    ///
    /// Fails with `MissingElement` when the mount point does not exist and
    /// `MissingDependency` when the charting engine itself is unavailable.
    fn mount(&mut self, chart_id: &str) -> DashResult<Self::Surface>;
}

/// Headless surface used by tests and by tools that only need chart specs.
///
/// It serializes every spec it receives so invalid option objects surface
/// the same way a real engine would reject them.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub chart_id: String,
    pub set_option_count: usize,
    pub resize_count: usize,
    pub last_spec: Option<ChartSpec>,
    fail_renders: bool,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(chart_id: impl Into<String>) -> Self {
        Self {
            chart_id: chart_id.into(),
            ..Self::default()
        }
    }

    /// Makes every subsequent `set_option` fail, emulating a faulting canvas.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail_renders = true;
        self
    }
}

impl ChartSurface for RecordingSurface {
    fn set_option(&mut self, spec: &ChartSpec) -> DashResult<()> {
        if self.fail_renders {
            return Err(DashError::InvalidData(format!(
                "canvas `{}` rejected option update",
                self.chart_id
            )));
        }
        spec.to_json_value()?;
        self.set_option_count += 1;
        self.last_spec = Some(spec.clone());
        Ok(())
    }

    fn resize(&mut self) -> DashResult<()> {
        self.resize_count += 1;
        Ok(())
    }
}

/// Headless host; mount points can be removed or made faulty per chart id.
#[derive(Debug, Default)]
pub struct RecordingHost {
    missing: HashSet<String>,
    faulty: HashSet<String>,
    engine_unavailable: bool,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn without_mount(mut self, chart_id: impl Into<String>) -> Self {
        self.missing.insert(chart_id.into());
        self
    }

    #[must_use]
    pub fn with_faulty_mount(mut self, chart_id: impl Into<String>) -> Self {
        self.faulty.insert(chart_id.into());
        self
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            engine_unavailable: true,
            ..Self::default()
        }
    }
}

impl ChartHost for RecordingHost {
    type Surface = RecordingSurface;

    fn mount(&mut self, chart_id: &str) -> DashResult<Self::Surface> {
        if self.engine_unavailable {
            return Err(DashError::MissingDependency(
                "charting engine not loaded".to_owned(),
            ));
        }
        if self.missing.contains(chart_id) {
            return Err(DashError::MissingElement(chart_id.to_owned()));
        }
        let surface = RecordingSurface::new(chart_id);
        if self.faulty.contains(chart_id) {
            return Ok(surface.failing());
        }
        Ok(surface)
    }
}

// src/gui/view.rs
//
// What one area tab shows, derived from the session and the tab's state.
// Rebuilt whenever the selection or display options change; drawing code
// only reads it.

use crate::{
    config::consts::{CHART_WINDOW_MONTHS, CHART_Y_MARGIN},
    config::options::Area,
    config::state::PanelState,
    navigator::Step,
    session::Session,
    table::SeriesTable,
    transform,
};

#[derive(Clone, Debug, Default)]
pub struct PanelView {
    /// Root first. A failed descent stops here; earlier levels stay usable.
    pub steps: Vec<Step>,
    /// Transformed table of the last good step.
    pub shown: SeriesTable,
    /// Axis label of the active display mode
    pub label: &'static str,
    /// Integrity or selection failure for this panel only.
    pub error: Option<String>,
}

impl PanelView {
    pub fn build(session: &Session, area: Area, panel: &mut PanelState) -> Self {
        let label = panel.display.mode().label();
        let nav = match session.navigator(area) {
            Ok(nav) => nav,
            Err(e) => return Self { label, error: Some(e.to_string()), ..Self::default() },
        };

        let mut steps = Vec::with_capacity(panel.choices.len() + 1);
        let mut error = None;
        match nav.root() {
            Ok(root) => steps.push(root),
            Err(e) => error = Some(e.to_string()),
        }

        let mut kept = 0;
        for choice in &panel.choices {
            let Some(prev) = steps.last() else { break };
            match nav.descend(prev, choice) {
                Ok(step) => {
                    steps.push(step);
                    kept += 1;
                }
                Err(e) => {
                    loge!("UI: {} selection {} failed: {}", area, choice, e);
                    error = Some(e.to_string());
                    break;
                }
            }
        }
        // Drop choices past the first failure so the combo chain matches.
        panel.choices.truncate(kept);

        let shown = steps
            .last()
            .map(|s| transform::apply(&s.table, panel.display.mode()))
            .unwrap_or_default();

        Self { steps, shown, label, error }
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// "{item} の価格指数({mode})" for the selected item.
    pub fn title(&self) -> Option<String> {
        self.last().map(|s| format!("{} の価格指数({})", s.item(), self.label))
    }

    /// First row of `shown` the chart draws.
    pub fn window_start(&self, full_history: bool) -> usize {
        if full_history { 0 } else { self.shown.len().saturating_sub(CHART_WINDOW_MONTHS) }
    }

    /// Percent y-range over rows `from..`, each end pushed out by
    /// `CHART_Y_MARGIN` of its magnitude. Anything narrower than one point is
    /// opened to one point around its middle.
    pub fn y_range(&self, from: usize) -> Option<(f64, f64)> {
        let (lo, hi) = self.shown.value_range_from(from)?;
        let (lo, hi) = (lo * 100.0, hi * 100.0);
        let (lo, hi) = (lo - lo.abs() * CHART_Y_MARGIN, hi + hi.abs() * CHART_Y_MARGIN);
        if hi - lo < 1.0 {
            let mid = (lo + hi) / 2.0;
            return Some((mid - 0.5, mid + 0.5));
        }
        Some((lo, hi))
    }
}

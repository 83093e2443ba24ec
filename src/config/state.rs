// src/config/state.rs
use super::options::{AppOptions, Area, DisplayOptions};

/// Per-tab drill-down state. `choices` are the picks below the root item.
#[derive(Clone, Debug, Default)]
pub struct PanelState {
    pub choices: Vec<String>,
    pub display: DisplayOptions,
    /// Show the numeric table under the chart
    pub show_table: bool,
    /// Chart every month instead of the latest `CHART_WINDOW_MONTHS`
    pub full_history: bool,
}

#[derive(Clone, Debug)]
pub struct GuiState {
    pub window_w: u32,
    pub window_h: u32,

    /// Active tab
    pub area: Area,

    pub national: PanelState,
    pub tokyo: PanelState,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            window_w: 900,
            window_h: 900,
            area: Area::National,
            national: PanelState::default(),
            tokyo: PanelState::default(),
        }
    }
}

impl GuiState {
    pub fn panel(&self, area: Area) -> &PanelState {
        match area {
            Area::National => &self.national,
            Area::Tokyo => &self.tokyo,
        }
    }

    pub fn panel_mut(&mut self, area: Area) -> &mut PanelState {
        match area {
            Area::National => &mut self.national,
            Area::Tokyo => &mut self.tokyo,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::datasets::{SCALABILITY, ScalabilityPoint};

/// Dimension selected when the scalability view first opens (4096 features).
pub const DEFAULT_SCALABILITY_INDEX: usize = 2;

/// Top-level navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardSection {
    #[default]
    Overview,
    Comparison,
    Training,
    Deployment,
    About,
}

impl DashboardSection {
    /// Navigation order.
    pub const ALL: [DashboardSection; 5] = [
        DashboardSection::Overview,
        DashboardSection::Comparison,
        DashboardSection::Training,
        DashboardSection::Deployment,
        DashboardSection::About,
    ];

    pub fn id(self) -> &'static str {
        match self {
            DashboardSection::Overview => "overview",
            DashboardSection::Comparison => "comparison",
            DashboardSection::Training => "training",
            DashboardSection::Deployment => "deployment",
            DashboardSection::About => "about",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DashboardSection::Overview => "Dashboard",
            DashboardSection::Comparison => "Model Comparison",
            DashboardSection::Training => "Training Results",
            DashboardSection::Deployment => "Edge Deployment",
            DashboardSection::About => "About",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.id() == id)
    }

    /// True for the page that hosts the live monitor.
    pub fn hosts_live_monitor(self) -> bool {
        self == DashboardSection::Deployment
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DashboardError {
    #[error("Unknown dashboard section `{0}`")]
    UnknownSection(String),
    #[error("Scalability index {index} out of range (max {max})")]
    ScalabilityIndexOutOfRange { index: usize, max: usize },
}

/// Navigation and selection state driven by user intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    active_section: DashboardSection,
    scalability_index: usize,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            active_section: DashboardSection::default(),
            scalability_index: DEFAULT_SCALABILITY_INDEX,
        }
    }
}

impl DashboardState {
    pub fn active_section(&self) -> DashboardSection {
        self.active_section
    }

    /// Switch pages. Returns true when the section actually changed.
    pub fn select_section(&mut self, section: DashboardSection) -> bool {
        let changed = self.active_section != section;
        self.active_section = section;
        changed
    }

    pub fn select_section_by_id(&mut self, id: &str) -> Result<bool, DashboardError> {
        let section = DashboardSection::from_id(id)
            .ok_or_else(|| DashboardError::UnknownSection(id.to_string()))?;
        Ok(self.select_section(section))
    }

    pub fn scalability_index(&self) -> usize {
        self.scalability_index
    }

    /// Pick a row of the scalability table; out-of-range indices leave the
    /// selection untouched.
    pub fn select_scalability_dimension(
        &mut self,
        index: usize,
    ) -> Result<&'static ScalabilityPoint, DashboardError> {
        let point = SCALABILITY
            .get(index)
            .ok_or(DashboardError::ScalabilityIndexOutOfRange {
                index,
                max: SCALABILITY.len() - 1,
            })?;
        self.scalability_index = index;
        Ok(point)
    }

    pub fn current_dimension(&self) -> &'static ScalabilityPoint {
        &SCALABILITY[self.scalability_index.min(SCALABILITY.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_overview_at_4096_features() {
        let state = DashboardState::default();
        assert_eq!(state.active_section(), DashboardSection::Overview);
        assert_eq!(state.scalability_index(), 2);
        assert_eq!(state.current_dimension().dim, 4096);
    }

    #[test]
    fn section_ids_round_trip_in_nav_order() {
        let ids: Vec<_> = DashboardSection::ALL.iter().map(|s| s.id()).collect();
        assert_eq!(ids, ["overview", "comparison", "training", "deployment", "about"]);
        for section in DashboardSection::ALL {
            assert_eq!(DashboardSection::from_id(section.id()), Some(section));
        }
        assert_eq!(DashboardSection::from_id("settings"), None);
        assert_eq!(DashboardSection::Overview.label(), "Dashboard");
        assert!(DashboardSection::Deployment.hosts_live_monitor());
    }

    #[test]
    fn selecting_sections_reports_changes() {
        let mut state = DashboardState::default();
        assert!(!state.select_section(DashboardSection::Overview));
        assert_eq!(state.select_section_by_id("deployment"), Ok(true));
        assert_eq!(state.active_section(), DashboardSection::Deployment);
        assert_eq!(
            state.select_section_by_id("nope"),
            Err(DashboardError::UnknownSection("nope".into()))
        );
        assert_eq!(state.active_section(), DashboardSection::Deployment);
    }

    #[test]
    fn scalability_selection_is_bounded() {
        let mut state = DashboardState::default();
        assert_eq!(state.select_scalability_dimension(3).unwrap().dim, 8192);
        assert_eq!(
            state.select_scalability_dimension(4),
            Err(DashboardError::ScalabilityIndexOutOfRange { index: 4, max: 3 })
        );
        assert_eq!(state.scalability_index(), 3);
        assert_eq!(state.select_scalability_dimension(0).unwrap().dim, 1024);
    }
}

//! Serializable snapshot of a linked graph for report renderers and UIs.

use crate::graph::{ContextGraph, ControlRef};
use serde::Serialize;

/// `(profile, control id)` pair identifying one control layer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ControlKey {
    pub profile: String,
    pub id: String,
}

impl ControlKey {
    fn of(control: &ControlRef<'_, '_>) -> Self {
        Self {
            profile: control.sourced_from().name().to_string(),
            id: control.id().to_string(),
        }
    }
}

impl std::fmt::Display for ControlKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.profile, self.id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub name: String,
    pub extends_from: Vec<String>,
    pub extended_by: Vec<String>,
    pub control_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ControlSummary {
    #[serde(flatten)]
    pub key: ControlKey,
    pub root: ControlKey,
    pub depth: usize,
    pub is_redundant: bool,
    pub has_results: bool,
    pub extends_from: Vec<ControlKey>,
    pub extended_by: Vec<ControlKey>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct GraphStats {
    pub profiles: usize,
    pub controls: usize,
    /// Controls with at least one `extends_from` edge.
    pub linked: usize,
    pub redundant: usize,
    pub roots: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphSummary {
    pub stats: GraphStats,
    pub profiles: Vec<ProfileSummary>,
    pub controls: Vec<ControlSummary>,
}

impl GraphSummary {
    pub fn from_graph(graph: &ContextGraph<'_>) -> Self {
        let profiles = graph
            .profiles()
            .map(|p| ProfileSummary {
                name: p.name().to_string(),
                extends_from: p.extends_from().map(|q| q.name().to_string()).collect(),
                extended_by: p.extended_by().map(|q| q.name().to_string()).collect(),
                control_count: p.controls().count(),
            })
            .collect();

        let controls: Vec<ControlSummary> = graph
            .controls()
            .map(|c| ControlSummary {
                key: ControlKey::of(&c),
                root: ControlKey::of(&c.root()),
                depth: c.depth(),
                is_redundant: c.is_redundant(),
                has_results: c.data().has_results(),
                extends_from: c.extends_from().map(|a| ControlKey::of(&a)).collect(),
                extended_by: c.extended_by().map(|d| ControlKey::of(&d)).collect(),
            })
            .collect();

        let stats = GraphStats {
            profiles: graph.profile_count(),
            controls: controls.len(),
            linked: controls.iter().filter(|c| !c.extends_from.is_empty()).count(),
            redundant: controls.iter().filter(|c| c.is_redundant).count(),
            roots: controls.iter().filter(|c| c.depth == 0).count(),
        };

        Self {
            stats,
            profiles,
            controls,
        }
    }
}

//! Wrapper arena for contextualized profiles and controls.
//!
//! ```text
//! ContextGraph<'a>
//!   ├─ profiles: Vec<ProfileNode<'a>>   (ProfileId = index)
//!   │    ├─ data         &'a Profile
//!   │    ├─ controls     Vec<ControlId>      owns (by index)
//!   │    └─ extends_from / extended_by       Vec<ProfileId>
//!   └─ controls: Vec<ControlNode<'a>>   (ControlId = index, flat-list order)
//!        ├─ data         &'a Control
//!        ├─ sourced_from ProfileId           back-reference
//!        └─ extends_from / extended_by       Vec<ControlId>
//! ```
//!
//! Overlay edges are plain indices into the arena, so the mutual
//! `extends_from`/`extended_by` associations never form ownership cycles.
//! Edges are only added while a graph is being built; afterwards callers get
//! read-only [`ProfileRef`] / [`ControlRef`] views.

use crate::model::{Control, Evaluation, Profile};
use std::fmt;

/// Handle to a profile inside a [`ContextGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileId(pub(crate) usize);

/// Handle to a control inside a [`ContextGraph`].
///
/// Ids are handed out in flat-list order: profile order first, then control
/// order within each profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) struct ProfileNode<'a> {
    pub(crate) data: &'a Profile,
    pub(crate) controls: Vec<ControlId>,
    pub(crate) extends_from: Vec<ProfileId>,
    pub(crate) extended_by: Vec<ProfileId>,
}

#[derive(Debug, Clone)]
pub(crate) struct ControlNode<'a> {
    pub(crate) data: &'a Control,
    pub(crate) sourced_from: ProfileId,
    pub(crate) extends_from: Vec<ControlId>,
    pub(crate) extended_by: Vec<ControlId>,
}

/// Arena holding every wrapped profile and control of one contextualization.
#[derive(Debug, Clone, Default)]
pub struct ContextGraph<'a> {
    pub(crate) evaluation: Option<&'a Evaluation>,
    pub(crate) profiles: Vec<ProfileNode<'a>>,
    pub(crate) controls: Vec<ControlNode<'a>>,
}

impl<'a> ContextGraph<'a> {
    pub(crate) fn new(evaluation: Option<&'a Evaluation>) -> Self {
        Self {
            evaluation,
            profiles: Vec::new(),
            controls: Vec::new(),
        }
    }

    pub(crate) fn push_profile(&mut self, data: &'a Profile) -> ProfileId {
        let id = ProfileId(self.profiles.len());
        self.profiles.push(ProfileNode {
            data,
            controls: Vec::new(),
            extends_from: Vec::new(),
            extended_by: Vec::new(),
        });
        id
    }

    pub(crate) fn push_control(&mut self, profile: ProfileId, data: &'a Control) -> ControlId {
        let id = ControlId(self.controls.len());
        self.controls.push(ControlNode {
            data,
            sourced_from: profile,
            extends_from: Vec::new(),
            extended_by: Vec::new(),
        });
        self.profiles[profile.0].controls.push(id);
        id
    }

    /// Record that `child` is overlaid on top of `parent`.
    pub(crate) fn link_profiles(&mut self, child: ProfileId, parent: ProfileId) {
        self.profiles[child.0].extends_from.push(parent);
        self.profiles[parent.0].extended_by.push(child);
    }

    /// Record that control `child` extends control `parent`.
    pub(crate) fn link_controls(&mut self, child: ControlId, parent: ControlId) {
        self.controls[child.0].extends_from.push(parent);
        self.controls[parent.0].extended_by.push(child);
    }

    pub(crate) fn profile_node(&self, id: ProfileId) -> &ProfileNode<'a> {
        &self.profiles[id.0]
    }

    pub(crate) fn control_node(&self, id: ControlId) -> &ControlNode<'a> {
        &self.controls[id.0]
    }

    /// Raw evaluation the graph was built from; `None` for stand-alone profiles.
    pub fn evaluation(&self) -> Option<&'a Evaluation> {
        self.evaluation
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    pub fn profile(&self, id: ProfileId) -> Option<ProfileRef<'_, 'a>> {
        (id.0 < self.profiles.len()).then_some(ProfileRef { graph: self, id })
    }

    pub fn control(&self, id: ControlId) -> Option<ControlRef<'_, 'a>> {
        (id.0 < self.controls.len()).then_some(ControlRef { graph: self, id })
    }

    /// Profiles in source order.
    pub fn profiles(&self) -> impl Iterator<Item = ProfileRef<'_, 'a>> + '_ {
        (0..self.profiles.len()).map(move |i| ProfileRef {
            graph: self,
            id: ProfileId(i),
        })
    }

    /// All controls in flat-list order.
    pub fn controls(&self) -> impl Iterator<Item = ControlRef<'_, 'a>> + '_ {
        (0..self.controls.len()).map(move |i| ControlRef {
            graph: self,
            id: ControlId(i),
        })
    }

    /// First profile with the given name.
    pub fn profile_by_name(&self, name: &str) -> Option<ProfileRef<'_, 'a>> {
        self.profiles().find(|p| p.name() == name)
    }

    /// Control `control_id` inside the first profile named `profile_name`.
    pub fn find_control(&self, profile_name: &str, control_id: &str) -> Option<ControlRef<'_, 'a>> {
        self.profile_by_name(profile_name)?
            .controls()
            .find(|c| c.id() == control_id)
    }

    /// Every control across all profiles carrying the raw identifier `id`.
    pub fn controls_with_id<'g>(
        &'g self,
        id: &'g str,
    ) -> impl Iterator<Item = ControlRef<'g, 'a>> + 'g {
        self.controls().filter(move |c| c.id() == id)
    }

    /// Controls that no other control extends: the outermost layer of every
    /// overlay chain, including controls that were never overlaid at all.
    pub fn effective_controls(&self) -> impl Iterator<Item = ControlRef<'_, 'a>> + '_ {
        self.controls().filter(|c| c.node().extended_by.is_empty())
    }
}

/// Read-only view of one wrapped profile.
#[derive(Clone, Copy)]
pub struct ProfileRef<'g, 'a> {
    pub(crate) graph: &'g ContextGraph<'a>,
    pub(crate) id: ProfileId,
}

impl<'g, 'a> ProfileRef<'g, 'a> {
    fn node(&self) -> &'g ProfileNode<'a> {
        self.graph.profile_node(self.id)
    }

    pub fn handle(&self) -> ProfileId {
        self.id
    }

    pub fn data(&self) -> &'a Profile {
        self.node().data
    }

    pub fn name(&self) -> &'a str {
        &self.node().data.name
    }

    /// Owning evaluation graph, or `None` when the profile was contextualized
    /// alone. The raw evaluation is available through [`ContextGraph::evaluation`].
    pub fn sourced_from(&self) -> Option<&'g ContextGraph<'a>> {
        self.graph.evaluation.map(|_| self.graph)
    }

    /// Wrapped controls in source order.
    pub fn controls(&self) -> impl Iterator<Item = ControlRef<'g, 'a>> + 'g {
        let graph = self.graph;
        self.node()
            .controls
            .iter()
            .map(move |&id| ControlRef { graph, id })
    }

    /// Profiles this one is overlaid on top of, in link order.
    pub fn extends_from(&self) -> impl Iterator<Item = ProfileRef<'g, 'a>> + 'g {
        let graph = self.graph;
        self.node()
            .extends_from
            .iter()
            .map(move |&id| ProfileRef { graph, id })
    }

    /// Profiles overlaid on top of this one.
    pub fn extended_by(&self) -> impl Iterator<Item = ProfileRef<'g, 'a>> + 'g {
        let graph = self.graph;
        self.node()
            .extended_by
            .iter()
            .map(move |&id| ProfileRef { graph, id })
    }
}

impl PartialEq for ProfileRef<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.id == other.id
    }
}

impl Eq for ProfileRef<'_, '_> {}

impl fmt::Debug for ProfileRef<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileRef")
            .field("id", &self.id.0)
            .field("name", &self.name())
            .finish()
    }
}

/// Read-only view of one wrapped control.
#[derive(Clone, Copy)]
pub struct ControlRef<'g, 'a> {
    pub(crate) graph: &'g ContextGraph<'a>,
    pub(crate) id: ControlId,
}

impl<'g, 'a> ControlRef<'g, 'a> {
    pub(crate) fn node(&self) -> &'g ControlNode<'a> {
        self.graph.control_node(self.id)
    }

    pub fn handle(&self) -> ControlId {
        self.id
    }

    pub fn data(&self) -> &'a Control {
        self.node().data
    }

    /// Raw control identifier.
    pub fn id(&self) -> &'a str {
        &self.node().data.id
    }

    /// Owning profile.
    pub fn sourced_from(&self) -> ProfileRef<'g, 'a> {
        ProfileRef {
            graph: self.graph,
            id: self.node().sourced_from,
        }
    }

    /// Controls this one overlays, in link order.
    pub fn extends_from(&self) -> impl Iterator<Item = ControlRef<'g, 'a>> + 'g {
        let graph = self.graph;
        self.node()
            .extends_from
            .iter()
            .map(move |&id| ControlRef { graph, id })
    }

    /// Controls overlaid on top of this one.
    pub fn extended_by(&self) -> impl Iterator<Item = ControlRef<'g, 'a>> + 'g {
        let graph = self.graph;
        self.node()
            .extended_by
            .iter()
            .map(move |&id| ControlRef { graph, id })
    }

    /// Immediate ancestor: the first entry of `extends_from`.
    pub fn parent(&self) -> Option<ControlRef<'g, 'a>> {
        self.node().extends_from.first().map(|&id| ControlRef {
            graph: self.graph,
            id,
        })
    }
}

impl PartialEq for ControlRef<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.id == other.id
    }
}

impl Eq for ControlRef<'_, '_> {}

impl fmt::Debug for ControlRef<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlRef")
            .field("profile", &self.sourced_from().name())
            .field("id", &self.id())
            .finish()
    }
}

//! Overlay linking.
//!
//! # Phases
//!
//! ```text
//! wrap_profiles ──> link_profiles ──> wrap_controls ──> link_controls
//!  (no links)       (declared           (flat list,       Case A: declared profile
//!                    parent_profile)     no links)          dependency, walk extends_from
//!                                                          Case B: no dependency,
//!                                                            same-id peers under one base
//! ```
//!
//! Nothing here fails: unmatched parents or controls simply leave an edge
//! absent. Control ids are assumed unique within a profile; duplicates are
//! reported but not repaired.

use crate::graph::{ContextGraph, ControlId, ProfileId};
use crate::model::{Evaluation, Profile};
use std::collections::{HashMap, HashSet};

/// Wrap every profile of the evaluation, in source order, with empty links.
pub(crate) fn wrap_profiles<'a>(graph: &mut ContextGraph<'a>, evaluation: &'a Evaluation) {
    for profile in &evaluation.profiles {
        graph.push_profile(profile);
    }
}

/// Link each profile to the first sibling whose name matches its declared parent.
pub(crate) fn link_profiles(graph: &mut ContextGraph<'_>) {
    let mut edges = Vec::new();
    for (index, node) in graph.profiles.iter().enumerate() {
        let child = ProfileId(index);
        let Some(parent_name) = node.data.declared_parent() else {
            continue;
        };

        match graph
            .profiles
            .iter()
            .position(|candidate| candidate.data.name == parent_name)
        {
            Some(parent) if parent == index => {
                tracing::warn!(profile = %parent_name, "Profile declares itself as parent; ignoring");
            }
            Some(parent) => edges.push((child, ProfileId(parent))),
            None => {
                tracing::debug!(
                    profile = %node.data.name,
                    parent = %parent_name,
                    "Declared parent profile not present in evaluation"
                );
            }
        }
    }

    for (child, parent) in edges {
        graph.link_profiles(child, parent);
    }
}

/// Wrap every control of every profile (profile order, then control order).
///
/// Returns the flat list of control handles consumed by [`link_controls`].
pub(crate) fn wrap_controls(graph: &mut ContextGraph<'_>) -> Vec<ControlId> {
    let mut flat = Vec::new();
    for index in 0..graph.profiles.len() {
        let profile_id = ProfileId(index);
        let data: &Profile = graph.profiles[index].data;
        warn_duplicate_ids(data);
        for control in &data.controls {
            flat.push(graph.push_control(profile_id, control));
        }
    }
    flat
}

fn warn_duplicate_ids(profile: &Profile) {
    let mut seen = HashSet::new();
    for control in &profile.controls {
        if !seen.insert(control.id.as_str()) {
            tracing::warn!(
                profile = %profile.name,
                control = %control.id,
                "Duplicate control id within profile; overlay links may be ambiguous"
            );
        }
    }
}

/// Populate control-level overlay edges for every control in `flat`.
pub(crate) fn link_controls(graph: &mut ContextGraph<'_>, flat: &[ControlId]) {
    let bases = select_bases(graph, flat);

    for &cc in flat {
        let owner = graph.controls[cc.0].sourced_from;
        let owner_node = &graph.profiles[owner.0];

        if !owner_node.extends_from.is_empty() || !owner_node.extended_by.is_empty() {
            link_declared(graph, cc, owner);
        } else {
            let id = graph.controls[cc.0].data.id.as_str();
            if let Some(&base) = bases.get(id) {
                if base != cc {
                    graph.link_controls(cc, base);
                }
            }
        }
    }
}

/// Case A: the owning profile has declared overlay parentage.
fn link_declared(graph: &mut ContextGraph<'_>, cc: ControlId, owner: ProfileId) {
    // Ancestor-only profiles are linked to by their descendants instead.
    if graph.profiles[owner.0].extends_from.is_empty() {
        return;
    }

    let id = graph.controls[cc.0].data.id.as_str();
    let found = graph.profiles[owner.0]
        .extends_from
        .iter()
        .find_map(|parent| {
            graph.profiles[parent.0]
                .controls
                .iter()
                .copied()
                .find(|candidate| graph.controls[candidate.0].data.id == id)
        });

    let Some(target) = found else {
        return;
    };

    if reaches(graph, target, cc) {
        tracing::warn!(
            profile = %graph.profiles[owner.0].data.name,
            control = %id,
            "Skipping overlay link that would close a cycle"
        );
        return;
    }
    graph.link_controls(cc, target);
}

/// Case B base per control id: the first peer (flat-list order) with
/// recorded results, else the first peer.
fn select_bases<'a>(graph: &ContextGraph<'a>, flat: &[ControlId]) -> HashMap<&'a str, ControlId> {
    let mut groups: HashMap<&'a str, Vec<ControlId>> = HashMap::new();
    for &id in flat {
        groups
            .entry(graph.controls[id.0].data.id.as_str())
            .or_default()
            .push(id);
    }

    groups
        .into_iter()
        .filter_map(|(key, peers)| {
            let base = peers
                .iter()
                .copied()
                .find(|peer| graph.controls[peer.0].data.has_results())
                .or_else(|| peers.first().copied())?;
            Some((key, base))
        })
        .collect()
}

/// Whether `to` is reachable from `from` by following `extends_from` edges.
fn reaches(graph: &ContextGraph<'_>, from: ControlId, to: ControlId) -> bool {
    let mut stack = vec![from];
    let mut visited = HashSet::new();
    while let Some(current) = stack.pop() {
        if current == to {
            return true;
        }
        if visited.insert(current) {
            stack.extend(graph.controls[current.0].extends_from.iter().copied());
        }
    }
    false
}

//! Entry points: wrap raw reports and resolve their overlay structure.

use crate::graph::{ContextGraph, ProfileId, ProfileRef};
use crate::linker;
use crate::model::{Evaluation, Profile};
use std::ops::Deref;

/// A raw evaluation together with its fully linked overlay graph.
///
/// Dereferences to [`ContextGraph`] for lookups and traversal.
#[derive(Debug, Clone)]
pub struct ContextualizedEvaluation<'a> {
    data: &'a Evaluation,
    graph: ContextGraph<'a>,
}

impl<'a> ContextualizedEvaluation<'a> {
    pub fn data(&self) -> &'a Evaluation {
        self.data
    }

    pub fn graph(&self) -> &ContextGraph<'a> {
        &self.graph
    }

    /// Wrapped profiles in source order.
    pub fn contains(&self) -> impl Iterator<Item = ProfileRef<'_, 'a>> + '_ {
        self.graph.profiles()
    }
}

impl<'a> Deref for ContextualizedEvaluation<'a> {
    type Target = ContextGraph<'a>;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}

/// A single profile contextualized without a surrounding evaluation.
#[derive(Debug, Clone)]
pub struct ContextualizedProfile<'a> {
    graph: ContextGraph<'a>,
    profile: ProfileId,
}

impl<'a> ContextualizedProfile<'a> {
    pub fn profile(&self) -> ProfileRef<'_, 'a> {
        ProfileRef {
            graph: &self.graph,
            id: self.profile,
        }
    }

    pub fn data(&self) -> &'a Profile {
        self.profile().data()
    }

    pub fn graph(&self) -> &ContextGraph<'a> {
        &self.graph
    }
}

/// Wrap an evaluation and link its profiles and controls.
///
/// Precondition: control ids are unique within each profile. Violations are
/// logged, not rejected.
pub fn contextualize_evaluation(evaluation: &Evaluation) -> ContextualizedEvaluation<'_> {
    let mut graph = ContextGraph::new(Some(evaluation));

    linker::wrap_profiles(&mut graph, evaluation);
    linker::link_profiles(&mut graph);
    let flat = linker::wrap_controls(&mut graph);
    linker::link_controls(&mut graph, &flat);

    tracing::debug!(
        profiles = graph.profile_count(),
        controls = graph.control_count(),
        "Contextualized evaluation"
    );

    ContextualizedEvaluation {
        data: evaluation,
        graph,
    }
}

/// Wrap one profile on its own. No overlay links are created: there is no
/// sibling data to resolve them against.
pub fn contextualize_profile(profile: &Profile) -> ContextualizedProfile<'_> {
    let mut graph = ContextGraph::new(None);
    let id = graph.push_profile(profile);
    for control in &profile.controls {
        graph.push_control(id, control);
    }

    tracing::debug!(
        profile = %profile.name,
        controls = graph.control_count(),
        "Contextualized stand-alone profile"
    );

    ContextualizedProfile { graph, profile: id }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Control;

    #[test]
    fn test_every_control_wrapped_once() {
        let eval = Evaluation::new(vec![
            Profile::new("a")
                .with_control(Control::new("c1", "x"))
                .with_control(Control::new("c2", "y")),
            Profile::new("b").with_control(Control::new("c1", "z")),
        ]);
        let ctx = contextualize_evaluation(&eval);

        assert_eq!(ctx.control_count(), 3);
        assert_eq!(ctx.contains().count(), 2);
        for (profile, wrapped) in eval.profiles.iter().zip(ctx.contains()) {
            assert!(std::ptr::eq(profile, wrapped.data()));
            let raw: Vec<_> = profile.controls.iter().collect();
            let data: Vec<_> = wrapped.controls().map(|c| c.data()).collect();
            assert_eq!(raw.len(), data.len());
            assert!(raw.iter().zip(&data).all(|(r, d)| std::ptr::eq(*r, *d)));
        }
    }

    #[test]
    fn test_sourced_from_back_references() {
        let eval = Evaluation::new(vec![Profile::new("a").with_control(Control::new("c1", "x"))]);
        let ctx = contextualize_evaluation(&eval);
        let profile = ctx.profile_by_name("a").unwrap();
        let owner = profile.sourced_from().unwrap();
        assert!(std::ptr::eq(owner, ctx.graph()));
        assert!(std::ptr::eq(owner.evaluation().unwrap(), ctx.data()));
        assert_eq!(profile.controls().next().unwrap().sourced_from(), profile);

        let standalone = contextualize_profile(&eval.profiles[0]);
        assert!(standalone.profile().sourced_from().is_none());
        assert!(standalone.graph().evaluation().is_none());
        assert_eq!(standalone.data().name, "a");
    }
}

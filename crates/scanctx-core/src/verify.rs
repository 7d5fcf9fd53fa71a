//! Structural verification of a linked graph.
//!
//! Graphs produced by [`contextualize_evaluation`](crate::contextualize_evaluation)
//! and [`contextualize_profile`](crate::contextualize_profile) always pass. The
//! check exists for code that edits links after construction.

use crate::error::{GraphError, GraphResult, NodeKind};
use crate::graph::{ContextGraph, ControlId};

/// Traversal state for cycle detection.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

impl ContextGraph<'_> {
    /// Check edge symmetry, ownership and acyclicity. Returns the first problem found.
    pub fn verify(&self) -> GraphResult<()> {
        self.verify_profile_edges()?;
        self.verify_control_edges()?;
        self.verify_ownership()?;
        self.verify_acyclic()
    }

    fn control_label(&self, id: ControlId) -> String {
        let node = self.control_node(id);
        format!("{}/{}", self.profile_node(node.sourced_from).data.name, node.data.id)
    }

    fn verify_profile_edges(&self) -> GraphResult<()> {
        for (index, node) in self.profiles.iter().enumerate() {
            for parent in &node.extends_from {
                if parent.0 == index {
                    return Err(GraphError::SelfLink {
                        kind: NodeKind::Profile,
                        node: node.data.name.clone(),
                    });
                }
                if !self.profiles[parent.0].extended_by.iter().any(|c| c.0 == index) {
                    return Err(GraphError::MissingMirror {
                        kind: NodeKind::Profile,
                        from: node.data.name.clone(),
                        to: self.profiles[parent.0].data.name.clone(),
                    });
                }
            }
            for child in &node.extended_by {
                if !self.profiles[child.0].extends_from.iter().any(|p| p.0 == index) {
                    return Err(GraphError::MissingMirror {
                        kind: NodeKind::Profile,
                        from: self.profiles[child.0].data.name.clone(),
                        to: node.data.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn verify_control_edges(&self) -> GraphResult<()> {
        for (index, node) in self.controls.iter().enumerate() {
            let id = ControlId(index);
            for &parent in &node.extends_from {
                if parent == id {
                    return Err(GraphError::SelfLink {
                        kind: NodeKind::Control,
                        node: self.control_label(id),
                    });
                }
                if !self.control_node(parent).extended_by.contains(&id) {
                    return Err(GraphError::MissingMirror {
                        kind: NodeKind::Control,
                        from: self.control_label(id),
                        to: self.control_label(parent),
                    });
                }
            }
            for &child in &node.extended_by {
                if !self.control_node(child).extends_from.contains(&id) {
                    return Err(GraphError::MissingMirror {
                        kind: NodeKind::Control,
                        from: self.control_label(child),
                        to: self.control_label(id),
                    });
                }
            }
        }
        Ok(())
    }

    fn verify_ownership(&self) -> GraphResult<()> {
        for (index, node) in self.controls.iter().enumerate() {
            let owner = self.profile_node(node.sourced_from);
            let count = owner.controls.iter().filter(|c| c.0 == index).count();
            if count != 1 {
                return Err(GraphError::Ownership {
                    profile: owner.data.name.clone(),
                    control: node.data.id.clone(),
                    count,
                });
            }
        }
        Ok(())
    }

    /// Iterative three-colour DFS over every `extends_from` edge.
    fn verify_acyclic(&self) -> GraphResult<()> {
        let mut marks = vec![Mark::Unvisited; self.controls.len()];

        for start in 0..self.controls.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            // (node, index of next edge to explore)
            let mut stack = vec![(start, 0usize)];
            marks[start] = Mark::InProgress;

            while let Some(frame) = stack.last_mut() {
                let node = frame.0;
                let edges = &self.controls[node].extends_from;
                if frame.1 < edges.len() {
                    let target = edges[frame.1].0;
                    frame.1 += 1;
                    match marks[target] {
                        Mark::InProgress => {
                            return Err(GraphError::Cycle {
                                control: self.control_label(ControlId(target)),
                            });
                        }
                        Mark::Unvisited => {
                            marks[target] = Mark::InProgress;
                            stack.push((target, 0));
                        }
                        Mark::Done => {}
                    }
                } else {
                    marks[node] = Mark::Done;
                    stack.pop();
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Control, Evaluation, Profile};
    use crate::{contextualize_evaluation, contextualize_profile};

    fn overlay_eval() -> Evaluation {
        Evaluation::new(vec![
            Profile::new("base").with_control(Control::new("c1", "x")),
            Profile::new("overlay")
                .with_parent("base")
                .with_control(Control::new("c1", "")),
        ])
    }

    #[test]
    fn test_contextualized_graphs_verify() {
        let eval = overlay_eval();
        assert_eq!(contextualize_evaluation(&eval).verify(), Ok(()));
        assert_eq!(contextualize_profile(&eval.profiles[1]).graph().verify(), Ok(()));
    }

    #[test]
    fn test_detects_cycle_added_after_construction() {
        let eval = overlay_eval();
        let ctx = contextualize_evaluation(&eval);
        let mut graph = ctx.graph().clone();
        let base = graph.find_control("base", "c1").unwrap().handle();
        let overlay = graph.find_control("overlay", "c1").unwrap().handle();
        graph.link_controls(base, overlay);

        let err = graph.verify().unwrap_err();
        assert!(matches!(err, GraphError::Cycle { .. }));
        assert!(err.breaks_traversal());
    }

    #[test]
    fn test_detects_missing_mirror() {
        let eval = overlay_eval();
        let ctx = contextualize_evaluation(&eval);
        let mut graph = ctx.graph().clone();
        graph.controls[0].extended_by.clear();

        let err = graph.verify().unwrap_err();
        assert_eq!(
            err,
            GraphError::MissingMirror {
                kind: NodeKind::Control,
                from: "overlay/c1".into(),
                to: "base/c1".into(),
            }
        );
        assert_eq!(
            err.to_string(),
            "control 'overlay/c1' extends 'base/c1' but the reverse edge is missing"
        );
        assert!(!err.breaks_traversal());
    }

    #[test]
    fn test_detects_self_link() {
        let eval = overlay_eval();
        let ctx = contextualize_evaluation(&eval);
        let mut graph = ctx.graph().clone();
        let id = graph.find_control("base", "c1").unwrap().handle();
        graph.link_controls(id, id);

        assert_eq!(
            graph.verify(),
            Err(GraphError::SelfLink {
                kind: NodeKind::Control,
                node: "base/c1".into(),
            })
        );
    }

    #[test]
    fn test_detects_ownership_mismatch() {
        let eval = overlay_eval();
        let ctx = contextualize_evaluation(&eval);
        let mut graph = ctx.graph().clone();
        graph.profiles[0].controls.clear();

        assert!(matches!(
            graph.verify(),
            Err(GraphError::Ownership { count: 0, .. })
        ));
    }
}

//! Derived views over a linked graph: root, redundancy and layered source.
//!
//! All of these follow `extends_from[0]` and rely on control links being
//! acyclic, which the linker guarantees. Anything that adds edges after
//! construction must re-run [`ContextGraph::verify`](crate::ContextGraph::verify).

use crate::graph::{ControlRef, ProfileRef};
use std::collections::HashSet;

const BANNER_BAR: &str = "=========================================================";

/// Header placed above each profile layer in [`ControlRef::full_code`].
pub fn profile_banner(profile_name: &str) -> String {
    format!("{BANNER_BAR}\n# Profile name: {profile_name}\n{BANNER_BAR}")
}

impl<'g, 'a> ControlRef<'g, 'a> {
    /// Furthest ancestor reached by always following the first `extends_from` entry.
    pub fn root(&self) -> ControlRef<'g, 'a> {
        let mut current = *self;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    pub fn is_root(&self) -> bool {
        self.node().extends_from.is_empty()
    }

    /// Number of `extends_from[0]` hops between this control and its root.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = *self;
        while let Some(parent) = current.parent() {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// An overlay layer that adds nothing: blank code, or code identical to the root's.
    pub fn is_redundant(&self) -> bool {
        let code = &self.data().code;
        if code.trim().is_empty() {
            return true;
        }
        !self.is_root() && *code == self.root().data().code
    }

    /// Source of this control layered over its ancestors, outermost layer first.
    pub fn full_code(&self) -> String {
        let own = format!(
            "{}\n{}",
            profile_banner(self.sourced_from().name()),
            self.data().code
        );
        match self.parent() {
            None => own,
            Some(parent) if self.is_redundant() => parent.full_code(),
            Some(parent) => format!("{own}\n\n{}", parent.full_code())
                .trim()
                .to_string(),
        }
    }
}

impl<'g, 'a> ProfileRef<'g, 'a> {
    /// Furthest ancestor profile via the first `extends_from` entry.
    ///
    /// Declared parentage is not guaranteed acyclic at profile level, so the
    /// walk stops at the first profile it has already visited.
    pub fn root(&self) -> ProfileRef<'g, 'a> {
        let mut visited = HashSet::from([self.id]);
        let mut current = *self;
        while let Some(parent) = current.extends_from().next() {
            if !visited.insert(parent.id) {
                break;
            }
            current = parent;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Control, Evaluation, Profile};
    use crate::{contextualize_evaluation, contextualize_profile};

    fn chain(top_code: &str, mid_code: &str, base_code: &str) -> Evaluation {
        Evaluation::new(vec![
            Profile::new("base").with_control(Control::new("c1", base_code)),
            Profile::new("mid")
                .with_parent("base")
                .with_control(Control::new("c1", mid_code)),
            Profile::new("top")
                .with_parent("mid")
                .with_control(Control::new("c1", top_code)),
        ])
    }

    #[test]
    fn test_banner_format() {
        let banner = super::profile_banner("cis");
        let lines: Vec<_> = banner.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 57);
        assert!(lines[0].chars().all(|c| c == '='));
        assert_eq!(lines[1], "# Profile name: cis");
        assert_eq!(lines[0], lines[2]);
    }

    #[test]
    fn test_root_and_depth_along_chain() {
        let eval = chain("t", "m", "b");
        let ctx = contextualize_evaluation(&eval);
        let top = ctx.find_control("top", "c1").unwrap();
        let base = ctx.find_control("base", "c1").unwrap();

        assert_eq!(top.root(), base);
        assert_eq!(top.depth(), 2);
        assert_eq!(base.depth(), 0);
        assert!(base.is_root());
        assert!(!top.is_root());
    }

    #[test]
    fn test_full_code_layers_outermost_first() {
        let eval = chain("top code", "mid code", "base code");
        let ctx = contextualize_evaluation(&eval);
        let full = ctx.find_control("top", "c1").unwrap().full_code();

        let top_at = full.find("# Profile name: top").unwrap();
        let mid_at = full.find("# Profile name: mid").unwrap();
        let base_at = full.find("# Profile name: base").unwrap();
        assert!(top_at < mid_at && mid_at < base_at);
        assert!(full.contains("top code\n\n="));
        assert!(full.ends_with("base code"));
    }

    #[test]
    fn test_redundant_middle_layer_is_collapsed() {
        let eval = chain("top code", "", "base code");
        let ctx = contextualize_evaluation(&eval);
        let full = ctx.find_control("top", "c1").unwrap().full_code();
        assert!(!full.contains("# Profile name: mid"));
        assert!(full.contains("# Profile name: top"));
        assert!(full.contains("# Profile name: base"));
    }

    #[test]
    fn test_copy_of_root_code_is_redundant() {
        let eval = chain("base code", "mid code", "base code");
        let ctx = contextualize_evaluation(&eval);
        let top = ctx.find_control("top", "c1").unwrap();
        let mid = ctx.find_control("mid", "c1").unwrap();

        assert!(top.is_redundant());
        assert!(!mid.is_redundant());
        assert_eq!(top.full_code(), mid.full_code());
    }

    #[test]
    fn test_trailing_whitespace_trimmed_only_when_layers_join() {
        let eval = Evaluation::new(vec![
            Profile::new("base").with_control(Control::new("c1", "base code\n  ")),
            Profile::new("blank")
                .with_parent("base")
                .with_control(Control::new("c1", "")),
            Profile::new("top")
                .with_parent("base")
                .with_control(Control::new("c1", "top code\n")),
        ]);
        let ctx = contextualize_evaluation(&eval);
        let base = ctx.find_control("base", "c1").unwrap();
        let blank = ctx.find_control("blank", "c1").unwrap();
        let top = ctx.find_control("top", "c1").unwrap();

        // A root renders its code verbatim.
        assert!(base.full_code().ends_with("base code\n  "));
        // Collapsing keeps the ancestor's rendering byte for byte.
        assert_eq!(blank.full_code(), base.full_code());
        // Joining layers trims the combined text once, at its ends.
        let full = top.full_code();
        assert!(full.ends_with("base code"));
        assert!(full.contains("top code\n\n\n="));
    }

    #[test]
    fn test_blank_root_is_redundant_but_renders_itself() {
        let profile = Profile::new("solo").with_control(Control::new("c1", "  \n"));
        let ctx = contextualize_profile(&profile);
        let control = ctx.profile().controls().next().unwrap();
        assert!(control.is_redundant());
        assert!(control.full_code().starts_with("=========="));
        assert!(control.full_code().contains("# Profile name: solo"));
    }

    #[test]
    fn test_profile_root_survives_declared_cycle() {
        let eval = Evaluation::new(vec![
            Profile::new("a").with_parent("b"),
            Profile::new("b").with_parent("a"),
            Profile::new("c").with_parent("a"),
        ]);
        let ctx = contextualize_evaluation(&eval);
        let c = ctx.profile_by_name("c").unwrap();
        assert_eq!(c.root().name(), "b");
    }
}

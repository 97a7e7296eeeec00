//! Extraction of a serial chain from a tree-structured link description.
//!
//! A robot description may branch (several children per parent). Only one
//! root-to-leaf path can become a `SerialChain`, so the leaf must either be
//! named by the caller or be the only leaf in the tree.

use std::collections::{BTreeMap, BTreeSet};

use crate::{ChainBuilder, DhParameters, ModelError, Result};

#[derive(Debug, Clone)]
struct TreeNode {
    params: DhParameters,
    parent: Option<String>,
}

/// Named links, each pointing at its parent. Parents absent from the map are
/// treated as the fixed base.
#[derive(Debug, Clone, Default)]
pub struct LinkTree {
    nodes: BTreeMap<String, TreeNode>,
}

impl LinkTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a link named `name` attached to `parent`.
    pub fn insert(&mut self, name: &str, params: DhParameters, parent: Option<&str>) -> &mut Self {
        self.nodes.insert(
            name.to_string(),
            TreeNode {
                params,
                parent: parent.map(str::to_string),
            },
        );
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Links that no other link names as parent, in name order.
    pub fn leaves(&self) -> Vec<String> {
        let parents: BTreeSet<&str> = self
            .nodes
            .values()
            .filter_map(|n| n.parent.as_deref())
            .collect();
        self.nodes
            .keys()
            .filter(|name| !parents.contains(name.as_str()))
            .cloned()
            .collect()
    }

    /// Link names from the base-adjacent link down to `leaf`.
    pub fn path_to(&self, leaf: &str) -> Result<Vec<String>> {
        if !self.nodes.contains_key(leaf) {
            return Err(ModelError::UnknownLink(leaf.to_string()));
        }

        let mut path = Vec::new();
        let mut current = Some(leaf);
        while let Some(name) = current {
            let Some(node) = self.nodes.get(name) else {
                break;
            };
            if path.len() == self.nodes.len() {
                return Err(ModelError::CyclicTree(name.to_string()));
            }
            path.push(name.to_string());
            current = node.parent.as_deref();
        }
        path.reverse();
        Ok(path)
    }

    /// Builder for the chain ending at `leaf`, or at the unique leaf when `None`.
    pub fn serial_chain(&self, leaf: Option<&str>) -> Result<ChainBuilder> {
        let leaf = match leaf {
            Some(leaf) => leaf.to_string(),
            None => {
                let mut leaves = self.leaves();
                if leaves.len() != 1 {
                    return Err(ModelError::AmbiguousTree { leaves });
                }
                leaves.remove(0)
            }
        };

        let params = self
            .path_to(&leaf)?
            .iter()
            .filter_map(|name| self.nodes.get(name).map(|n| n.params))
            .collect::<Vec<_>>();
        Ok(ChainBuilder::new().links(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JointType;
    use linkdyn_math::Vec3;

    fn params(a: f64) -> DhParameters {
        DhParameters::new(
            0.0,
            0.0,
            a,
            0.0,
            JointType::Revolute,
            1.0,
            Vec3::zeros(),
            Vec3::new(0.1, 0.1, 0.1),
        )
    }

    /// torso -> shoulder -> {left_arm, right_arm}
    fn branching_tree() -> LinkTree {
        let mut tree = LinkTree::new();
        tree.insert("torso", params(1.0), Some("world"))
            .insert("shoulder", params(2.0), Some("torso"))
            .insert("left_arm", params(3.0), Some("shoulder"))
            .insert("right_arm", params(4.0), Some("shoulder"));
        tree
    }

    #[test]
    fn explicit_leaf_selects_one_path() {
        let chain = branching_tree().serial_chain(Some("right_arm")).unwrap().build();
        let lengths: Vec<f64> = chain.links().iter().map(|l| l.params().a).collect();
        assert_eq!(lengths, vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn branching_without_leaf_is_ambiguous() {
        let err = branching_tree().serial_chain(None).unwrap_err();
        assert_eq!(
            err,
            ModelError::AmbiguousTree {
                leaves: vec!["left_arm".to_string(), "right_arm".to_string()],
            }
        );
    }

    #[test]
    fn single_path_needs_no_leaf() {
        let mut tree = LinkTree::new();
        tree.insert("l1", params(1.0), None)
            .insert("l2", params(2.0), Some("l1"));
        let chain = tree.serial_chain(None).unwrap().build();
        assert_eq!(chain.num_links(), 2);
        assert_eq!(tree.path_to("l2").unwrap(), vec!["l1", "l2"]);
    }

    #[test]
    fn unknown_leaf_is_rejected() {
        assert_eq!(
            branching_tree().serial_chain(Some("gripper")).unwrap_err(),
            ModelError::UnknownLink("gripper".to_string())
        );
    }

    #[test]
    fn parent_cycle_is_detected() {
        let mut tree = LinkTree::new();
        tree.insert("a", params(1.0), Some("b"))
            .insert("b", params(1.0), Some("a"));
        assert!(matches!(tree.path_to("a"), Err(ModelError::CyclicTree(_))));
    }
}

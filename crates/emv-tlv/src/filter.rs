//! Display filtering over decoded nodes

use crate::node::TlvNode;

/// Which decoded tags to show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ShowOption {
    /// Every node
    #[default]
    All,
    /// Only tags found in the EMV dictionary
    Described,
    /// Only the listed tags (hex, case-insensitive)
    Tags(Vec<String>),
}

impl ShowOption {
    fn matches(&self, node: &TlvNode) -> bool {
        match self {
            ShowOption::All => true,
            ShowOption::Described => !node.description().is_empty(),
            ShowOption::Tags(tags) => tags.iter().any(|tag| node.tag == tag.as_str()),
        }
    }
}

/// Keep the nodes selected by `option`.
///
/// A node that does not match is still kept when one of its descendants
/// does, so the result stays a tree. Children that match nothing are pruned,
/// so a filtered parent's `children` may no longer cover its `value`.
pub fn filter_nodes(nodes: &[TlvNode], option: &ShowOption) -> Vec<TlvNode> {
    if *option == ShowOption::All {
        return nodes.to_vec();
    }

    nodes
        .iter()
        .filter_map(|node| {
            let children = filter_nodes(&node.children, option);
            if option.matches(node) || !children.is_empty() {
                Some(TlvNode {
                    children,
                    ..node.clone()
                })
            } else {
                None
            }
        })
        .collect()
}

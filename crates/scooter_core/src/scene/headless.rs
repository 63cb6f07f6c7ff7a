use super::{SceneGraph, VisualNode};
use crate::handle::{Slots, VisualHandle};

/// Scene backend that only keeps node data in memory.
#[derive(Default)]
pub struct HeadlessScene {
    nodes: Slots<VisualHandle, VisualNode>,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VisualHandle, &VisualNode)> {
        self.nodes.iter()
    }

    /// Nodes whose name matches exactly.
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = VisualHandle> + 'a {
        self.nodes
            .iter()
            .filter(move |(_, node)| node.name == name)
            .map(|(handle, _)| handle)
    }
}

impl SceneGraph for HeadlessScene {
    fn add(&mut self, node: VisualNode) -> VisualHandle {
        self.nodes.insert(node)
    }

    fn remove(&mut self, handle: VisualHandle) -> Option<VisualNode> {
        self.nodes.remove(handle)
    }

    fn node(&self, handle: VisualHandle) -> Option<&VisualNode> {
        self.nodes.get(handle)
    }

    fn node_mut(&mut self, handle: VisualHandle) -> Option<&mut VisualNode> {
        self.nodes.get_mut(handle)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove_nodes() {
        let mut scene = HeadlessScene::new();
        let bench = scene.add(VisualNode::new("bench"));
        scene.add(VisualNode::new("planter"));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.named("bench").count(), 1);

        assert!(scene.remove(bench).is_some());
        assert!(!scene.contains(bench));
        assert!(scene.remove(bench).is_none());
        assert_eq!(scene.len(), 1);
    }
}

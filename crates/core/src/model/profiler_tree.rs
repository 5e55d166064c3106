use serde::Serialize;

use crate::timer::ticks_to_seconds;

/// Index of a node inside its [`ProfilerTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// One timed span.
#[derive(Debug, Clone, Serialize)]
pub struct ProfilerNode {
    name: String,
    start: u64,
    /// Equal to `start` until the span is closed.
    end: u64,
    /// `None` for the frame root, and for a top-level span until it is popped.
    parent: Option<NodeId>,
    /// Call order.
    children: Vec<NodeId>,
}

impl ProfilerNode {
    fn new(name: String, start: u64, parent: Option<NodeId>) -> Self {
        Self {
            name,
            start,
            end: start,
            parent,
            children: Vec::new(),
        }
    }
}

/// The span tree captured during one frame.
///
/// Nodes live in a flat arena in creation order, so a parent always has a
/// smaller id than its children and dropping a tree never recurses.
#[derive(Debug, Clone, Serialize)]
pub struct ProfilerTree {
    frame_number: u64,
    nodes: Vec<ProfilerNode>,
}

#[cfg_attr(not(feature = "enabled"), allow(dead_code))]
impl ProfilerTree {
    pub(crate) fn new(frame_number: u64, label: String, start: u64) -> Self {
        Self {
            frame_number,
            nodes: vec![ProfilerNode::new(label, start, None)],
        }
    }

    /// Open a span. With a parent it becomes that parent's last child
    /// immediately; without one it stays detached until [`Self::attach_to_root`].
    pub(crate) fn open(&mut self, name: String, start: u64, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ProfilerNode::new(name, start, parent));
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    pub(crate) fn close(&mut self, id: NodeId, end: u64) {
        self.nodes[id.0].end = end;
    }

    pub(crate) fn attach_to_root(&mut self, id: NodeId) {
        self.nodes[id.0].parent = Some(NodeId::ROOT);
        self.nodes[NodeId::ROOT.0].children.push(id);
    }

    pub(crate) fn node_name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    /// Stamp the root's end tick. The tree is immutable afterwards.
    pub(crate) fn seal(&mut self, end: u64) {
        self.close(NodeId::ROOT, end);
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId::ROOT,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Number of spans including the frame root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Every node in creation order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = NodeRef<'_>> {
        (0..self.nodes.len()).map(move |i| NodeRef {
            tree: self,
            id: NodeId(i),
        })
    }

    /// Number of levels below the root (0 for a frame with no spans).
    pub fn depth(&self) -> usize {
        let mut depths = vec![0usize; self.nodes.len()];
        let mut max = 0;
        for (i, node) in self.nodes.iter().enumerate().skip(1) {
            let parent_depth = node.parent.map_or(0, |p| depths[p.0]);
            depths[i] = parent_depth + 1;
            max = max.max(depths[i]);
        }
        max
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.root().elapsed_ticks()
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.root().elapsed_seconds()
    }
}

/// Borrowed view of one node together with its tree.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a ProfilerTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a ProfilerNode {
        &self.tree.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn is_root(&self) -> bool {
        self.id == NodeId::ROOT
    }

    pub fn name(&self) -> &'a str {
        &self.node().name
    }

    pub fn start_ticks(&self) -> u64 {
        self.node().start
    }

    pub fn end_ticks(&self) -> u64 {
        self.node().end
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    pub fn children(
        &self,
    ) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + ExactSizeIterator + 'a {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    /// Time between push and pop, including child spans.
    pub fn elapsed_ticks(&self) -> u64 {
        let node = self.node();
        node.end.saturating_sub(node.start)
    }

    /// Elapsed time minus the elapsed time of every direct child.
    pub fn self_ticks(&self) -> u64 {
        let children: u64 = self.children().map(|c| c.elapsed_ticks()).sum();
        self.elapsed_ticks().saturating_sub(children)
    }

    pub fn elapsed_seconds(&self) -> f64 {
        ticks_to_seconds(self.elapsed_ticks())
    }

    pub fn self_seconds(&self) -> f64 {
        ticks_to_seconds(self.self_ticks())
    }
}

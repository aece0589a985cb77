use crate::core::camera::euler_xyz;
use crate::core::timeline::{Pose, Track, Transform};
use fnv::FnvHashMap;
use glam::{Mat4, Vec3};

/// Typed handle into a [`SceneGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub transform: Transform,
    pub scale: Vec3,
}

/// Flat scene graph of named nodes with parent links.
///
/// Name lookups happen once at load time; per-frame code works on [`NodeId`]s.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    by_name: FnvHashMap<String, NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        name: impl Into<String>,
        parent: Option<NodeId>,
        transform: Transform,
        scale: Vec3,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let name = name.into();
        // First node registered under a name wins, like a depth-first search would.
        self.by_name.entry(name.clone()).or_insert(id);
        self.nodes.push(Node {
            name,
            parent: parent.filter(|p| p.0 < id.0),
            transform,
            scale,
        });
        id
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn set_rotation(&mut self, id: NodeId, rotation: Vec3) {
        self.nodes[id.0].transform.rotation = rotation;
    }

    pub fn local_matrix(&self, id: NodeId) -> Mat4 {
        let n = &self.nodes[id.0];
        Mat4::from_scale_rotation_translation(
            n.scale,
            euler_xyz(n.transform.rotation),
            n.transform.position,
        )
    }

    /// Parents are always inserted before children, so this walk terminates.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut m = self.local_matrix(id);
        let mut cur = self.nodes[id.0].parent;
        while let Some(p) = cur {
            m = self.local_matrix(p) * m;
            cur = self.nodes[p.0].parent;
        }
        m
    }
}

/// Door nodes resolved once after the model is available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DoorHandles {
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl DoorHandles {
    pub fn resolve(graph: &SceneGraph, left_name: &str, right_name: &str) -> Self {
        let handles = Self {
            left: graph.find(left_name),
            right: graph.find(right_name),
        };
        if !handles.is_complete() {
            log::warn!(
                "[scroll] door nodes missing (left={}, right={}); door animation disabled",
                handles.left.is_some(),
                handles.right.is_some()
            );
        }
        handles
    }

    pub fn is_complete(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    /// Write door rotations from the sampled pose. A missing pair is a no-op.
    pub fn apply(&self, graph: &mut SceneGraph, pose: &Pose) -> bool {
        match (self.left, self.right) {
            (Some(l), Some(r)) => {
                graph.set_rotation(l, pose.get(Track::DoorLeft).rotation);
                graph.set_rotation(r, pose.get(Track::DoorRight).rotation);
                true
            }
            _ => false,
        }
    }
}

//! Depth-bounded AABB quadtree.
//!
//! The tree is rebuilt from scratch every tick from a flat snapshot of boxes
//! ([`AabbQuadtree::update`]). Nodes reference boxes by their index in that
//! snapshot. A node splits into four equal quadrants once it holds more than
//! [`NODE_CAPACITY`] boxes and its children would still be shallower than
//! the configured max depth; a split node hands all of its boxes down, so
//! boxes live only in leaves. A box is stored in every leaf it touches, which
//! makes each leaf's list complete for its region and lets the overlap scan
//! look at one node at a time.
//!
//! Children are either all four present or absent, so traversal never has to
//! deal with half-built nodes.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

use crate::components::aabb::Aabb;

/// Boxes a node holds before it splits.
pub const NODE_CAPACITY: usize = 4;

/// The four quadrants of a split node.
#[derive(Debug, Clone)]
pub struct Quadrants {
    pub nw: AabbQuadtreeNode,
    pub ne: AabbQuadtreeNode,
    pub sw: AabbQuadtreeNode,
    pub se: AabbQuadtreeNode,
}

impl Quadrants {
    fn split(region: &Aabb, depth: usize) -> Self {
        let mx = (region.x1 + region.x2) / 2.0;
        let my = (region.y1 + region.y2) / 2.0;
        Self {
            nw: AabbQuadtreeNode::new(Aabb::new(region.x1, region.y1, mx, my), depth),
            ne: AabbQuadtreeNode::new(Aabb::new(mx, region.y1, region.x2, my), depth),
            sw: AabbQuadtreeNode::new(Aabb::new(region.x1, my, mx, region.y2), depth),
            se: AabbQuadtreeNode::new(Aabb::new(mx, my, region.x2, region.y2), depth),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AabbQuadtreeNode> {
        [&self.nw, &self.ne, &self.sw, &self.se].into_iter()
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut AabbQuadtreeNode> {
        [&mut self.nw, &mut self.ne, &mut self.sw, &mut self.se].into_iter()
    }
}

/// One region of the tree.
#[derive(Debug, Clone)]
pub struct AabbQuadtreeNode {
    /// Region covered by this node.
    pub region: Aabb,
    pub depth: usize,
    /// Indices into the tree's box snapshot.
    pub aabbs: Vec<usize>,
    children: Option<Box<Quadrants>>,
}

impl AabbQuadtreeNode {
    fn new(region: Aabb, depth: usize) -> Self {
        Self {
            region,
            depth,
            aabbs: Vec::new(),
            children: None,
        }
    }

    pub fn quadrants(&self) -> Option<&Quadrants> {
        self.children.as_deref()
    }

    /// The four children, or nothing for a leaf.
    pub fn children(&self) -> impl Iterator<Item = &AabbQuadtreeNode> {
        self.children.iter().flat_map(|q| q.iter())
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Inclusive touch test against the node region.
    fn touches(&self, aabb: &Aabb) -> bool {
        let r = &self.region;
        aabb.x1 <= r.x2 && aabb.x2 >= r.x1 && aabb.y1 <= r.y2 && aabb.y2 >= r.y1
    }

    fn insert(&mut self, index: usize, boxes: &[Aabb], max_depth: usize) {
        if let Some(quadrants) = self.children.as_mut() {
            // clamped into this region so boxes outside the root still land in a child
            let clamped = clamp_into(&boxes[index], &self.region);
            for child in quadrants.iter_mut() {
                if child.touches(&clamped) {
                    child.insert(index, boxes, max_depth);
                }
            }
            return;
        }

        self.aabbs.push(index);
        if self.aabbs.len() > NODE_CAPACITY && self.depth + 1 < max_depth {
            self.children = Some(Box::new(Quadrants::split(&self.region, self.depth + 1)));
            for held in std::mem::take(&mut self.aabbs) {
                self.insert(held, boxes, max_depth);
            }
        }
    }

    fn count(&self) -> usize {
        1 + self.children().map(AabbQuadtreeNode::count).sum::<usize>()
    }

    fn deepest(&self) -> usize {
        self.children()
            .map(AabbQuadtreeNode::deepest)
            .max()
            .unwrap_or(self.depth)
    }
}

fn clamp_into(aabb: &Aabb, region: &Aabb) -> Aabb {
    Aabb {
        x1: aabb.x1.clamp(region.x1, region.x2),
        y1: aabb.y1.clamp(region.y1, region.y2),
        x2: aabb.x2.clamp(region.x1, region.x2),
        y2: aabb.y2.clamp(region.y1, region.y2),
        kind: aabb.kind,
    }
}

/// A pair of overlapping boxes, by snapshot index (`a < b`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AabbOverlap {
    pub a: usize,
    pub b: usize,
    /// Intersection rectangle.
    pub area: Aabb,
}

/// Quadtree over a `width` x `height` region anchored at the origin.
#[derive(Resource, Debug, Clone)]
pub struct AabbQuadtree {
    width: f32,
    height: f32,
    max_depth: usize,
    boxes: Vec<Aabb>,
    owners: Vec<Entity>,
    root: AabbQuadtreeNode,
}

impl AabbQuadtree {
    /// `max_depth` is raised to 1 so the root is always scanned.
    pub fn new(width: f32, height: f32, max_depth: usize) -> Self {
        Self {
            width,
            height,
            max_depth: max_depth.max(1),
            boxes: Vec::new(),
            owners: Vec::new(),
            root: AabbQuadtreeNode::new(Aabb::new(0.0, 0.0, width, height), 0),
        }
    }

    /// Rebuild the tree from the current box positions.
    pub fn update(&mut self, aabbs: impl IntoIterator<Item = Aabb>) {
        self.owners.clear();
        self.boxes.clear();
        self.boxes.extend(aabbs);
        self.rebuild();
    }

    /// Rebuild from `(entity, box)` pairs, remembering which entity owns each
    /// snapshot index.
    pub fn update_with_owners(&mut self, items: impl IntoIterator<Item = (Entity, Aabb)>) {
        self.owners.clear();
        self.boxes.clear();
        for (entity, aabb) in items {
            self.owners.push(entity);
            self.boxes.push(aabb);
        }
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.root = AabbQuadtreeNode::new(Aabb::new(0.0, 0.0, self.width, self.height), 0);
        for index in 0..self.boxes.len() {
            self.root.insert(index, &self.boxes, self.max_depth);
        }
    }

    pub fn root(&self) -> &AabbQuadtreeNode {
        &self.root
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Box at snapshot `index`.
    pub fn aabb(&self, index: usize) -> Option<&Aabb> {
        self.boxes.get(index)
    }

    /// Entity owning snapshot `index`, when built with
    /// [`update_with_owners`](Self::update_with_owners).
    pub fn owner(&self, index: usize) -> Option<Entity> {
        self.owners.get(index).copied()
    }

    /// Box at snapshot `index` with its owning entity, if any.
    pub fn entry(&self, index: usize) -> Option<(&Aabb, Option<Entity>)> {
        self.boxes.get(index).map(|aabb| (aabb, self.owner(index)))
    }

    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// Depth of the deepest node.
    pub fn depth(&self) -> usize {
        self.root.deepest()
    }

    /// All overlapping pairs in the tree, each reported once.
    pub fn compute_overlaps(&self) -> Vec<AabbOverlap> {
        self.compute_overlaps_from(&self.root)
    }

    /// Overlapping pairs found in the subtree rooted at `node`.
    pub fn compute_overlaps_from(&self, node: &AabbQuadtreeNode) -> Vec<AabbOverlap> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        self.scan(node, &mut seen, &mut out);
        out
    }

    fn scan(
        &self,
        node: &AabbQuadtreeNode,
        seen: &mut FxHashSet<(usize, usize)>,
        out: &mut Vec<AabbOverlap>,
    ) {
        if node.depth >= self.max_depth {
            return;
        }

        for (i, &ia) in node.aabbs.iter().enumerate() {
            for &ib in &node.aabbs[i + 1..] {
                let (a, b) = (&self.boxes[ia], &self.boxes[ib]);
                if a.is_static() && b.is_static() {
                    continue;
                }
                let Some(area) = a.intersection(b) else {
                    continue;
                };
                let key = (ia.min(ib), ia.max(ib));
                if seen.insert(key) {
                    out.push(AabbOverlap {
                        a: key.0,
                        b: key.1,
                        area,
                    });
                }
            }
        }

        for child in node.children() {
            self.scan(child, seen, out);
        }
    }
}

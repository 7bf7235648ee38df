//! Barnes-Hut quadtree over the unit square.
//!
//! The tree is rebuilt from scratch every step. Nodes live in a single
//! arena (`Vec<QuadNode>`); an interior node stores the index of the first
//! of its four children, which are always allocated together and ordered
//! NW, NE, SW, SE. Nodes keep only the aggregate mass and center of mass
//! of what was inserted below them, never particle indices.
use crate::particles::ParticleSet;
use crate::utils::DEFAULT_MAX_DEPTH;

/// Square region of the plane, described by its center and half side length.
///
/// # Examples
///
/// ```
/// use galsim::particles::{Quad, Quadrant};
///
/// let quad = Quad::unit();
/// assert_eq!(quad.quadrant(0.25, 0.75), Quadrant::NorthWest);
/// // Ties on the center lines go to the east and north.
/// assert_eq!(quad.quadrant(0.5, 0.5), Quadrant::NorthEast);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub cx: f64,
    pub cy: f64,
    pub half_size: f64,
}

/// Child slot of a subdivided node, in storage order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quadrant {
    NorthWest = 0,
    NorthEast = 1,
    SouthWest = 2,
    SouthEast = 3,
}

impl Quad {
    /// The normalized simulation domain `[0, 1]²`.
    pub fn unit() -> Self {
        Quad { cx: 0.5, cy: 0.5, half_size: 0.5 }
    }

    /// Side length of the region.
    pub fn side(&self) -> f64 {
        self.half_size + self.half_size
    }

    /// Quadrant of `(x, y)` relative to this region's center, using `>=` for ties.
    pub fn quadrant(&self, x: f64, y: f64) -> Quadrant {
        match (x >= self.cx, y >= self.cy) {
            (false, true) => Quadrant::NorthWest,
            (true, true) => Quadrant::NorthEast,
            (false, false) => Quadrant::SouthWest,
            (true, false) => Quadrant::SouthEast,
        }
    }

    /// The sub-region covering `quadrant`: half the half side, center offset by it in each axis.
    pub fn child(&self, quadrant: Quadrant) -> Quad {
        let hs = self.half_size / 2.0;
        match quadrant {
            Quadrant::NorthWest => Quad { cx: self.cx - hs, cy: self.cy + hs, half_size: hs },
            Quadrant::NorthEast => Quad { cx: self.cx + hs, cy: self.cy + hs, half_size: hs },
            Quadrant::SouthWest => Quad { cx: self.cx - hs, cy: self.cy - hs, half_size: hs },
            Quadrant::SouthEast => Quad { cx: self.cx + hs, cy: self.cy - hs, half_size: hs },
        }
    }
}

/// One node of the arena.
///
/// - `children == None && mass == 0.0`: empty leaf.
/// - `children == None && mass > 0.0`: occupied leaf holding one contribution
///   (or several merged ones at the depth limit).
/// - `children == Some(first)`: interior node; its children are
///   `first..first + 4` and its mass and center of mass aggregate theirs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadNode {
    pub quad: Quad,
    pub mass: f64,
    pub com_x: f64,
    pub com_y: f64,
    pub children: Option<usize>,
}

impl QuadNode {
    fn empty(quad: Quad) -> Self {
        QuadNode { quad, mass: 0.0, com_x: 0.0, com_y: 0.0, children: None }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_none() && self.mass == 0.0
    }

    /// Folds a point mass into the running mass and center of mass.
    fn absorb(&mut self, x: f64, y: f64, mass: f64) {
        let new_mass = self.mass + mass;
        self.com_x = (self.com_x * self.mass + x * mass) / new_mass;
        self.com_y = (self.com_y * self.mass + y * mass) / new_mass;
        self.mass = new_mass;
    }
}

/// Arena-backed quadtree; node 0 is the root.
#[derive(Debug, Clone)]
pub struct QuadTree {
    nodes: Vec<QuadNode>,
    max_depth: usize,
    /// Deepest level any insertion has reached.
    levels: usize,
}

impl QuadTree {
    /// Creates a tree holding only an empty root covering `quad`.
    pub fn new(quad: Quad, max_depth: usize) -> Self {
        Self {
            nodes: vec![QuadNode::empty(quad)],
            max_depth,
            levels: 0,
        }
    }

    /// Builds a tree over the unit square from every particle, in index order.
    ///
    /// # Examples
    ///
    /// ```
    /// use galsim::particles::{ParticleSet, QuadTree};
    ///
    /// let mut set = ParticleSet::default();
    /// set.push(0.25, 0.25, 1.0, 0.0, 0.0);
    /// set.push(0.75, 0.75, 3.0, 0.0, 0.0);
    ///
    /// let tree = QuadTree::build(&set);
    /// let root = tree.root();
    /// assert_eq!(root.mass, 4.0);
    /// assert!((root.com_x - 0.625).abs() < 1e-12);
    /// ```
    pub fn build(particles: &ParticleSet) -> Self {
        Self::build_with_depth(particles, DEFAULT_MAX_DEPTH)
    }

    pub fn build_with_depth(particles: &ParticleSet, max_depth: usize) -> Self {
        let mut tree = Self::new(Quad::unit(), max_depth);
        // Roughly two arena slots per particle for well-spread inputs.
        tree.nodes.reserve(particles.len() * 2);
        for i in 0..particles.len() {
            tree.insert(particles.x[i], particles.y[i], particles.mass[i]);
        }
        tree
    }

    /// Inserts one point mass below the root.
    pub fn insert(&mut self, x: f64, y: f64, mass: f64) {
        self.insert_at(0, x, y, mass, 0);
    }

    fn insert_at(&mut self, id: usize, x: f64, y: f64, mass: f64, depth: usize) {
        self.levels = self.levels.max(depth);
        let node = self.nodes[id];
        match node.children {
            Some(first) => {
                let child = first + node.quad.quadrant(x, y) as usize;
                self.insert_at(child, x, y, mass, depth + 1);
            }
            None if node.mass == 0.0 => {
                let leaf = &mut self.nodes[id];
                leaf.mass = mass;
                leaf.com_x = x;
                leaf.com_y = y;
                return;
            }
            None if depth >= self.max_depth => {}
            None => {
                let first = self.subdivide(id);
                // The current occupant is re-inserted as a surrogate particle.
                let existing = first + node.quad.quadrant(node.com_x, node.com_y) as usize;
                self.insert_at(existing, node.com_x, node.com_y, node.mass, depth + 1);
                let incoming = first + node.quad.quadrant(x, y) as usize;
                self.insert_at(incoming, x, y, mass, depth + 1);
            }
        }
        self.nodes[id].absorb(x, y, mass);
    }

    /// Appends four empty children for `id` and returns the index of the first.
    fn subdivide(&mut self, id: usize) -> usize {
        let quad = self.nodes[id].quad;
        let first = self.nodes.len();
        for quadrant in [
            Quadrant::NorthWest,
            Quadrant::NorthEast,
            Quadrant::SouthWest,
            Quadrant::SouthEast,
        ] {
            self.nodes.push(QuadNode::empty(quad.child(quadrant)));
        }
        self.nodes[id].children = Some(first);
        first
    }

    pub fn root(&self) -> &QuadNode {
        &self.nodes[0]
    }

    /// The four children of `node`, or `None` for a leaf.
    pub fn children(&self, node: &QuadNode) -> Option<&[QuadNode]> {
        node.children.map(|first| &self.nodes[first..first + 4])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of levels below the root actually used.
    pub fn depth(&self) -> usize {
        self.levels
    }

    /// Drops every node except an empty root so the arena can be refilled.
    pub fn clear(&mut self) {
        let quad = self.nodes[0].quad;
        self.nodes.clear();
        self.nodes.push(QuadNode::empty(quad));
        self.levels = 0;
    }
}

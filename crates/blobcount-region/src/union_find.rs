//! Union-Find (disjoint set) over dense integer ids
//!
//! Sets are addressed by index into a parent array, so the structure is a
//! flat arena with no pointers. Id `0` is reserved for background and is
//! never handed out by [`UnionFind::make_set`].
//!
//! `union` always links the larger root under the smaller one. The
//! representative of every class is therefore its smallest member, which
//! the labeler relies on to number components in scan order.

/// Disjoint set forest over ids `1..=len`
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<u32>,
}

impl Default for UnionFind {
    fn default() -> Self {
        Self::new()
    }
}

impl UnionFind {
    /// Create an empty forest
    pub fn new() -> Self {
        Self { parent: vec![0] }
    }

    /// Create an empty forest with room for `capacity` ids
    pub fn with_capacity(capacity: usize) -> Self {
        let mut parent = Vec::with_capacity(capacity + 1);
        parent.push(0);
        Self { parent }
    }

    /// Add a singleton set and return its id.
    pub fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        id
    }

    /// Number of ids handed out
    pub fn len(&self) -> usize {
        self.parent.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the representative of `id`, compressing the path behind it.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not returned by [`UnionFind::make_set`].
    pub fn find(&mut self, id: u32) -> u32 {
        let mut root = id;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        let mut cur = id;
        while self.parent[cur as usize] != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }
        root
    }

    /// Merge the classes of `a` and `b`; returns the surviving representative.
    pub fn union(&mut self, a: u32, b: u32) -> u32 {
        let ra = self.find(a);
        let rb = self.find(b);
        let (keep, drop) = if ra <= rb { (ra, rb) } else { (rb, ra) };
        self.parent[drop as usize] = keep;
        keep
    }

    /// Check whether `a` and `b` belong to the same class.
    pub fn same(&mut self, a: u32, b: u32) -> bool {
        self.find(a) == self.find(b)
    }

    /// Check whether `id` is the representative of its class.
    pub fn is_root(&self, id: u32) -> bool {
        self.parent[id as usize] == id
    }
}

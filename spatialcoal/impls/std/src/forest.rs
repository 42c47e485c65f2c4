use std::collections::BTreeMap;

use spatialcoal_core::{Coordinate, Generation};

/// Trees (lineages) grouped by the deme they are currently found in.
///
/// A position is only kept while at least one tree is found there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forest<X: Coordinate, T> {
    trees: BTreeMap<X, Vec<T>>,
}

impl<X: Coordinate, T> Default for Forest<X, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X: Coordinate, T> Forest<X, T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            trees: BTreeMap::new(),
        }
    }

    /// Plants `count` trees, each created by `make_tree(x, t)`, at every
    /// sampled position `x`.
    #[must_use]
    pub fn from_sample<S, F>(sample: S, t: Generation, mut make_tree: F) -> Self
    where
        S: IntoIterator<Item = (X, usize)>,
        F: FnMut(&X, Generation) -> T,
    {
        let mut forest = Self::new();

        for (x, count) in sample {
            let trees: Vec<T> = (0..count).map(|_| make_tree(&x, t)).collect();

            forest.insert_all(x, trees);
        }

        forest
    }

    pub fn insert(&mut self, x: X, tree: T) {
        self.trees.entry(x).or_default().push(tree);
    }

    pub fn insert_all<I: IntoIterator<Item = T>>(&mut self, x: X, trees: I) {
        let mut trees = trees.into_iter().peekable();

        if trees.peek().is_some() {
            self.trees.entry(x).or_default().extend(trees);
        }
    }

    /// Removes and returns all trees found at `x`.
    #[must_use]
    pub fn erase(&mut self, x: &X) -> Vec<T> {
        self.trees.remove(x).unwrap_or_default()
    }

    #[must_use]
    pub fn trees_at_same_position(&self, x: &X) -> &[T] {
        self.trees.get(x).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn nb_trees(&self) -> usize {
        self.trees.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn nb_trees_at(&self, x: &X) -> usize {
        self.trees.get(x).map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = &X> {
        self.trees.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&X, &T)> {
        self.trees
            .iter()
            .flat_map(|(x, trees)| trees.iter().map(move |tree| (x, tree)))
    }

    pub fn into_trees(self) -> impl Iterator<Item = (X, T)> {
        self.trees
            .into_iter()
            .flat_map(|(x, trees)| trees.into_iter().map(move |tree| (x.clone(), tree)))
    }

    /// Returns the only tree of the forest with its position, or the
    /// unchanged forest if it holds any other number of trees.
    ///
    /// # Errors
    ///
    /// Returns `self` if the forest does not contain exactly one tree.
    pub fn into_single_tree(mut self) -> Result<(X, T), Self> {
        if self.trees.len() != 1 {
            return Err(self);
        }

        match self.trees.pop_first() {
            Some((x, trees)) => match <[T; 1]>::try_from(trees) {
                Ok([tree]) => Ok((x, tree)),
                Err(trees) => {
                    self.trees.insert(x, trees);

                    Err(self)
                },
            },
            None => Err(self),
        }
    }
}

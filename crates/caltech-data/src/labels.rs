// Label indexer: class name -> dense integer id, in first-seen order.

use std::collections::HashMap;

/// The class reserved for "no valid class" images. It is never labelled and
/// never produces a dataset entry.
pub const BACKGROUND_LABEL: &str = "BACKGROUND_Google";

/// Whether `label` is the discarded background class.
pub fn is_sentinel(label: &str) -> bool {
    label == BACKGROUND_LABEL
}

/// Ordered mapping from class name to id.
///
/// Ids are contiguous from 0: a new name receives the number of distinct
/// names seen before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap {
    ids: HashMap<String, usize>,
    names: Vec<String>,
}

impl LabelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of `name`, assigning the next one if it is new.
    pub fn insert(&mut self, name: &str) -> usize {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len();
        self.ids.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }

    pub fn id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Number of distinct classes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Class names indexed by id.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// `(name, id)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.names.iter().enumerate().map(|(id, n)| (n.as_str(), id))
    }
}

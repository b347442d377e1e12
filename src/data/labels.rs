use crate::types::{Label, VLabel};
use std::collections::{BTreeSet, HashMap};

/// A bijection between input labels and dense labels.
///
/// Labels collected at once are numbered by ascending input value. Labels added later are
/// appended after the existing ones, which is how a query graph joins the label space of
/// its data graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelMap {
    dense: HashMap<VLabel, Label>,
    raw: Vec<VLabel>,
}

impl LabelMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the dense label of `vlabel`.
    pub fn get(&self, vlabel: VLabel) -> Option<Label> {
        self.dense.get(&vlabel).copied()
    }

    /// Returns the input label of the dense `label`.
    pub fn raw(&self, label: Label) -> Option<VLabel> {
        self.raw.get(label).copied()
    }
}

impl Extend<VLabel> for LabelMap {
    fn extend<I: IntoIterator<Item = VLabel>>(&mut self, vlabels: I) {
        let unseen: BTreeSet<VLabel> = vlabels
            .into_iter()
            .filter(|vlabel| !self.dense.contains_key(vlabel))
            .collect();
        for vlabel in unseen {
            self.dense.insert(vlabel, self.raw.len());
            self.raw.push(vlabel);
        }
    }
}

impl FromIterator<VLabel> for LabelMap {
    fn from_iter<I: IntoIterator<Item = VLabel>>(vlabels: I) -> Self {
        let mut map = LabelMap::new();
        map.extend(vlabels);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascending() {
        let map: LabelMap = vec![30, 10, 20, 10].into_iter().collect();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(10), Some(0));
        assert_eq!(map.get(20), Some(1));
        assert_eq!(map.get(30), Some(2));
        assert_eq!(map.get(40), None);
        assert_eq!(map.raw(2), Some(30));
        assert_eq!(map.raw(3), None);
    }

    #[test]
    fn test_extend_appends() {
        let mut map: LabelMap = vec![5, 7].into_iter().collect();
        map.extend(vec![7, 1, 9]);
        assert_eq!(map.get(5), Some(0));
        assert_eq!(map.get(7), Some(1));
        assert_eq!(map.get(1), Some(2));
        assert_eq!(map.get(9), Some(3));
    }
}

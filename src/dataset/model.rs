//! In-memory division model
//!
//! An arena of divisions in scan order, indexed by id. Built once by the
//! loader and read-only for every check afterwards.

use std::collections::HashMap;

use super::types::Division;

/// All divisions of one dataset, keyed by unique id
#[derive(Debug, Default)]
pub struct DivisionModel {
    divisions: Vec<Division>,
    index: HashMap<String, usize>,
}

/// Divisions sharing one base id, in scan order
#[derive(Debug)]
pub struct Lineage<'a> {
    pub base_id: &'a str,
    pub members: Vec<&'a Division>,
}

impl DivisionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a division.
    ///
    /// A second division with an id already present is rejected and handed
    /// back unchanged; the first definition stays.
    pub fn insert(&mut self, division: Division) -> Result<(), Box<Division>> {
        if self.index.contains_key(&division.id) {
            return Err(Box::new(division));
        }
        self.index.insert(division.id.clone(), self.divisions.len());
        self.divisions.push(division);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Division> {
        self.index.get(id).map(|&pos| &self.divisions[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.divisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.divisions.is_empty()
    }

    /// Divisions in the order they were scanned
    pub fn iter(&self) -> std::slice::Iter<'_, Division> {
        self.divisions.iter()
    }

    /// Groups divisions by base id, ordered by each base id's first appearance.
    pub fn lineages(&self) -> Vec<Lineage<'_>> {
        let mut groups: Vec<Lineage<'_>> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for division in &self.divisions {
            let base = division.base_id();
            match positions.get(base) {
                Some(&pos) => groups[pos].members.push(division),
                None => {
                    positions.insert(base, groups.len());
                    groups.push(Lineage {
                        base_id: base,
                        members: vec![division],
                    });
                }
            }
        }

        groups
    }
}

impl<'a> IntoIterator for &'a DivisionModel {
    type Item = &'a Division;
    type IntoIter = std::slice::Iter<'a, Division>;

    fn into_iter(self) -> Self::IntoIter {
        self.divisions.iter()
    }
}

/// Test fixtures only: a duplicate id in a fixture is a bug in the test.
#[cfg(test)]
impl FromIterator<Division> for DivisionModel {
    fn from_iter<I: IntoIterator<Item = Division>>(iter: I) -> Self {
        let mut model = DivisionModel::new();
        for division in iter {
            if let Err(rejected) = model.insert(division) {
                panic!("duplicate id '{}' in fixture", rejected.id);
            }
        }
        model
    }
}

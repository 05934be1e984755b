//! Constraint grouping: partition constraints into independent clusters by
//! shared cells, via union-find, so the configuration generator only has to
//! reason about one cluster's cells at a time.

use std::collections::{HashMap, HashSet};

use crate::constraint::Constraint;

pub struct ConstraintGroup {
    pub constraints: Vec<Constraint>,
    pub cells: HashSet<(usize, usize)>,
}

struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }

    fn find(&mut self, i: usize) -> usize {
        if self.parent[i] != i {
            self.parent[i] = self.find(self.parent[i]);
        }
        self.parent[i]
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}

/// Group constraints that share at least one cell, directly or transitively.
pub fn group_constraints(constraints: &[Constraint]) -> Vec<ConstraintGroup> {
    if constraints.is_empty() {
        return Vec::new();
    }

    let mut uf = UnionFind::new(constraints.len());
    let mut cell_owner: HashMap<(usize, usize), usize> = HashMap::new();

    for (i, c) in constraints.iter().enumerate() {
        for &cell in &c.cells {
            match cell_owner.get(&cell) {
                Some(&owner) => uf.union(i, owner),
                None => {
                    cell_owner.insert(cell, i);
                }
            }
        }
    }

    let mut buckets: HashMap<usize, ConstraintGroup> = HashMap::new();
    for (i, c) in constraints.iter().enumerate() {
        let root = uf.find(i);
        let group = buckets.entry(root).or_insert_with(|| ConstraintGroup {
            constraints: Vec::new(),
            cells: HashSet::new(),
        });
        group.cells.extend(c.cells.iter().copied());
        group.constraints.push(c.clone());
    }

    buckets.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(cells: &[(usize, usize)], k: i32) -> Constraint {
        Constraint { cells: cells.to_vec(), k }
    }

    #[test]
    fn disjoint_constraints_form_separate_groups() {
        let constraints = vec![c(&[(0, 0), (0, 1)], 1), c(&[(5, 5), (5, 6)], 1)];
        let groups = group_constraints(&constraints);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn overlapping_constraints_merge_into_one_group() {
        let constraints = vec![
            c(&[(0, 0), (0, 1)], 1),
            c(&[(0, 1), (0, 2)], 1),
            c(&[(9, 9)], 1),
        ];
        let groups = group_constraints(&constraints);
        assert_eq!(groups.len(), 2);
        let big = groups.iter().find(|g| g.constraints.len() == 2).unwrap();
        assert_eq!(big.cells.len(), 3);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_constraints(&[]).is_empty());
    }
}

//! Lab test recommendation and the max-merge accumulator.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A recommended lab test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabTest {
    pub name: String,
    pub priority: i32,
    pub reason: String,
    pub estimated_cost: String,
    pub frequency: String,
}

impl LabTest {
    pub fn new(
        name: impl Into<String>,
        priority: i32,
        reason: impl Into<String>,
        estimated_cost: impl Into<String>,
        frequency: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            priority,
            reason: reason.into(),
            estimated_cost: estimated_cost.into(),
            frequency: frequency.into(),
        }
    }

    /// Entries with no priority or no reason are never rendered.
    pub fn is_renderable(&self) -> bool {
        self.priority > 0 && !self.reason.trim().is_empty()
    }
}

/// Name-keyed accumulator owned by a single prioritization run.
///
/// A repeated name replaces the stored entry only when the new priority is
/// strictly greater. Names are compared exactly (case-sensitive), so
/// differently phrased versions of one test stay separate entries.
#[derive(Debug, Default)]
pub struct LabTestAccumulator {
    entries: Vec<LabTest>,
    index: HashMap<String, usize>,
}

impl LabTestAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts on first sight, max-merges on repeat.
    pub fn add_test(&mut self, test: LabTest) {
        match self.index.get(&test.name) {
            Some(&pos) => {
                if test.priority > self.entries[pos].priority {
                    self.entries[pos] = test;
                }
            }
            None => {
                self.index.insert(test.name.clone(), self.entries.len());
                self.entries.push(test);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the accumulator into a pruned, priority-sorted list.
    pub fn finish(self) -> Vec<LabTest> {
        prune_and_sort(self.entries)
    }
}

/// Drops unrenderable entries and sorts descending by priority.
///
/// The sort is stable: equal priorities keep insertion order.
pub fn prune_and_sort(tests: Vec<LabTest>) -> Vec<LabTest> {
    let mut kept: Vec<LabTest> = tests.into_iter().filter(LabTest::is_renderable).collect();
    kept.sort_by(|a, b| b.priority.cmp(&a.priority));
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test(name: &str, priority: i32, reason: &str) -> LabTest {
        LabTest::new(name, priority, reason, "$30", "Annually")
    }

    #[test]
    fn first_sight_inserts() {
        let mut acc = LabTestAccumulator::new();
        acc.add_test(test("TSH", 100, "thyroid"));
        acc.add_test(test("CBC", 60, "baseline"));
        assert_eq!(acc.len(), 2);
    }

    #[test]
    fn repeat_name_keeps_max_priority() {
        let mut acc = LabTestAccumulator::new();
        acc.add_test(test("TSH", 100, "first"));
        acc.add_test(test("TSH", 80, "lower"));
        acc.add_test(test("TSH", 150, "higher"));
        acc.add_test(test("TSH", 150, "equal"));

        let out = acc.finish();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].priority, 150);
        assert_eq!(out[0].reason, "higher");
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut acc = LabTestAccumulator::new();
        acc.add_test(test("Vitamin D", 50, "a"));
        acc.add_test(test("vitamin d", 40, "b"));
        assert_eq!(acc.len(), 2);
    }

    #[test]
    fn finish_drops_zero_priority_and_empty_reason() {
        let mut acc = LabTestAccumulator::new();
        acc.add_test(test("A", 0, "zero"));
        acc.add_test(test("B", -5, "negative"));
        acc.add_test(test("C", 40, "  "));
        acc.add_test(test("D", 10, "kept"));
        let out = acc.finish();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "D");
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let out = prune_and_sort(vec![
            test("low", 10, "r"),
            test("tie-first", 50, "r"),
            test("high", 90, "r"),
            test("tie-second", 50, "r"),
        ]);
        let names: Vec<&str> = out.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["high", "tie-first", "tie-second", "low"]);
    }
}

//! Groups free-text branch names ("Foxtons, Battersea", "Foxtons Clapham Ltd")
//! under a canonical agent key.
//!
//! The key is the first word of the cleaned name, so unrelated agents that
//! share a first word ("The ...", "City ...") end up in one group.

use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

/// Group key for rows whose branch name is empty after cleaning.
pub const UNKNOWN_GROUP: &str = "Unknown";

static TRAILING_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(Ltd|Limited|LLP|PLC|Inc|London)$").expect("suffix pattern is valid")
});

/// Drops everything after the first comma, then one trailing legal-entity or
/// "London" suffix, then surrounding whitespace.
pub fn clean_agent_name(name: &str) -> String {
    let head = name.split_once(',').map_or(name, |(head, _)| head);
    TRAILING_SUFFIX.replace(head, "").trim().to_string()
}

/// First whitespace-delimited token of a cleaned name.
pub fn group_key(cleaned: &str) -> &str {
    cleaned.split_whitespace().next().unwrap_or(UNKNOWN_GROUP)
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentGroup {
    pub key: String,
    pub count: usize,
    /// Distinct cleaned names seen for this key.
    pub names: BTreeSet<String>,
}

/// Running tally of groups, in first-seen order.
#[derive(Debug, Default)]
pub struct AgentGrouper {
    groups: Vec<AgentGroup>,
    index: HashMap<String, usize>,
}

impl AgentGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one property for `branch_name` and returns its group key.
    pub fn assign(&mut self, branch_name: &str) -> String {
        let cleaned = clean_agent_name(branch_name);
        let key = group_key(&cleaned).to_string();

        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push(AgentGroup {
                    key: key.clone(),
                    count: 0,
                    names: BTreeSet::new(),
                });
                self.groups.len() - 1
            }
        };

        let group = &mut self.groups[slot];
        group.count += 1;
        if !cleaned.is_empty() {
            group.names.insert(cleaned);
        }

        key
    }

    pub fn groups(&self) -> &[AgentGroup] {
        &self.groups
    }

    /// `(key, count)` pairs, highest count first. Ties keep first-seen order.
    pub fn summary(&self) -> Vec<(String, usize)> {
        let mut summary: Vec<(String, usize)> = self
            .groups
            .iter()
            .map(|g| (g.key.clone(), g.count))
            .collect();
        summary.sort_by(|a, b| b.1.cmp(&a.1));
        summary
    }
}

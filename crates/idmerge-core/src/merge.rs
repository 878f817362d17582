//! Union-find merging of accounts into people.
//!
//! Accounts that share at least one email end up in the same person, and the
//! relation is transitive: if A and B share a key and B and C share another,
//! all three are merged. Emails are compared for exact equality only.

use crate::model::{Account, Person};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// How the absorbing ("major") side of a union is chosen.
///
/// Both strategies produce the same grouping. They can differ in which account
/// ends up as representative, and therefore in the emitted name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnionStrategy {
    /// Compare the raw email-list length of the two accounts that met on a key.
    /// The current account wins only if its list is strictly longer.
    #[default]
    RawLength,
    /// Compare the accumulated email sets of the two roots.
    ClusterSize,
}

impl UnionStrategy {
    pub fn name(self) -> &'static str {
        match self {
            Self::RawLength => "raw-length",
            Self::ClusterSize => "cluster-size",
        }
    }
}

impl fmt::Display for UnionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw-length" => Ok(Self::RawLength),
            "cluster-size" => Ok(Self::ClusterSize),
            other => Err(format!(
                "unknown union strategy '{}' (expected raw-length or cluster-size)",
                other
            )),
        }
    }
}

/// Counts collected while merging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub accounts: usize,
    pub people: usize,
    /// Unions that actually joined two distinct roots.
    pub unions: usize,
    pub distinct_emails: usize,
    pub distinct_applications: usize,
}

/// A person in progress. Roots have `representative == index`.
#[derive(Debug)]
struct Cluster {
    index: usize,
    representative: usize,
    applications: BTreeSet<String>,
    emails: BTreeSet<String>,
}

impl Cluster {
    fn is_root(&self) -> bool {
        self.representative == self.index
    }
}

/// Disjoint-set forest over account indices.
#[derive(Debug)]
struct Forest {
    clusters: Vec<Cluster>,
}

impl Forest {
    fn new(accounts: &[Account]) -> Self {
        let clusters = accounts
            .iter()
            .enumerate()
            .map(|(index, account)| Cluster {
                index,
                representative: index,
                applications: BTreeSet::from([account.application.clone()]),
                emails: account.emails.iter().cloned().collect(),
            })
            .collect();
        Self { clusters }
    }

    /// Resolve `index` to its root, compressing the path behind it.
    fn find(&mut self, index: usize) -> usize {
        let mut root = index;
        while !self.clusters[root].is_root() {
            root = self.clusters[root].representative;
        }

        let mut current = index;
        while current != root {
            let next = self.clusters[current].representative;
            self.clusters[current].representative = root;
            current = next;
        }
        root
    }

    /// Attach the root of `minor` beneath the root of `major` and move the
    /// minor side's accumulated sets into it. Returns false if both sides
    /// already share a root.
    fn union(&mut self, major: usize, minor: usize) -> bool {
        let major = self.find(major);
        let minor = self.find(minor);
        if major == minor {
            return false;
        }

        let absorbed = &mut self.clusters[minor];
        absorbed.representative = major;
        let applications = std::mem::take(&mut absorbed.applications);
        let emails = std::mem::take(&mut absorbed.emails);

        let root = &mut self.clusters[major];
        root.applications.extend(applications);
        root.emails.extend(emails);
        true
    }

    fn root_email_count(&mut self, index: usize) -> usize {
        let root = self.find(index);
        self.clusters[root].emails.len()
    }

    /// Emit the roots, in input order, as people.
    fn into_people(self, accounts: &[Account]) -> Vec<Person> {
        self.clusters
            .into_iter()
            .filter(Cluster::is_root)
            .map(|cluster| Person {
                name: accounts[cluster.index].name.clone(),
                applications: cluster.applications.into_iter().collect(),
                emails: cluster.emails.into_iter().collect(),
            })
            .collect()
    }
}

/// Groups accounts into people. Holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Merger {
    strategy: UnionStrategy,
}

impl Merger {
    pub fn new(strategy: UnionStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> UnionStrategy {
        self.strategy
    }

    /// Merge accounts into people, one per connected component of the
    /// "shares an email" relation, ordered by first appearance of the
    /// representative account.
    pub fn merge(&self, accounts: &[Account]) -> Vec<Person> {
        self.merge_with_report(accounts).0
    }

    /// Like [`Merger::merge`], also returning counts for the run.
    pub fn merge_with_report(&self, accounts: &[Account]) -> (Vec<Person>, MergeReport) {
        let mut forest = Forest::new(accounts);
        // email -> index of the first account that listed it
        let mut owners: HashMap<&str, usize> = HashMap::new();
        let mut unions = 0;

        for (index, account) in accounts.iter().enumerate() {
            for email in &account.emails {
                let owner = match owners.entry(email.as_str()) {
                    Entry::Vacant(slot) => {
                        slot.insert(index);
                        continue;
                    }
                    Entry::Occupied(slot) => *slot.get(),
                };

                let (major, minor) = self.pick_major(&mut forest, accounts, index, owner);
                if forest.union(major, minor) {
                    unions += 1;
                    tracing::debug!(
                        email = email.as_str(),
                        major,
                        minor,
                        strategy = %self.strategy,
                        "merged accounts"
                    );
                }
            }
        }

        let distinct_applications = accounts
            .iter()
            .map(|a| a.application.as_str())
            .collect::<HashSet<_>>()
            .len();
        let distinct_emails = owners.len();

        let people = forest.into_people(accounts);
        let report = MergeReport {
            accounts: accounts.len(),
            people: people.len(),
            unions,
            distinct_emails,
            distinct_applications,
        };
        (people, report)
    }

    /// Decide which side absorbs the other when `current` meets the recorded
    /// `owner` of an email. Returns `(major, minor)`.
    fn pick_major(
        &self,
        forest: &mut Forest,
        accounts: &[Account],
        current: usize,
        owner: usize,
    ) -> (usize, usize) {
        let current_wins = match self.strategy {
            UnionStrategy::RawLength => {
                accounts[current].emails.len() > accounts[owner].emails.len()
            }
            UnionStrategy::ClusterSize => {
                forest.root_email_count(current) > forest.root_email_count(owner)
            }
        };
        if current_wins {
            (current, owner)
        } else {
            (owner, current)
        }
    }
}

/// Merge accounts with the default [`UnionStrategy`].
pub fn merge(accounts: &[Account]) -> Vec<Person> {
    Merger::default().merge(accounts)
}

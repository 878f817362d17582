//! Core types and merging for idmerge.
//!
//! Provides the account/person data model ([`model`]), the union-find merger
//! ([`merge::Merger`]), JSON loading and rendering ([`storage`]), and
//! configuration ([`config::Config`]).

pub mod config;
pub mod error;
pub mod merge;
pub mod model;
pub mod storage;

pub use error::MergeError;
pub use merge::{MergeReport, Merger, UnionStrategy, merge};
pub use model::{Account, Person};

use config::Config;
use std::path::Path;

/// Load accounts from `path`, merge them, and render the people as JSON.
///
/// Any failure aborts the run; there is no partial output.
pub fn process_accounts(path: &Path, config: &Config) -> Result<String, MergeError> {
    let accounts = storage::load_accounts(path)?;
    let (people, report) = Merger::new(config.merge.strategy).merge_with_report(&accounts);
    tracing::info!(
        accounts = report.accounts,
        people = report.people,
        unions = report.unions,
        "merged accounts from {}",
        path.display()
    );
    storage::render_people(&people, &config.output.indent)
}

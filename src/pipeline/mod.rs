//! Fact-check orchestration and index bootstrap.
//!
//! ```text
//! claim -> retrieve(top_k) -> confidence < threshold ? Unverifiable (no evidence)
//!                                                   : synthesize(claim, evidence)
//! ```

pub mod bootstrap;
pub mod checker;
pub mod error;
pub mod options;
pub mod result;


pub use bootstrap::{BootstrapOutcome, bootstrap_index};
pub use checker::FactChecker;
pub use error::{BootstrapError, CheckError};
pub use options::CheckOptions;
pub use result::{CheckResult, insufficient_evidence_reasoning};

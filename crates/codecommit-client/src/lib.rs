//! `codecommit-client` — AWS-backed implementations of the account-vending
//! client traits.
//!
//! `vending-core` defines the seams ([`IdentityClient`] and
//! [`SourceControlClient`]); this crate fills them with the official AWS SDK:
//!
//! ```text
//! StsIdentity      ← AssumeRole / GetCallerIdentity  (aws-sdk-sts)
//!     │
//!     ▼ DelegatedCredential
//! CodeCommitRepo   ← GetBranch / CreateCommit        (aws-sdk-codecommit)
//! ```
//!
//! Every CodeCommit call runs under the delegated credential of the current
//! invocation; a fresh SDK client is built from it per call and nothing is
//! cached across invocations. Service failures are mapped into the
//! `VendingError` taxonomy at this boundary so the workflow never sees raw
//! SDK error types.
//!
//! [`IdentityClient`]: vending_core::clients::IdentityClient
//! [`SourceControlClient`]: vending_core::clients::SourceControlClient

pub mod codecommit;
pub mod sts;

pub use codecommit::CodeCommitRepo;
pub use sts::StsIdentity;

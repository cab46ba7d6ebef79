//! Azure AD Graph to Microsoft Graph endpoint migration.
//!
//! `annotation` reads the externally owned migration flag, `eligibility` answers whether the
//! deprecated flow is still in effect, `region` picks the global or China rewrite policy, and
//! `rewrite` applies the guarded endpoint substitution. None of these hold state; everything
//! lives in the [`AzureAdConfig`](crate::config::AzureAdConfig) passed by reference.

pub mod annotation;
pub mod eligibility;
pub mod region;
pub mod rewrite;

pub use annotation::*;
pub use eligibility::*;
pub use region::*;
pub use rewrite::*;

//! Enc Analysis - declaration bodies and active-statement matching for
//! edit-and-continue.
//!
//! Given an old and a new version of a member, this crate answers which old
//! active statement corresponds to which new one.
//!
//! # Architecture
//!
//! - [`breakpoints`]: source spans of active statements
//! - [`comparer`]: labels and the statement matcher
//! - [`state_machine`]: async/iterator classification and suspension points
//! - [`body`]: the declaration-body kinds and their selection from syntax
//! - [`driver`]: per-member mapping, serial or in parallel
//!
//! # Tracing
//!
//! Call [`init_tracing`] and set `RUST_LOG=enc_analysis=debug` (or `trace`)
//! to log match computation, body selection and statement mapping.

pub mod body;
pub mod breakpoints;
pub mod comparer;
pub mod driver;
mod error;
mod options;
mod part;
pub mod state_machine;
pub mod syntax;

#[cfg(test)]
mod test_helpers;

pub use body::{DeclarationBody, FoundStatement, LambdaBody, MemberBody};
pub use comparer::{Label, Match, StatementComparer};
pub use driver::{
    compute_body_match, map_active_statement, map_active_statements, ActiveStatementMapping,
};
pub use error::AnalysisError;
pub use options::MatchOptions;
pub use part::StatementPart;
pub use state_machine::{StateMachineInfo, StateMachineKinds};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

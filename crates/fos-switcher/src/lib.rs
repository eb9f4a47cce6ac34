//! fOS Switcher - Key-based content switching
//!
//! Binds clickable link elements to content elements that share a group
//! attribute. Clicking a link moves the active class within its group to
//! every element carrying the link's key, with veto-able callbacks around
//! each transition.
//!
//! ```ignore
//! let mut switcher = Switcher::new();
//! switcher.on_before_change(Some("tabs"), |_, _, change| {
//!     Verdict::from(change.key != "locked")
//! });
//! switcher.init(&mut doc.tree, doc.body());
//! ```

mod bootstrap;
mod events;
mod kind;
mod query;
mod schema;
mod switcher;

pub use events::{ChangeHandler, EventBus, SwitchChange, SwitchEvent, Verdict};
pub use kind::ItemKind;
pub use query::Query;
pub use schema::{Schema, SwitcherOptions};
pub use switcher::Switcher;

/// Result type for switcher operations
pub type Result<T> = std::result::Result<T, SwitcherError>;

/// Switcher errors
#[derive(Debug, thiserror::Error)]
pub enum SwitcherError {
    #[error("Group key is not specified")]
    MissingGroupKey,

    #[error("Switcher is already configured")]
    AlreadyConfigured,

    #[error("Invalid switcher options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

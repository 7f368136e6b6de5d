//! Conversation runtime for the shop assistant.
//!
//! A turn flows through three stages:
//! 1. **Normalization** - the raw line is lower-cased once.
//! 2. **Routing** (`intent`) - an ordered rule table picks exactly one [`Intent`].
//! 3. **Handling** (`handlers`) - the intent's handler reads the catalog,
//!    possibly mutates the cart, and renders the reply text.
//!
//! [`SalesSession`] owns the catalog, cart and router for one shopper; there
//! is no process-wide state.

pub mod handlers;
pub mod intent;
pub mod session;

pub use intent::{Intent, IntentRouter, IntentRule};
pub use session::{Reply, SalesSession};

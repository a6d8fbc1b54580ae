//! # Core Menu Logic
//!
//! The navigation graph and everything that drives it.
//! It knows nothing about displays or buttons.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • MenuItem (nodes)     │
//!                    │  • MenuBackend (cursor) │
//!                    │  • Action (host input)  │
//!                    │                         │
//!                    │  No I/O in navigation.  │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │ menu-shell │      │  LCD host  │      │  Encoder   │
//!     │  (stdin)   │      │  (yours)   │      │  (yours)   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`item`]: `MenuItem` — one node, its links and hooks
//! - [`backend`]: `MenuBackend` — the arena, the cursor, all movement
//! - [`event`]: payloads passed to hooks
//! - [`action`]: the `Action` enum and `update()` for hosts
//! - [`config`]: TOML menu layouts

pub mod action;
pub mod backend;
pub mod config;
pub mod event;
pub mod item;
mod search;

pub use backend::{MenuBackend, ROOT_NAME};
pub use item::{Direction, ItemId, MenuItem};

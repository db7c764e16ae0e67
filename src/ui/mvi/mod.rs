//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides the building blocks every presentation component
//! is made of: a [`Store`] owning one state value, an [`Executor`] running
//! side effects, and a pure [`Reducer`] folding messages into state.
//!
//! # Architecture
//!
//! ```text
//!            ┌──────────── Action (bootstrap / background) ───────────┐
//!            ↓                                                         │
//! Intent ──→ Executor ──→ Message ──→ Reducer ──→ State ──→ View       │
//!            │    └──────── launch(async work) ────────────────────────┘
//!            └──→ Label (one-shot, to the owning component)
//! ```
//!
//! - **State**: Immutable representation of UI state
//! - **Intent**: User actions or system events
//! - **Message**: Reducer input describing what changed
//! - **Reducer**: Pure function that transforms state based on messages
//! - **Label**: One-shot notification for effects outside the store

mod executor;
mod intent;
mod label;
mod lifecycle;
mod reducer;
mod scope;
mod state;
mod store;

pub use executor::{Executor, ExecutorScope, StoreHandle};
pub use intent::Intent;
pub use label::{LabelBus, LabelReceiver};
pub use lifecycle::{Lifecycle, LifecyclePhase};
pub use reducer::Reducer;
pub use scope::{Output, TaskScope};
pub use state::UiState;
pub use store::{IntentSink, Store, StoreOptions, DEFAULT_LABEL_REPLAY_CAPACITY};

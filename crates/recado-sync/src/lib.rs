//! # recado-sync
//!
//! Client-side synchronization layer for the messaging API. One observable
//! [`InboxStore`] is the single source of truth every UI surface renders
//! from; a [`SyncEngine`] polling task keeps it fresh, and [`SurfacePrefs`]
//! persist which conversation bubbles the user has dismissed.

pub mod client;
pub mod engine;
pub mod prefs;
pub mod store;

pub use client::{ConversationMessage, SyncClient, SyncClientError};
pub use engine::{SyncEngine, SyncIntervals};
pub use prefs::{PrefsError, SurfacePrefs};
pub use store::{ConversationEntry, InboxStore, LastMessage, Profile, SummaryUpdate, Surface};

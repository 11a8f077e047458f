//! Observable inbox store
//!
//! A single [`InboxStore`] is the source of truth for every conversation
//! surface a client renders: unread bubbles, mini chat windows and the
//! full drawer. All mutation goes through the store so the surface
//! invariants hold no matter which poll or user action fired:
//!
//! - each correspondent has exactly one surface at a time
//! - at most one drawer is open; opening it demotes mini windows to bubbles
//! - dismissed bubbles stay closed until the sender writes again
//!
//! Observers subscribe to a [`tokio::sync::watch`] revision counter and
//! re-read a snapshot whenever it ticks.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use recado_core::Snowflake;
use tokio::sync::watch;

use crate::prefs::SurfacePrefs;

/// How a conversation is currently presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Surface {
    /// Not rendered anywhere.
    #[default]
    None,
    /// Compact unread indicator at the screen edge.
    Bubble,
    /// Small floating chat window.
    Mini,
    /// Full conversation drawer. At most one may be open.
    Drawer,
}

/// Minimal public profile of a correspondent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: Snowflake,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

/// Newest message in a conversation, used for previews and suppression
/// checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastMessage {
    pub id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// One conversation as tracked by the store.
#[derive(Debug, Clone)]
pub struct ConversationEntry {
    pub profile: Profile,
    pub unread: i64,
    pub last_message: Option<LastMessage>,
    pub surface: Surface,
}

/// One row of a freshly fetched inbox summary.
#[derive(Debug, Clone)]
pub struct SummaryUpdate {
    pub profile: Profile,
    pub unread: i64,
    pub last_message: LastMessage,
}

#[derive(Debug, Default)]
struct StoreState {
    entries: HashMap<Snowflake, ConversationEntry>,
    /// Correspondent ids in summary order (newest conversation first).
    order: Vec<Snowflake>,
    unread_total: i64,
    pending_invitations: i64,
}

/// Shared, observable inbox state.
#[derive(Debug)]
pub struct InboxStore {
    state: RwLock<StoreState>,
    revision: watch::Sender<u64>,
}

impl Default for InboxStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InboxStore {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: RwLock::new(StoreState::default()),
            revision,
        }
    }

    /// Subscribe to change notifications. The value is a monotonically
    /// increasing revision; observers re-read snapshots on every tick.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Merge an inbox summary into the store.
    ///
    /// Rows promote closed conversations to bubbles unless the user
    /// dismissed the bubble after the latest message arrived. Conversations
    /// missing from the summary have no unread left: their bubbles are
    /// removed, but mini windows and the drawer stay open.
    pub fn apply_summary(&self, rows: Vec<SummaryUpdate>, prefs: &SurfacePrefs) {
        let mut state = self.state.write();
        let mut order = Vec::with_capacity(rows.len());
        let mut seen: HashSet<Snowflake> = HashSet::with_capacity(rows.len());

        for row in rows {
            let id = row.profile.id;
            order.push(id);
            seen.insert(id);
            let suppressed = prefs.is_suppressed(id, row.last_message.created_at);

            match state.entries.get_mut(&id) {
                Some(entry) => {
                    entry.profile = row.profile;
                    entry.unread = row.unread;
                    entry.last_message = Some(row.last_message);
                    if entry.surface == Surface::None && entry.unread > 0 && !suppressed {
                        entry.surface = Surface::Bubble;
                    }
                }
                None => {
                    let surface = if row.unread > 0 && !suppressed {
                        Surface::Bubble
                    } else {
                        Surface::None
                    };
                    state.entries.insert(
                        id,
                        ConversationEntry {
                            profile: row.profile,
                            unread: row.unread,
                            last_message: Some(row.last_message),
                            surface,
                        },
                    );
                }
            }
        }

        // Conversations the summary no longer mentions have been read.
        state.entries.retain(|id, entry| {
            if seen.contains(id) {
                return true;
            }
            entry.unread = 0;
            match entry.surface {
                Surface::Mini | Surface::Drawer => true,
                Surface::Bubble | Surface::None => false,
            }
        });

        // Keep open windows visible even when they dropped out of the
        // summary ordering.
        for (id, entry) in &state.entries {
            if !seen.contains(id) && entry.surface != Surface::None {
                order.push(*id);
            }
        }
        state.order = order;

        drop(state);
        self.bump();
    }

    /// Entries in display order (newest unread first, then open windows).
    pub fn snapshot(&self) -> Vec<ConversationEntry> {
        let state = self.state.read();
        state
            .order
            .iter()
            .filter_map(|id| state.entries.get(id).cloned())
            .collect()
    }

    pub fn entry(&self, correspondent: Snowflake) -> Option<ConversationEntry> {
        self.state.read().entries.get(&correspondent).cloned()
    }

    /// The correspondent whose drawer is open, if any.
    pub fn drawer_correspondent(&self) -> Option<Snowflake> {
        self.state
            .read()
            .entries
            .iter()
            .find(|(_, entry)| entry.surface == Surface::Drawer)
            .map(|(id, _)| *id)
    }

    /// Open the drawer for a correspondent. Any other drawer closes to a
    /// bubble and every mini window is demoted to a bubble.
    pub fn open_drawer(&self, correspondent: Snowflake, profile: Option<Profile>) {
        let mut state = self.state.write();
        for (id, entry) in state.entries.iter_mut() {
            if *id == correspondent {
                continue;
            }
            if matches!(entry.surface, Surface::Drawer | Surface::Mini) {
                entry.surface = Surface::Bubble;
            }
        }
        Self::set_surface_inner(&mut state, correspondent, profile, Surface::Drawer);
        drop(state);
        self.bump();
    }

    /// Close the drawer back down to a bubble.
    pub fn close_drawer(&self, correspondent: Snowflake) {
        let mut state = self.state.write();
        if let Some(entry) = state.entries.get_mut(&correspondent) {
            if entry.surface == Surface::Drawer {
                entry.surface = Surface::Bubble;
                drop(state);
                self.bump();
            }
        }
    }

    /// Open a mini window. The drawer is globally exclusive, so an open
    /// drawer is first closed to a bubble.
    pub fn open_mini(&self, correspondent: Snowflake, profile: Option<Profile>) {
        let mut state = self.state.write();
        for entry in state.entries.values_mut() {
            if entry.surface == Surface::Drawer {
                entry.surface = Surface::Bubble;
            }
        }
        Self::set_surface_inner(&mut state, correspondent, profile, Surface::Mini);
        drop(state);
        self.bump();
    }

    /// Collapse a mini window to a bubble.
    pub fn minimize(&self, correspondent: Snowflake) {
        let mut state = self.state.write();
        if let Some(entry) = state.entries.get_mut(&correspondent) {
            if entry.surface == Surface::Mini {
                entry.surface = Surface::Bubble;
                drop(state);
                self.bump();
            }
        }
    }

    /// Dismiss a conversation surface entirely. The caller records the
    /// dismissal in [`SurfacePrefs`] so the next summary poll does not
    /// immediately resurrect the bubble.
    pub fn dismiss(&self, correspondent: Snowflake) {
        let mut state = self.state.write();
        if let Some(entry) = state.entries.get_mut(&correspondent) {
            if entry.surface != Surface::None {
                entry.surface = Surface::None;
                drop(state);
                self.bump();
            }
        }
    }

    /// Zero the unread count after the open conversation has been fetched
    /// (the server marks messages read on conversation reads).
    pub fn clear_unread(&self, correspondent: Snowflake) {
        let mut state = self.state.write();
        if let Some(entry) = state.entries.get_mut(&correspondent) {
            if entry.unread != 0 {
                entry.unread = 0;
                drop(state);
                self.bump();
            }
        }
    }

    pub fn unread_total(&self) -> i64 {
        self.state.read().unread_total
    }

    pub fn set_unread_total(&self, count: i64) {
        let mut state = self.state.write();
        if state.unread_total != count {
            state.unread_total = count;
            drop(state);
            self.bump();
        }
    }

    pub fn pending_invitations(&self) -> i64 {
        self.state.read().pending_invitations
    }

    pub fn set_pending_invitations(&self, count: i64) {
        let mut state = self.state.write();
        if state.pending_invitations != count {
            state.pending_invitations = count;
            drop(state);
            self.bump();
        }
    }

    fn set_surface_inner(
        state: &mut StoreState,
        correspondent: Snowflake,
        profile: Option<Profile>,
        surface: Surface,
    ) {
        match state.entries.get_mut(&correspondent) {
            Some(entry) => entry.surface = surface,
            None => {
                // Opening a conversation the summary has never mentioned,
                // e.g. from a profile page.
                let profile = profile.unwrap_or(Profile {
                    id: correspondent,
                    full_name: String::new(),
                    avatar_url: None,
                });
                state.entries.insert(
                    correspondent,
                    ConversationEntry {
                        profile,
                        unread: 0,
                        last_message: None,
                        surface,
                    },
                );
                state.order.push(correspondent);
            }
        }
    }
}

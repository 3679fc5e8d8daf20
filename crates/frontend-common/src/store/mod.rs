//! Application state store
//!
//! All UI state lives in one [`UiState`] value owned by an [`AppStore`]
//! handle. The handle is cloned into whatever needs it; there is no global
//! instance. Changes go through [`AppStore::dispatch`] and observers can
//! follow them through [`AppStore::subscribe`].

pub mod filters;
pub mod snackbar;

use crate::auth::Session;
use filters::FilterState;
use serde::{Deserialize, Serialize};
use snackbar::{Severity, Snackbar};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::trace;

/// Everything the client shows that is not fetched data
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub session: Session,
    pub filters: FilterState,
    pub login_dialog_open: bool,
    pub comment_dialog_open: bool,
    pub profile_menu_open: bool,
    pub sidenav_open: bool,
    pub snackbar: Snackbar,
}

/// State transitions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    SetSession { username: String, token_expiry: i64 },
    ClearSession,
    /// The logged-in user picked a new username
    RenameUser(String),
    SetSearchQuery(String),
    SetCategory(String),
    SetSort(String),
    ResetFilters,
    OpenLoginDialog,
    CloseLoginDialog,
    OpenCommentDialog,
    CloseCommentDialog,
    OpenProfileMenu,
    CloseProfileMenu,
    ToggleSidenav,
    OpenSidenav,
    CloseSidenav,
    ShowSnackbar { message: String, severity: Severity },
    HideSnackbar,
}

impl UiState {
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::SetSession {
                username,
                token_expiry,
            } => self.session = Session::logged_in(username, token_expiry),
            Action::ClearSession => self.session = Session::logged_out(),
            Action::RenameUser(username) => {
                if self.session.is_logged_in {
                    self.session.username = Some(username);
                }
            }
            Action::SetSearchQuery(query) => self.filters.search_query = query,
            Action::SetCategory(category) => self.filters.category = category,
            Action::SetSort(sort) => self.filters.sort = sort,
            Action::ResetFilters => self.filters.reset(),
            Action::OpenLoginDialog => self.login_dialog_open = true,
            Action::CloseLoginDialog => self.login_dialog_open = false,
            Action::OpenCommentDialog => self.comment_dialog_open = true,
            Action::CloseCommentDialog => self.comment_dialog_open = false,
            Action::OpenProfileMenu => self.profile_menu_open = true,
            Action::CloseProfileMenu => self.profile_menu_open = false,
            Action::ToggleSidenav => self.sidenav_open = !self.sidenav_open,
            Action::OpenSidenav => self.sidenav_open = true,
            Action::CloseSidenav => self.sidenav_open = false,
            Action::ShowSnackbar { message, severity } => {
                self.snackbar = Snackbar {
                    message,
                    severity,
                    is_open: true,
                }
            }
            Action::HideSnackbar => self.snackbar.is_open = false,
        }
    }
}

/// Shared handle to the application state
#[derive(Clone, Debug)]
pub struct AppStore {
    tx: Arc<watch::Sender<UiState>>,
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new(UiState::default())
    }
}

impl AppStore {
    pub fn new(initial: UiState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Apply an action and notify subscribers
    pub fn dispatch(&self, action: Action) {
        trace!(?action, "dispatch");
        self.tx.send_modify(|state| state.reduce(action));
    }

    /// Convenience for [`Action::ShowSnackbar`]
    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        self.dispatch(Action::ShowSnackbar {
            message: message.into(),
            severity,
        });
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> UiState {
        self.tx.borrow().clone()
    }

    pub fn session(&self) -> Session {
        self.tx.borrow().session.clone()
    }

    pub fn filters(&self) -> FilterState {
        self.tx.borrow().filters.clone()
    }

    /// Receiver that sees every later state
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.tx.subscribe()
    }
}

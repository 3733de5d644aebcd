//! The activity board controller.
//!
//! [`ActivityBoard`] owns the board view and drives it from the API:
//! - [`ActivityBoard::fetch_activities`] replaces the list and selector
//! - [`ActivityBoard::submit_signup`] registers the form's email
//! - [`ActivityBoard::remove_participant`] unregisters after confirmation
//! - [`ActivityBoard::dispatch`] routes [`BoardEvent`]s to the above
//!
//! Every operation kind hands out increasing tickets. A response only
//! updates the view if its ticket is still the latest of its kind, so the
//! last request issued decides what is shown, whatever order replies arrive
//! in.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, error, info};

use activityboard_core::message::{REMOVAL_FAILED, SIGNUP_FAILED};
use activityboard_core::{BoardView, Message, RemoveControl, SignupForm};
use activityboard_protocol::Reply;

use crate::api::ApiClient;
use crate::confirm::{Confirm, TerminalConfirm, removal_prompt};
use crate::error::ClientResult;
use crate::feedback::{DEFAULT_MESSAGE_TIMEOUT, MessageArea};

/// CSS class carried by removal controls.
pub const REMOVE_CONTROL_CLASS: &str = "delete-participant";

/// The element a click landed on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    classes: Vec<String>,
    data: BTreeMap<String, String>,
}

impl ClickTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a CSS class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Builder method to add a `data-*` attribute (key without the prefix).
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// The element rendered for a removal control.
    pub fn remove_control(control: &RemoveControl) -> Self {
        Self::new()
            .with_class(REMOVE_CONTROL_CLASS)
            .with_data("activity", &control.activity)
            .with_data("email", &control.email)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Returns the `(activity, email)` pair if this is a removal control.
    fn removal_pair(&self) -> Option<(&str, &str)> {
        if !self.has_class(REMOVE_CONTROL_CLASS) {
            return None;
        }
        Some((self.data("activity")?, self.data("email")?))
    }
}

/// Events delivered to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// The page finished loading.
    Load,
    /// The signup form was submitted.
    Submit,
    /// Something inside the board was clicked.
    Click(ClickTarget),
}

/// Result of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The list and selector were rebuilt with this many activities.
    Rendered(usize),
    /// The list shows the load failure message.
    Failed,
    /// A newer fetch was issued; nothing was updated.
    Superseded,
}

/// Result of a signup or removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server accepted; carries its message.
    Succeeded(String),
    /// The server rejected; carries the text shown.
    Rejected(String),
    /// The request failed before a usable reply was read.
    Failed,
    /// The user declined the confirmation.
    Declined,
    /// The event was not addressed to the board.
    Ignored,
    /// A newer request of the same kind was issued; the message area was
    /// left alone.
    Superseded,
}

impl MutationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

/// Result of [`ActivityBoard::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Fetch(FetchOutcome),
    Mutation(MutationOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MutationKind {
    Signup,
    Removal,
}

impl MutationKind {
    fn failure_text(self) -> &'static str {
        match self {
            Self::Signup => SIGNUP_FAILED,
            Self::Removal => REMOVAL_FAILED,
        }
    }
}

/// Monotonic ticket counter for one operation kind.
#[derive(Debug, Default)]
struct Generation(AtomicU64);

impl Generation {
    fn issue(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

#[derive(Debug, Default)]
struct Generations {
    fetch: Generation,
    signup: Generation,
    removal: Generation,
}

impl Generations {
    fn mutation(&self, kind: MutationKind) -> &Generation {
        match kind {
            MutationKind::Signup => &self.signup,
            MutationKind::Removal => &self.removal,
        }
    }
}

/// The activity board: list, selector, signup form and message area.
///
/// Cloning is cheap and clones share the same board.
#[derive(Clone)]
pub struct ActivityBoard {
    api: ApiClient,
    confirm: Arc<dyn Confirm>,
    state: Arc<RwLock<BoardView>>,
    messages: MessageArea,
    generations: Arc<Generations>,
}

impl std::fmt::Debug for ActivityBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityBoard")
            .field("api", &self.api)
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}

impl ActivityBoard {
    /// Creates a board that asks for confirmation on the terminal and hides
    /// messages after five seconds.
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            confirm: Arc::new(TerminalConfirm),
            state: Arc::new(RwLock::new(BoardView::default())),
            messages: MessageArea::new(DEFAULT_MESSAGE_TIMEOUT),
            generations: Arc::new(Generations::default()),
        }
    }

    /// Builder method to set the confirmation prompt.
    pub fn with_confirm(mut self, confirm: Arc<dyn Confirm>) -> Self {
        self.confirm = confirm;
        self
    }

    /// Builder method to set how long messages stay visible.
    pub fn with_message_timeout(mut self, timeout: Duration) -> Self {
        self.messages = MessageArea::new(timeout);
        self
    }

    /// Returns the API client.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Returns the current view, message area included.
    pub async fn view(&self) -> BoardView {
        let mut view = self.state.read().await.clone();
        view.message = self.messages.view().await;
        view
    }

    /// Selects an activity in the form.
    pub async fn select_activity(&self, name: impl Into<String>) {
        self.state.write().await.form.activity = name.into();
    }

    /// Types an email into the form.
    pub async fn enter_email(&self, email: impl Into<String>) {
        self.state.write().await.form.email = email.into();
    }

    /// Replaces both form inputs.
    pub async fn fill_form(&self, form: SignupForm) {
        self.state.write().await.form = form;
    }

    /// Routes an event to the matching operation.
    pub async fn dispatch(&self, event: BoardEvent) -> DispatchOutcome {
        match event {
            BoardEvent::Load => DispatchOutcome::Fetch(self.fetch_activities().await),
            BoardEvent::Submit => DispatchOutcome::Mutation(self.submit_signup().await),
            BoardEvent::Click(target) => {
                let outcome = match target.removal_pair() {
                    Some((activity, email)) => self.remove_participant(activity, email).await,
                    None => MutationOutcome::Ignored,
                };
                DispatchOutcome::Mutation(outcome)
            }
        }
    }

    /// Fetches the activities and rebuilds the list and selector.
    ///
    /// On failure the list shows the load failure message and the selector
    /// keeps its previous entries. Nothing is retried.
    pub async fn fetch_activities(&self) -> FetchOutcome {
        let ticket = self.generations.fetch.issue();
        let result = self.api.list_activities().await;

        let mut view = self.state.write().await;
        if !self.generations.fetch.is_latest(ticket) {
            debug!(ticket, "dropping superseded fetch");
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(catalog) => {
                debug!(count = catalog.len(), "rendering activities");
                view.show_catalog(&catalog);
                FetchOutcome::Rendered(catalog.len())
            }
            Err(err) => {
                error!(error = %err, "Error fetching activities");
                view.show_load_failure();
                FetchOutcome::Failed
            }
        }
    }

    /// Submits the signup form.
    ///
    /// The form is sent as is; the server validates the email.
    pub async fn submit_signup(&self) -> MutationOutcome {
        let form = self.state.read().await.form.clone();
        let ticket = self.generations.signup.issue();

        info!(activity = %form.activity, email = %form.email, "signing up");
        let result = self.api.signup(&form.activity, &form.email).await;

        self.finish_mutation(MutationKind::Signup, ticket, result)
            .await
    }

    /// Asks for confirmation, then removes `email` from `activity`.
    ///
    /// The prompt runs on the blocking pool since a terminal answer may
    /// take arbitrarily long.
    pub async fn remove_participant(&self, activity: &str, email: &str) -> MutationOutcome {
        if !self.ask_confirmation(removal_prompt(activity, email)).await {
            debug!(activity, email, "removal declined");
            return MutationOutcome::Declined;
        }

        let ticket = self.generations.removal.issue();

        info!(activity, email, "removing participant");
        let result = self.api.unregister(activity, email).await;

        self.finish_mutation(MutationKind::Removal, ticket, result)
            .await
    }

    async fn ask_confirmation(&self, prompt: String) -> bool {
        let confirm = Arc::clone(&self.confirm);
        match tokio::task::spawn_blocking(move || confirm.confirm(&prompt)).await {
            Ok(accepted) => accepted,
            Err(err) => {
                error!(error = %err, "confirmation prompt failed");
                false
            }
        }
    }

    async fn finish_mutation(
        &self,
        kind: MutationKind,
        ticket: u64,
        result: ClientResult<Reply>,
    ) -> MutationOutcome {
        let latest = self.generations.mutation(kind).is_latest(ticket);

        match result {
            Ok(Reply::Accepted { message }) => {
                if latest {
                    if kind == MutationKind::Signup {
                        self.state.write().await.form.reset();
                    }
                    self.messages.show(Message::success(message.clone())).await;
                }
                // the server changed even if a newer request owns the message
                self.fetch_activities().await;

                if latest {
                    MutationOutcome::Succeeded(message)
                } else {
                    MutationOutcome::Superseded
                }
            }
            Ok(reply) => {
                if !latest {
                    return MutationOutcome::Superseded;
                }
                let text = reply.display_text().to_string();
                debug!(?kind, reply = ?reply, "request rejected");
                self.messages.show(Message::error(text.clone())).await;
                MutationOutcome::Rejected(text)
            }
            Err(err) => {
                match kind {
                    MutationKind::Signup => error!(error = %err, "Error signing up"),
                    MutationKind::Removal => error!(error = %err, "Error removing participant"),
                }
                if !latest {
                    return MutationOutcome::Superseded;
                }
                self.messages.show(Message::error(kind.failure_text())).await;
                MutationOutcome::Failed
            }
        }
    }
}

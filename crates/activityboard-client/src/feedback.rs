//! Transient feedback area.
//!
//! A shown message stays visible for a fixed window and is then hidden by a
//! timer task. Each display is numbered; a timer only hides the display it
//! was scheduled for, so the last-scheduled hide always wins and an older
//! timer never cuts a newer message short.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::trace;

use activityboard_core::{Message, MessageView};

/// How long a message stays visible.
pub const DEFAULT_MESSAGE_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug)]
struct AreaState {
    view: MessageView,
    /// Number of the latest display.
    shown: u64,
}

/// The message area of the board.
#[derive(Debug, Clone)]
pub struct MessageArea {
    state: Arc<RwLock<AreaState>>,
    timeout: Duration,
}

impl Default for MessageArea {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_TIMEOUT)
    }
}

impl MessageArea {
    /// Creates a hidden, empty area whose messages hide after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            state: Arc::new(RwLock::new(AreaState {
                view: MessageView::empty(),
                shown: 0,
            })),
            timeout,
        }
    }

    /// Returns the visibility window.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Replaces the text and class, un-hides the area and schedules the hide.
    ///
    /// Must be called from within a tokio runtime. Returns the display number.
    pub async fn show(&self, message: Message) -> u64 {
        let display = {
            let mut state = self.state.write().await;
            state.shown += 1;
            state.view = MessageView {
                message: Some(message),
                hidden: false,
            };
            state.shown
        };

        let state = Arc::clone(&self.state);
        let timeout = self.timeout;
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            let mut state = state.write().await;
            if state.shown == display {
                trace!(display = state.shown, "hiding message");
                state.view.hidden = true;
            }
        });

        display
    }

    /// Returns the current state of the area.
    pub async fn view(&self) -> MessageView {
        self.state.read().await.view.clone()
    }
}

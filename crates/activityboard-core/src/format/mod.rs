//! Output formatting for the activity board.
//!
//! This module provides formatters for displaying a [`BoardView`] in various
//! output formats:
//! - **HTML**: the board fragment with the element ids and CSS classes the
//!   page stylesheet expects (`activities-list`, `activity-card`, ...)
//! - **TTY**: human-readable terminal output
//! - **JSON**: machine-readable JSON output
//!
//! # Example
//!
//! ```rust
//! use activityboard_core::format::{BoardFormatter, FormatOptions};
//! use activityboard_core::{Activity, ActivityCatalog, BoardView};
//!
//! let catalog: ActivityCatalog = std::iter::once(
//!     Activity::new("Chess Club", "Learn chess", "Fridays", 12),
//! )
//! .collect();
//! let mut view = BoardView::default();
//! view.show_catalog(&catalog);
//!
//! let formatter = BoardFormatter::with_defaults();
//! let html = formatter.format_list_html(&view.list);
//! assert!(html.contains("<h4>Chess Club</h4>"));
//! ```


use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::message::{LOAD_FAILED, Message, MessageView};
use crate::view::{ActivityCard, BoardView, LOADING, ListView, NO_PARTICIPANTS, SelectOption};

/// The output format for board display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Tty,
    /// HTML fragment.
    Html,
    /// Machine-readable JSON output.
    Json,
}

/// Configuration options for output formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Maximum length for descriptions in TTY output (truncated with ellipsis).
    pub max_description_length: Option<usize>,
    /// Whether TTY output lists participants under each card.
    pub show_participants: bool,
    /// Whether TTY output includes the visible message, if any.
    pub show_message: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_description_length: None,
            show_participants: true,
            show_message: true,
        }
    }
}

/// JSON output format for machine consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonBoard {
    /// Rendered activity cards.
    pub activities: Vec<ActivityCard>,
    /// Number of activities.
    pub count: usize,
    /// Whether the latest fetch failed.
    pub failed: bool,
    /// The visible message, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

/// Output formatter for the activity board.
#[derive(Debug, Clone)]
pub struct BoardFormatter {
    options: FormatOptions,
}

impl BoardFormatter {
    /// Creates a new BoardFormatter with the given options.
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Creates a new BoardFormatter with default options.
    pub fn with_defaults() -> Self {
        Self::new(FormatOptions::default())
    }

    /// Formats the board in the requested format.
    pub fn format(&self, view: &BoardView, format: OutputFormat) -> String {
        match format {
            OutputFormat::Tty => self.format_tty(view),
            OutputFormat::Html => self.format_html(view),
            OutputFormat::Json => serde_json::to_string_pretty(&self.format_json(view))
                .unwrap_or_else(|_| "{}".to_string()),
        }
    }

    // -----------------------------------------------------------------------
    // HTML
    // -----------------------------------------------------------------------

    /// Formats the whole board: list container, signup form and message area.
    pub fn format_html(&self, view: &BoardView) -> String {
        [
            self.format_list_html(&view.list),
            self.format_form_html(view),
            self.format_message_html(&view.message),
        ]
        .join("\n")
    }

    /// Formats the activities list container.
    pub fn format_list_html(&self, list: &ListView) -> String {
        let mut out = String::from("<div id=\"activities-list\">\n");
        match list {
            ListView::Loading => out.push_str(&format!("<p>{}</p>\n", LOADING)),
            ListView::Failed => out.push_str(&format!("<p>{}</p>\n", LOAD_FAILED)),
            ListView::Loaded(cards) => {
                for card in cards {
                    out.push_str(&self.format_card_html(card));
                }
            }
        }
        out.push_str("</div>");
        out
    }

    /// Formats a single activity card.
    pub fn format_card_html(&self, card: &ActivityCard) -> String {
        let mut out = String::from("<div class=\"activity-card\">\n");
        out.push_str(&format!("<h4>{}</h4>\n", html_escape(&card.name)));
        out.push_str(&format!("<p>{}</p>\n", html_escape(&card.description)));
        out.push_str(&format!(
            "<p><strong>Schedule:</strong> {}</p>\n",
            html_escape(&card.schedule)
        ));
        out.push_str(&format!(
            "<p><strong>Availability:</strong> {} spots left</p>\n",
            card.spots_left
        ));

        out.push_str("<div class=\"participants-section\">\n");
        if card.shows_placeholder() {
            out.push_str("<strong>Current Participants:</strong>\n");
            out.push_str(&format!("<p class=\"no-participants\">{}</p>\n", NO_PARTICIPANTS));
        } else {
            out.push_str(&format!(
                "<strong>Current Participants ({}):</strong>\n",
                card.participants.len()
            ));
            out.push_str("<ul class=\"participants-list\">\n");
            for row in &card.participants {
                out.push_str(&format!(
                    "<li><span class=\"participant-email\">{}</span>\
                     <button class=\"delete-participant\" data-activity=\"{}\" data-email=\"{}\" \
                     title=\"Remove participant\">\u{2715}</button></li>\n",
                    html_escape(&row.email),
                    html_escape(&row.remove.activity),
                    html_escape(&row.remove.email),
                ));
            }
            out.push_str("</ul>\n");
        }
        out.push_str("</div>\n</div>\n");
        out
    }

    /// Formats the activity selector.
    pub fn format_select_html(&self, options: &[SelectOption], selected: &str) -> String {
        let mut out = String::from("<select id=\"activity\" name=\"activity\" required>\n");
        for option in options {
            let marker = if !option.value.is_empty() && option.value == selected {
                " selected"
            } else {
                ""
            };
            out.push_str(&format!(
                "<option value=\"{}\"{}>{}</option>\n",
                html_escape(&option.value),
                marker,
                html_escape(&option.label)
            ));
        }
        out.push_str("</select>");
        out
    }

    /// Formats the signup form with its current inputs.
    pub fn format_form_html(&self, view: &BoardView) -> String {
        format!(
            "<form id=\"signup-form\">\n\
             <input type=\"email\" id=\"email\" name=\"email\" value=\"{}\" required>\n\
             {}\n\
             <button type=\"submit\">Sign Up</button>\n\
             </form>",
            html_escape(&view.form.email),
            self.format_select_html(&view.options, &view.form.activity)
        )
    }

    /// Formats the message area.
    pub fn format_message_html(&self, message: &MessageView) -> String {
        let text = message
            .message
            .as_ref()
            .map(|m| html_escape(&m.text))
            .unwrap_or_default();
        format!(
            "<div id=\"message\" class=\"{}\">{}</div>",
            message.class_list(),
            text
        )
    }

    // -----------------------------------------------------------------------
    // TTY
    // -----------------------------------------------------------------------

    /// Formats the board for terminal display.
    pub fn format_tty(&self, view: &BoardView) -> String {
        let mut blocks = match &view.list {
            ListView::Loading => vec![LOADING.to_string()],
            ListView::Failed => vec![LOAD_FAILED.to_string()],
            ListView::Loaded(cards) if cards.is_empty() => vec!["No activities".to_string()],
            ListView::Loaded(cards) => cards.iter().map(|c| self.format_card_tty(c)).collect(),
        };

        if self.options.show_message {
            if let Some(message) = view.message.visible() {
                blocks.push(format!("[{}] {}", message.severity.as_class(), message.text));
            }
        }

        blocks.join("\n\n")
    }

    /// Formats a single card for terminal display.
    pub fn format_card_tty(&self, card: &ActivityCard) -> String {
        let mut lines = vec![
            card.name.clone(),
            format!("  {}", self.truncate_description(&card.description)),
            format!("  Schedule: {}", card.schedule),
            format!("  Availability: {} spots left", card.spots_left),
        ];

        if self.options.show_participants {
            if card.shows_placeholder() {
                lines.push("  Current Participants:".to_string());
                lines.push(format!("  {}", NO_PARTICIPANTS));
            } else {
                lines.push(format!("  Current Participants ({}):", card.participants.len()));
                let emails: Vec<String> =
                    card.participants.iter().map(|p| p.email.clone()).collect();
                lines.extend(bulletize(&emails).lines().map(|l| format!("  {}", l)));
            }
        }

        lines.join("\n")
    }

    fn truncate_description<'a>(&self, description: &'a str) -> Cow<'a, str> {
        match self.options.max_description_length {
            Some(max) => ellipsis(description, max),
            None => Cow::Borrowed(description),
        }
    }

    // -----------------------------------------------------------------------
    // JSON
    // -----------------------------------------------------------------------

    /// Formats the board as a JSON-serializable structure.
    pub fn format_json(&self, view: &BoardView) -> JsonBoard {
        let activities = view.list.cards().to_vec();
        JsonBoard {
            count: activities.len(),
            activities,
            failed: matches!(view.list, ListView::Failed),
            message: view.message.visible().cloned(),
        }
    }
}

/// Truncates a string with ellipsis if it exceeds the given length.
pub fn ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    if max_len == 0 {
        return Cow::Borrowed("");
    }

    let char_count = s.chars().count();

    if char_count <= max_len {
        return Cow::Borrowed(s);
    }

    let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
    Cow::Owned(format!("{}...", truncated))
}

/// Escapes text for HTML display.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Creates bullet points from a list of items.
pub fn bulletize(items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    items
        .iter()
        .map(|item| format!("\u{2022} {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{Activity, ActivityCatalog};

    fn board(activities: Vec<Activity>) -> BoardView {
        let catalog: ActivityCatalog = activities.into_iter().collect();
        let mut view = BoardView::default();
        view.show_catalog(&catalog);
        view
    }

    fn chess_club() -> Activity {
        Activity::new("Chess Club", "d", "Mon", 2).with_participant("a@x.com")
    }

    mod ellipsis_tests {
        use super::*;

        #[test]
        fn short_string_unchanged() {
            assert_eq!(ellipsis("hello", 10), "hello");
        }

        #[test]
        fn long_string_truncated() {
            assert_eq!(ellipsis("hello world", 8), "hello...");
        }

        #[test]
        fn zero_length() {
            assert_eq!(ellipsis("hello", 0), "");
        }
    }

    mod html_tests {
        use super::*;

        #[test]
        fn escapes_special_chars() {
            assert_eq!(
                html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
                "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
            );
        }

        #[test]
        fn one_card_per_activity() {
            let view = board(vec![
                chess_club(),
                Activity::new("Drama Club", "d", "Wed", 25),
                Activity::new("Art Studio", "d", "Thu", 18),
            ]);
            let html = BoardFormatter::with_defaults().format_list_html(&view.list);
            assert_eq!(html.matches("class=\"activity-card\"").count(), 3);
        }

        #[test]
        fn one_option_per_activity_plus_placeholder() {
            let view = board(vec![chess_club(), Activity::new("Drama Club", "d", "Wed", 25)]);
            let html = BoardFormatter::with_defaults().format_select_html(&view.options, "");
            assert_eq!(html.matches("<option").count(), 3);
            assert!(html.contains("<option value=\"\">-- Select an activity --</option>"));
        }

        #[test]
        fn chess_club_card() {
            let view = board(vec![chess_club()]);
            let html = BoardFormatter::with_defaults().format_list_html(&view.list);
            assert!(html.contains("<h4>Chess Club</h4>"));
            assert!(html.contains("1 spots left"));
            assert!(html.contains("<span class=\"participant-email\">a@x.com</span>"));
            assert!(html.contains("data-activity=\"Chess Club\" data-email=\"a@x.com\""));
        }

        #[test]
        fn empty_roster_placeholder() {
            let view = board(vec![Activity::new("Drama Club", "d", "Wed", 25)]);
            let html = BoardFormatter::with_defaults().format_list_html(&view.list);
            assert!(html.contains("<p class=\"no-participants\">No participants yet</p>"));
            assert!(!html.contains("delete-participant"));
            assert!(!html.contains("participants-list"));
        }

        #[test]
        fn failed_list_shows_static_message() {
            let html = BoardFormatter::with_defaults().format_list_html(&ListView::Failed);
            assert!(html.contains(LOAD_FAILED));
            assert!(!html.contains("activity-card"));
        }

        #[test]
        fn names_are_escaped_in_attributes() {
            let view = board(vec![
                Activity::new("Rock & \"Roll\"", "d", "s", 3).with_participant("o'neil@x.com"),
            ]);
            let html = BoardFormatter::with_defaults().format_list_html(&view.list);
            assert!(html.contains("data-activity=\"Rock &amp; &quot;Roll&quot;\""));
            assert!(html.contains("data-email=\"o&#x27;neil@x.com\""));
        }

        #[test]
        fn selected_option_is_marked() {
            let view = board(vec![chess_club()]);
            let html = BoardFormatter::with_defaults().format_select_html(&view.options, "Chess Club");
            assert!(html.contains("<option value=\"Chess Club\" selected>Chess Club</option>"));
        }

        #[test]
        fn message_area_classes() {
            let formatter = BoardFormatter::with_defaults();
            assert_eq!(
                formatter.format_message_html(&MessageView::empty()),
                "<div id=\"message\" class=\"hidden\"></div>"
            );
            let shown = MessageView {
                message: Some(Message::success("Signed up")),
                hidden: false,
            };
            assert_eq!(
                formatter.format_message_html(&shown),
                "<div id=\"message\" class=\"success\">Signed up</div>"
            );
        }
    }

    mod tty_tests {
        use super::*;

        #[test]
        fn truncates_description() {
            let options = FormatOptions {
                max_description_length: Some(8),
                ..Default::default()
            };
            let view = board(vec![Activity::new("Chess Club", "Learn strategies", "Fri", 12)]);
            let out = BoardFormatter::new(options).format_tty(&view);
            assert!(out.contains("  Learn..."));
        }

        #[test]
        fn hides_participants_when_disabled() {
            let options = FormatOptions {
                show_participants: false,
                ..Default::default()
            };
            let out = BoardFormatter::new(options).format_tty(&board(vec![chess_club()]));
            assert!(!out.contains("a@x.com"));
        }

        #[test]
        fn empty_catalog() {
            let out = BoardFormatter::with_defaults().format_tty(&board(vec![]));
            assert_eq!(out, "No activities");
        }

        #[test]
        fn hidden_message_is_not_printed() {
            let mut view = board(vec![chess_club()]);
            view.message = MessageView {
                message: Some(Message::error("Already signed up")),
                hidden: true,
            };
            let out = BoardFormatter::with_defaults().format_tty(&view);
            assert!(!out.contains("Already signed up"));
        }
    }

    mod json_tests {
        use super::*;

        #[test]
        fn counts_cards() {
            let view = board(vec![chess_club(), Activity::new("Drama Club", "d", "Wed", 25)]);
            let json = BoardFormatter::with_defaults().format_json(&view);
            assert_eq!(json.count, 2);
            assert!(!json.failed);
            assert!(json.message.is_none());
        }

        #[test]
        fn failed_list() {
            let mut view = BoardView::default();
            view.show_load_failure();
            let json = BoardFormatter::with_defaults().format_json(&view);
            assert!(json.failed);
            assert_eq!(json.count, 0);
        }

        #[test]
        fn format_dispatches_to_json() {
            let view = board(vec![chess_club()]);
            let out = BoardFormatter::with_defaults().format(&view, OutputFormat::Json);
            let value: serde_json::Value = serde_json::from_str(&out).unwrap();
            assert_eq!(value["count"], 1);
            assert_eq!(value["activities"][0]["spots_left"], 1);
        }
    }
}

//! Board commands: list, show, signup and remove.

use activityboard_core::{ActivityCard, BoardFormatter, BoardView, OutputFormat};

use crate::api::ApiClient;
use crate::board::{ActivityBoard, BoardEvent, ClickTarget, DispatchOutcome, FetchOutcome, MutationOutcome};
use crate::error::{ClientError, ClientResult};

/// Renders views in the selected output format.
#[derive(Debug, Clone)]
pub struct Printer {
    formatter: BoardFormatter,
    format: OutputFormat,
}

impl Printer {
    pub fn new(formatter: BoardFormatter, format: OutputFormat) -> Self {
        Self { formatter, format }
    }

    /// Renders the whole board.
    pub fn render_board(&self, view: &BoardView) -> String {
        self.formatter.format(view, self.format)
    }

    /// Renders a single card.
    pub fn render_card(&self, card: &ActivityCard) -> ClientResult<String> {
        Ok(match self.format {
            OutputFormat::Tty => self.formatter.format_card_tty(card),
            OutputFormat::Html => self.formatter.format_card_html(card),
            OutputFormat::Json => serde_json::to_string_pretty(card)
                .map_err(|e| ClientError::Action(format!("failed to encode card: {}", e)))?,
        })
    }
}

/// Loads the board and prints it.
pub async fn list(board: &ActivityBoard, printer: &Printer) -> ClientResult<()> {
    let outcome = board.dispatch(BoardEvent::Load).await;
    println!("{}", printer.render_board(&board.view().await));
    load_result(outcome)
}

/// Prints one activity.
pub async fn show(api: &ApiClient, printer: &Printer, name: &str) -> ClientResult<()> {
    let activity = api.get_activity(name).await?;
    println!("{}", printer.render_card(&ActivityCard::from_activity(&activity))?);
    Ok(())
}

/// Loads the board, fills the form and submits it.
pub async fn signup(
    board: &ActivityBoard,
    printer: &Printer,
    activity: &str,
    email: &str,
) -> ClientResult<()> {
    load_result(board.dispatch(BoardEvent::Load).await)?;

    board.select_activity(activity).await;
    board.enter_email(email).await;
    let outcome = board.dispatch(BoardEvent::Submit).await;

    println!("{}", printer.render_board(&board.view().await));
    mutation_result(outcome)
}

/// Loads the board and clicks the removal control for `email` in `activity`.
pub async fn remove(
    board: &ActivityBoard,
    printer: &Printer,
    activity: &str,
    email: &str,
) -> ClientResult<()> {
    load_result(board.dispatch(BoardEvent::Load).await)?;

    let target = board
        .view()
        .await
        .list
        .find_remove_control(activity, email)
        .map(ClickTarget::remove_control)
        .ok_or_else(|| {
            ClientError::Action(format!("{} is not listed in {}", email, activity))
        })?;
    let outcome = board.dispatch(BoardEvent::Click(target)).await;

    if outcome == DispatchOutcome::Mutation(MutationOutcome::Declined) {
        eprintln!("Cancelled.");
        return Ok(());
    }

    println!("{}", printer.render_board(&board.view().await));
    mutation_result(outcome)
}

fn load_result(outcome: DispatchOutcome) -> ClientResult<()> {
    match outcome {
        DispatchOutcome::Fetch(FetchOutcome::Failed) => {
            Err(ClientError::Action("failed to load activities".to_string()))
        }
        _ => Ok(()),
    }
}

fn mutation_result(outcome: DispatchOutcome) -> ClientResult<()> {
    match outcome {
        DispatchOutcome::Mutation(MutationOutcome::Rejected(text)) => Err(ClientError::Action(text)),
        DispatchOutcome::Mutation(MutationOutcome::Failed) => {
            Err(ClientError::Action("request failed".to_string()))
        }
        _ => Ok(()),
    }
}

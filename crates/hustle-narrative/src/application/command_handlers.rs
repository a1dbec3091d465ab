//! Command handlers for the hustle game.
//!
//! `handle_play_turn` drives one inbound message to completion: load the
//! player's progress, decide the turn, persist when it changed, send the
//! reply. Store and gateway failures are logged and never fail the turn.

use hustle_core::clock::Clock;
use hustle_core::command::Command;
use hustle_core::error::DomainError;
use hustle_core::messaging::{MessagingGateway, OutboundMessage};
use hustle_core::repository::ProgressRepository;
use tracing::{error, info, instrument, warn};

use crate::domain::commands::PlayTurn;
use crate::domain::game::GameId;
use crate::domain::progress::PlayerProgress;
use crate::domain::resolver::resolve;
use crate::domain::script::{Choice, PromptNode, Script};

const MENU: &str =
    "Welcome! What game do you want to play?\n1. Choose Your Hustle\n2. Pick Up or Perish";
const RESTART_MENU: &str =
    "Welcome back! What game do you want to play?\n1. Choose Your Hustle\n2. Pick Up or Perish";
const CORRUPTED_STATE: &str = "Error: Invalid game state (missing outcomes for current question). Reply RESTART to begin anew.";
const UNEXPECTED_END: &str = "Unexpected game end. Reply RESTART to start again.";
const QUIESCENT_REPLY: &str = "Reply RESTART to start again.";

/// Which branch of the turn handled the message. Returned to the caller as
/// the turn acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAcknowledgement {
    /// The reset keyword wiped the record.
    Restarted,
    /// The message was read as a menu selection.
    GameSelectionHandled,
    /// The message answered the intro node.
    IntroChoiceProcessed,
    /// The record pointed at a node without outcomes and was ended.
    StateCorrupted,
    /// Any other turn.
    Processed,
}

impl TurnAcknowledgement {
    /// Human-readable acknowledgement text.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Restarted => "Game restarted.",
            Self::GameSelectionHandled => "Game selection handled.",
            Self::IntroChoiceProcessed => "Hustle intro choice processed.",
            Self::StateCorrupted => "Error in game state.",
            Self::Processed => "SMS received and processed successfully!",
        }
    }
}

/// The decision for one turn, before any I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TurnDecision {
    reply: String,
    acknowledgement: TurnAcknowledgement,
    persist: bool,
}

impl TurnDecision {
    fn persisted(reply: impl Into<String>, acknowledgement: TurnAcknowledgement) -> Self {
        Self {
            reply: reply.into(),
            acknowledgement,
            persist: true,
        }
    }

    fn unchanged(reply: impl Into<String>, acknowledgement: TurnAcknowledgement) -> Self {
        Self {
            reply: reply.into(),
            acknowledgement,
            persist: false,
        }
    }
}

/// Handles the `PlayTurn` command: loads progress (or starts a new record),
/// decides the turn, saves the record if the turn changed it, and sends
/// exactly one reply.
#[instrument(
    skip_all,
    fields(
        correlation_id = %command.correlation_id(),
        command = command.command_type(),
        phone_number = %command.phone_number(),
    )
)]
pub async fn handle_play_turn(
    command: &PlayTurn,
    script: &Script,
    clock: &dyn Clock,
    repo: &dyn ProgressRepository,
    gateway: &dyn MessagingGateway,
) -> TurnAcknowledgement {
    let mut progress = load_progress(&command.phone_number(), repo).await;

    let decision = decide_turn(command, script, &mut progress);

    if decision.persist {
        save_progress(&progress, clock, repo).await;
    }

    send_reply(&command.sender, decision.reply, gateway).await;

    info!(
        acknowledgement = ?decision.acknowledgement,
        net_worth = progress.net_worth(),
        current_q = progress.current_q(),
        "turn handled"
    );
    decision.acknowledgement
}

async fn load_progress(phone_number: &str, repo: &dyn ProgressRepository) -> PlayerProgress {
    match repo.load(phone_number).await {
        Ok(Some(record)) => {
            let stored_version = record.version;
            match PlayerProgress::from_record(record) {
                Ok(progress) => progress,
                Err(err) => {
                    error!(error = %err, "stored progress is unreadable; starting a new record");
                    // The next save must replace the unreadable row.
                    let mut progress = PlayerProgress::new(phone_number);
                    progress.version = stored_version;
                    progress
                }
            }
        }
        Ok(None) => {
            info!("new player");
            PlayerProgress::new(phone_number)
        }
        Err(err) => {
            error!(error = %err, "failed to load progress; starting a new record");
            PlayerProgress::new(phone_number)
        }
    }
}

async fn save_progress(
    progress: &PlayerProgress,
    clock: &dyn Clock,
    repo: &dyn ProgressRepository,
) {
    let record = progress.to_record(clock);
    match repo.save(&record, progress.version()).await {
        Ok(()) => info!(version = record.version, "progress saved"),
        Err(err @ DomainError::ConcurrencyConflict { .. }) => {
            warn!(error = %err, "progress changed concurrently; turn not saved");
        }
        Err(err) => error!(error = %err, "failed to save progress"),
    }
}

async fn send_reply(recipient: &str, text: String, gateway: &dyn MessagingGateway) {
    let message = OutboundMessage {
        recipient: recipient.to_owned(),
        text,
    };
    match gateway.send(&message).await {
        Ok(()) => info!(recipient, "reply sent"),
        Err(err) => error!(error = %err, recipient, "failed to send reply"),
    }
}

/// Decides one turn against `progress`, in strict priority order: reset,
/// game selection, in-progress game, quiescent fallback.
fn decide_turn(
    command: &PlayTurn,
    script: &Script,
    progress: &mut PlayerProgress,
) -> TurnDecision {
    if command.is_reset() {
        progress.restart();
        return TurnDecision::persisted(RESTART_MENU, TurnAcknowledgement::Restarted);
    }

    let Some(game) = progress.game() else {
        return select_game(&command.text, script, progress);
    };

    if game != GameId::Hustle || !progress.is_alive() {
        return TurnDecision::unchanged(QUIESCENT_REPLY, TurnAcknowledgement::Processed);
    }

    if progress.current_q() == Some(script.intro) {
        return answer_intro(&command.text, script, progress);
    }

    answer_question(&command.text, script, progress)
}

fn select_game(input: &str, script: &Script, progress: &mut PlayerProgress) -> TurnDecision {
    match GameId::from_menu_input(input) {
        Some(game) if game.is_playable() => {
            let Some((intro, _)) = script.intro_and_first_question() else {
                return corrupted(progress);
            };
            progress.select_game(game, script.intro);
            TurnDecision::persisted(intro.prompt_text(), TurnAcknowledgement::GameSelectionHandled)
        }
        Some(game) => TurnDecision::unchanged(
            format!(
                "{} is not ready yet. Try {} (reply 1).",
                game.title(),
                GameId::Hustle.title()
            ),
            TurnAcknowledgement::GameSelectionHandled,
        ),
        None => TurnDecision::unchanged(MENU, TurnAcknowledgement::GameSelectionHandled),
    }
}

/// The intro has no outcomes of its own: the first reply is resolved against
/// the node the intro points to.
fn answer_intro(input: &str, script: &Script, progress: &mut PlayerProgress) -> TurnDecision {
    let Some((intro, first)) = script.intro_and_first_question() else {
        progress.end_game();
        return TurnDecision::persisted(
            format!("Error: Game setup for {} is incorrect. Reply RESTART.", script.intro),
            TurnAcknowledgement::IntroChoiceProcessed,
        );
    };

    let Some(choice) = Choice::parse(input) else {
        return TurnDecision::unchanged(
            format!(
                "Please choose a valid option (1, 2, or 3) to start your hustle.\n{}",
                intro.options_text()
            ),
            TurnAcknowledgement::IntroChoiceProcessed,
        );
    };

    let Some(outcome) = first.outcome(choice) else {
        return TurnDecision::unchanged(
            format!(
                "Invalid choice. Please reply with 1, 2, or 3 for your first move.\n{}",
                intro.options_text()
            ),
            TurnAcknowledgement::IntroChoiceProcessed,
        );
    };

    let mut reply = resolve(script, outcome, progress);
    append_next_prompt(script, progress, &mut reply);
    TurnDecision::persisted(reply, TurnAcknowledgement::IntroChoiceProcessed)
}

fn answer_question(input: &str, script: &Script, progress: &mut PlayerProgress) -> TurnDecision {
    let Some(node) = progress
        .current_q()
        .and_then(|key| script.prompt(key))
        .filter(|node| node.outcomes().is_some())
    else {
        return corrupted(progress);
    };

    let Some(choice) = Choice::parse(input) else {
        return TurnDecision::unchanged(
            format!(
                "I don't understand that. Please choose an option (1, 2, 3) or reply RESTART.\n{}",
                node.options_text()
            ),
            TurnAcknowledgement::Processed,
        );
    };

    let Some(outcome) = node.outcome(choice) else {
        return TurnDecision::unchanged(
            format!(
                "Invalid choice. Please reply with 1, 2, or 3.\n{}",
                node.options_text()
            ),
            TurnAcknowledgement::Processed,
        );
    };

    let mut reply = resolve(script, outcome, progress);
    append_next_prompt(script, progress, &mut reply);
    TurnDecision::persisted(reply, TurnAcknowledgement::Processed)
}

fn corrupted(progress: &mut PlayerProgress) -> TurnDecision {
    warn!(current_q = progress.current_q(), "current node has no outcomes; ending game");
    progress.end_game();
    TurnDecision::persisted(CORRUPTED_STATE, TurnAcknowledgement::StateCorrupted)
}

/// After a resolved turn, shows the new current node. The check-win marker
/// needs nothing more; any other dead end ends the game.
fn append_next_prompt(script: &Script, progress: &mut PlayerProgress, reply: &mut String) {
    if !progress.is_alive() {
        return;
    }

    let next: Option<&PromptNode> = progress.current_q().and_then(|key| script.prompt(key));
    match next {
        Some(node) => {
            reply.push_str(&format!(
                "\n\nCurrent Net Worth: KES {}\n{}",
                progress.net_worth(),
                node.prompt_text()
            ));
        }
        None if progress.current_q() == Some(script.check_win) => {}
        None => {
            reply.push('\n');
            reply.push_str(UNEXPECTED_END);
            progress.end_game();
        }
    }
}

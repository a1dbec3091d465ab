//! Outcome resolution.
//!
//! Applies one outcome, and the random event it may trigger, to a player's
//! progress. The evaluation order is fixed: outcome effect, random event,
//! clamp, win check, next node.

use tracing::warn;

use super::progress::PlayerProgress;
use super::script::{Effect, EventTransition, Outcome, Script};

/// Applies `outcome` to `progress` and returns the composed reply.
///
/// Elimination from either the outcome or its random event makes the default
/// death message the whole reply. A living player always ends with a current
/// node: the resolved destination, or the intro when there is none.
pub fn resolve(script: &Script, outcome: &Outcome, progress: &mut PlayerProgress) -> String {
    let mut reply = outcome.message.to_owned();
    let mut pending_next = outcome.next_state;

    apply_effect(outcome.effect, progress);

    if let Some(event_key) = outcome.random_event {
        match script.random_event(event_key) {
            Some(event) => {
                reply.push('\n');
                reply.push_str(event.message);
                apply_effect(event.effect, progress);
                match event.next_state {
                    EventTransition::Inherit => {}
                    EventTransition::Goto(next) => pending_next = Some(next),
                    EventTransition::End => pending_next = None,
                }
            }
            None => warn!(event_key, "outcome references an unknown random event"),
        }
    }

    if !progress.is_alive() {
        return script.default_death_message.to_owned();
    }

    if progress.net_worth < 0 {
        progress.net_worth = 0;
    }

    if progress.net_worth >= script.goal {
        reply.push('\n');
        reply.push_str(script.win_message);
        reply.push_str(&format!("\nCurrent Net Worth: KES {}", progress.net_worth));
        progress.end_game();
        return reply;
    }

    progress.current_q = Some(pending_next.unwrap_or(script.intro).to_owned());
    reply
}

/// Applies one effect. Percentage deltas round toward negative infinity.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn apply_effect(effect: Effect, progress: &mut PlayerProgress) {
    match effect {
        Effect::NetWorth(delta) => progress.net_worth += delta,
        Effect::NetWorthPercentage(fraction) => {
            let delta = (progress.net_worth as f64 * fraction).floor() as i64;
            progress.net_worth += delta;
        }
        Effect::Eliminate => progress.end_game(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::game::GameId;
    use crate::domain::hustle::{CHECK_WIN, HUSTLE, INTRO};
    use crate::domain::progress::LifeStatus;
    use crate::domain::script::{Choice, Node, PromptNode, RandomEvent, Transition};

    fn player_at(node: &str, net_worth: i64) -> PlayerProgress {
        let mut progress = PlayerProgress::new("254700000001");
        progress.select_game(GameId::Hustle, node);
        progress.net_worth = net_worth;
        progress
    }

    fn hustle_outcome(node: &str, choice: Choice) -> &'static Outcome {
        HUSTLE.prompt(node).unwrap().outcome(choice).unwrap()
    }

    static DOUBLE_ELIMINATION_OUTCOMES: [(Choice, Outcome); 2] = [
        (
            Choice::One,
            Outcome {
                message: "You stepped on a rake.",
                effect: Effect::Eliminate,
                random_event: Some("aftershock"),
                next_state: Some("q1"),
            },
        ),
        (
            Choice::Two,
            Outcome {
                message: "You picked the stray path.",
                effect: Effect::NetWorth(-700),
                random_event: Some("detour"),
                next_state: None,
            },
        ),
    ];

    static TEST_SCRIPT: Script = Script {
        intro: "q1",
        check_win: "check_win",
        goal: 10_000,
        win_message: "You win.",
        default_death_message: "You died.",
        nodes: &[(
            "q1",
            Node::Prompt(PromptNode {
                message: "Pick.",
                options: &["1. Rake.", "2. Path."],
                transition: Transition::Outcomes(&DOUBLE_ELIMINATION_OUTCOMES),
            }),
        )],
        random_events: &[
            (
                "aftershock",
                RandomEvent {
                    message: "And then the roof fell in.",
                    effect: Effect::Eliminate,
                    next_state: EventTransition::Goto("q1"),
                },
            ),
            (
                "detour",
                RandomEvent {
                    message: "The path loops back.",
                    effect: Effect::NetWorthPercentage(-0.5),
                    next_state: EventTransition::Inherit,
                },
            ),
        ],
    };

    #[test]
    fn test_additive_effect_moves_to_next_node() {
        // Arrange
        let mut progress = player_at("hustle_q1", 0);

        // Act
        let reply = resolve(&HUSTLE, hustle_outcome("hustle_q1", Choice::One), &mut progress);

        // Assert
        assert!(reply.contains("+KES 5000"));
        assert_eq!(progress.net_worth(), 5000);
        assert_eq!(progress.current_q(), Some("hustle_q2"));
        assert!(progress.is_alive());
    }

    #[test]
    fn test_random_event_stacks_damage_and_overrides_destination() {
        // Arrange
        let mut progress = player_at("hustle_q2", 6000);

        // Act
        let reply = resolve(&HUSTLE, hustle_outcome("hustle_q2", Choice::One), &mut progress);

        // Assert
        assert_eq!(progress.net_worth(), 2000);
        assert_eq!(progress.current_q(), Some("hustle_q3"));
        assert!(reply.starts_with("You lent the money. Fingers crossed!\nOh no!"));
    }

    #[test]
    fn test_net_worth_is_clamped_at_zero() {
        // Arrange
        let mut progress = player_at("hustle_q2", 1500);

        // Act
        resolve(&HUSTLE, hustle_outcome("hustle_q2", Choice::One), &mut progress);

        // Assert
        assert_eq!(progress.net_worth(), 0);
        assert!(progress.is_alive());
        assert_eq!(progress.current_q(), Some("hustle_q3"));
    }

    #[test]
    fn test_percentage_event_applies_after_outcome_effect() {
        // Arrange
        let mut progress = player_at("hustle_q3", 2001);

        // Act
        let reply = resolve(&HUSTLE, hustle_outcome("hustle_q3", Choice::One), &mut progress);

        // Assert
        // 5001 + floor(5001 * -0.5) = 5001 - 2501.
        assert_eq!(progress.net_worth(), 2500);
        assert_eq!(progress.current_q(), Some("hustle_q4"));
        assert!(reply.contains("(-HALF)"));
    }

    #[test]
    fn test_percentage_rounds_toward_negative_infinity() {
        // Arrange
        let mut progress = player_at("q1", 1001);

        // Act
        resolve(
            &TEST_SCRIPT,
            TEST_SCRIPT.prompt("q1").unwrap().outcome(Choice::Two).unwrap(),
            &mut progress,
        );

        // Assert
        // 1001 - 700 = 301; floor(301 * -0.5) = -151.
        assert_eq!(progress.net_worth(), 150);
        assert_eq!(progress.current_q(), Some("q1"));
    }

    #[test]
    fn test_reaching_goal_wins_and_ends_game() {
        // Arrange
        let mut progress = player_at("hustle_q4", 2500);

        // Act
        let reply = resolve(&HUSTLE, hustle_outcome("hustle_q4", Choice::One), &mut progress);

        // Assert
        assert!(reply.contains("You hustled your way to KES 10,000!"));
        assert!(reply.ends_with("Current Net Worth: KES 10500"));
        assert_eq!(progress.net_worth(), 10500);
        assert_eq!(progress.status(), LifeStatus::Dead);
        assert_eq!(progress.game(), None);
        assert_eq!(progress.current_q(), None);
    }

    #[test]
    fn test_exit_below_goal_parks_on_check_win_marker() {
        let mut progress = player_at("hustle_q4", 500);

        let reply = resolve(&HUSTLE, hustle_outcome("hustle_q4", Choice::One), &mut progress);

        assert_eq!(reply, "You sold your hustle! A solid exit. (+KES 8000)");
        assert_eq!(progress.current_q(), Some(CHECK_WIN));
        assert!(progress.is_alive());
    }

    #[test]
    fn test_event_elimination_replaces_whole_reply() {
        // Arrange
        let mut progress = player_at("hustle_q4", 9000);

        // Act
        let reply = resolve(&HUSTLE, hustle_outcome("hustle_q4", Choice::Two), &mut progress);

        // Assert
        assert_eq!(reply, HUSTLE.default_death_message);
        assert_eq!(progress.status(), LifeStatus::Dead);
        assert_eq!(progress.game(), None);
        assert_eq!(progress.current_q(), None);
    }

    #[test]
    fn test_elimination_leaves_net_worth_untouched() {
        // Arrange
        let mut progress = player_at("hustle_q4", 6000);

        // Act
        resolve(&HUSTLE, hustle_outcome("hustle_q4", Choice::Two), &mut progress);

        // Assert
        // Only the outcome's -1500 applies; the crash ends the run as is.
        assert_eq!(progress.net_worth(), 4500);
        assert_eq!(progress.status(), LifeStatus::Dead);
    }

    #[test]
    fn test_outcome_elimination_keeps_prior_net_worth() {
        let mut progress = player_at("q1", 400);

        resolve(
            &TEST_SCRIPT,
            TEST_SCRIPT.prompt("q1").unwrap().outcome(Choice::One).unwrap(),
            &mut progress,
        );

        assert_eq!(progress.net_worth(), 400);
    }

    #[test]
    fn test_outcome_and_event_elimination_both_yield_default_death() {
        // Both sources eliminate; the last write wins and the reply is still
        // exactly the default death message.
        let mut progress = player_at("q1", 400);

        let reply = resolve(
            &TEST_SCRIPT,
            TEST_SCRIPT.prompt("q1").unwrap().outcome(Choice::One).unwrap(),
            &mut progress,
        );

        assert_eq!(reply, "You died.");
        assert_eq!(progress.status(), LifeStatus::Dead);
        assert_eq!(progress.current_q(), None);
    }

    #[test]
    fn test_missing_destination_falls_back_to_intro() {
        // Arrange
        static NOWHERE: Outcome = Outcome {
            message: "You drift.",
            effect: Effect::NetWorth(10),
            random_event: None,
            next_state: None,
        };
        let mut progress = player_at("hustle_q2", 0);

        // Act
        resolve(&HUSTLE, &NOWHERE, &mut progress);

        // Assert
        assert_eq!(progress.current_q(), Some(INTRO));
    }

    #[test]
    fn test_alive_net_worth_never_negative_across_all_outcomes() {
        for key in ["hustle_q1", "hustle_q2", "hustle_q3", "hustle_q4"] {
            for choice in [Choice::One, Choice::Two, Choice::Three] {
                for start in [0, 100, 1999, 4000] {
                    let mut progress = player_at(key, start);

                    resolve(&HUSTLE, hustle_outcome(key, choice), &mut progress);

                    if progress.is_alive() {
                        assert!(
                            progress.net_worth() >= 0,
                            "{key}/{} from {start} went negative",
                            choice.label()
                        );
                    }
                }
            }
        }
    }
}

//! The "Choose Your Hustle" script.

use super::script::{
    Choice, Effect, EventTransition, Node, Outcome, PromptNode, RandomEvent, Script, Transition,
};

/// Node shown right after the game is selected.
pub const INTRO: &str = "hustle_intro";
/// Synthetic destination of the guaranteed-exit outcome.
pub const CHECK_WIN: &str = "check_win";
/// Net worth that wins the game.
pub const HUSTLE_GOAL: i64 = 10_000;

const WIN_HUSTLE: &str = "Congratulations! You hustled your way to KES 10,000! You're a true urban survivor! 🎉 Reply RESTART to play again.";
const DEFAULT_DEATH: &str =
    "You made a fatal error. Your hustle ended here. 💀 Reply RESTART to start again.";

const Q1_OUTCOMES: [(Choice, Outcome); 3] = [
    (
        Choice::One,
        Outcome {
            message: "You blindly took the deal! It paid off big time! (+KES 5000)",
            effect: Effect::NetWorth(5000),
            random_event: None,
            next_state: Some("hustle_q2"),
        },
    ),
    (
        Choice::Two,
        Outcome {
            message: "He got impatient and pulled out. You wasted time. (-KES 1000)",
            effect: Effect::NetWorth(-1000),
            random_event: None,
            next_state: Some("hustle_q2"),
        },
    ),
    (
        Choice::Three,
        Outcome {
            message: "You dodged a bullet, but also missed an opportunity. (No change)",
            effect: Effect::NetWorth(0),
            random_event: None,
            next_state: Some("hustle_q2"),
        },
    ),
];

const Q2_OUTCOMES: [(Choice, Outcome); 3] = [
    (
        Choice::One,
        Outcome {
            message: "You lent the money. Fingers crossed!",
            effect: Effect::NetWorth(-2000),
            random_event: Some("ghosted"),
            next_state: None,
        },
    ),
    (
        Choice::Two,
        Outcome {
            message: "You lent half. Better safe than sorry.",
            effect: Effect::NetWorth(-1000),
            random_event: None,
            next_state: Some("hustle_q3"),
        },
    ),
    (
        Choice::Three,
        Outcome {
            message: "You kept your funds. Wise choice.",
            effect: Effect::NetWorth(0),
            random_event: None,
            next_state: Some("hustle_q3"),
        },
    ),
];

const Q3_OUTCOMES: [(Choice, Outcome); 3] = [
    (
        Choice::One,
        Outcome {
            message: "You bet big on AI fashion!",
            effect: Effect::NetWorth(3000),
            random_event: Some("ai_boom_bust"),
            next_state: None,
        },
    ),
    (
        Choice::Two,
        Outcome {
            message: "Your careful pivot yields steady growth. (+KES 1000)",
            effect: Effect::NetWorth(1000),
            random_event: None,
            next_state: Some("hustle_q4"),
        },
    ),
    (
        Choice::Three,
        Outcome {
            message: "You missed out on new opportunities. (-KES 500)",
            effect: Effect::NetWorth(-500),
            random_event: None,
            next_state: Some("hustle_q4"),
        },
    ),
];

const Q4_OUTCOMES: [(Choice, Outcome); 3] = [
    (
        Choice::One,
        Outcome {
            message: "You sold your hustle! A solid exit. (+KES 8000)",
            effect: Effect::NetWorth(8000),
            random_event: None,
            next_state: Some(CHECK_WIN),
        },
    ),
    (
        Choice::Two,
        Outcome {
            message: "You hold on, hoping for more. (-KES 1500)",
            effect: Effect::NetWorth(-1500),
            random_event: Some("market_crash"),
            next_state: None,
        },
    ),
    (
        Choice::Three,
        Outcome {
            message: "Your counter-offer was too high. They walked away.",
            effect: Effect::NetWorth(0),
            random_event: Some("negotiation_fail"),
            next_state: None,
        },
    ),
];

/// The complete hustle script.
pub static HUSTLE: Script = Script {
    intro: INTRO,
    check_win: CHECK_WIN,
    goal: HUSTLE_GOAL,
    win_message: WIN_HUSTLE,
    default_death_message: DEFAULT_DEATH,
    nodes: &[
        (
            INTRO,
            Node::Prompt(PromptNode {
                message: "Welcome to Choose Your Hustle! Reach KES 10,000 net worth. To start, what's your first move?",
                options: &[
                    "1. Look for a formal job.",
                    "2. Start a small side hustle.",
                    "3. Try your luck with a quick crypto trade.",
                ],
                transition: Transition::Next("hustle_q1"),
            }),
        ),
        (
            "hustle_q1",
            Node::Prompt(PromptNode {
                message: "A potential investor hears about your idea and wants to invest. He offers a very high amount because he is very intrigued. He is impatient and wants you to go all in or leave it.",
                options: &[
                    "1. Take it, no questions asked (Big risk, big reward).",
                    "2. Ask for a meeting to review terms (Cautious).",
                    "3. Reject, too good to be true (Safe).",
                ],
                transition: Transition::Outcomes(&Q1_OUTCOMES),
            }),
        ),
        (
            "hustle_q2",
            Node::Prompt(PromptNode {
                message: "Your cousin asks to borrow KES 2000 for an emergency. They promise to pay back next week.",
                options: &[
                    "1. Lend them the money (Goodwill).",
                    "2. Lend half, keep half (Cautious).",
                    "3. Say no, you need the money (Self-preservation).",
                ],
                transition: Transition::Outcomes(&Q2_OUTCOMES),
            }),
        ),
        (
            "hustle_q3",
            Node::Prompt(PromptNode {
                message: "A new tech trend emerges: AI-powered personalized fashion. Do you pivot?",
                options: &[
                    "1. Go all-in, invest heavily in AI tools (High risk, potential high reward).",
                    "2. Research and learn first, make small changes (Calculated risk).",
                    "3. Stick to your original plan, avoid fads (Conservative).",
                ],
                transition: Transition::Outcomes(&Q3_OUTCOMES),
            }),
        ),
        (
            "hustle_q4",
            Node::Prompt(PromptNode {
                message: "Your biggest competitor offers to buy your side hustle for KES 8,000. Do you sell or keep building?",
                options: &[
                    "1. Sell now, take the guaranteed money.",
                    "2. Reject, you believe it's worth more.",
                    "3. Counter-offer for KES 12,000.",
                ],
                transition: Transition::Outcomes(&Q4_OUTCOMES),
            }),
        ),
        (
            "death_scam",
            Node::Terminal(
                "You joined a WhatsApp forex group. Now you’re broke and blocked. 💀 Reply RESTART to start again.",
            ),
        ),
        (
            "death_starved",
            Node::Terminal(
                "You thought wild berries were a meal. They were poison. You now rest with the frogs. 💀 Reply RESTART to start again.",
            ),
        ),
        ("win_hustle", Node::Terminal(WIN_HUSTLE)),
        ("default_death", Node::Terminal(DEFAULT_DEATH)),
    ],
    random_events: &[
        (
            "ghosted",
            RandomEvent {
                message: "Oh no! Your cousin ghosted you! That KES 2000 is gone forever. (-KES 2000)",
                effect: Effect::NetWorth(-2000),
                next_state: EventTransition::Goto("hustle_q3"),
            },
        ),
        (
            "ponzi",
            RandomEvent {
                message: "You invested in a 'guaranteed' crypto scheme. It was a Ponzi. You lost everything! (-ALL)",
                effect: Effect::Eliminate,
                next_state: EventTransition::End,
            },
        ),
        (
            "ai_boom_bust",
            RandomEvent {
                message: "The AI bubble burst! You lost half your net worth but learned a valuable lesson. (-HALF)",
                effect: Effect::NetWorthPercentage(-0.5),
                next_state: EventTransition::Goto("hustle_q4"),
            },
        ),
        (
            "market_crash",
            RandomEvent {
                message: "The market crashed right after you rejected the offer! Your hustle's value plummeted. (-ALL)",
                effect: Effect::Eliminate,
                next_state: EventTransition::End,
            },
        ),
        (
            "negotiation_fail",
            RandomEvent {
                message: "Your reputation for greed spread. No one wants to do business with you. (-1000)",
                effect: Effect::NetWorth(-1000),
                next_state: EventTransition::Goto("hustle_q4"),
            },
        ),
    ],
};

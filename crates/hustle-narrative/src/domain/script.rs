//! Narrative script model.
//!
//! A script is an immutable lookup table of nodes and random events. Prompt
//! nodes either point unconditionally at the next node (the intro) or map each
//! choice label to an [`Outcome`]; terminal nodes only carry a message.

use hustle_core::error::DomainError;

/// A choice label a player can reply with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    /// Reply `1`.
    One,
    /// Reply `2`.
    Two,
    /// Reply `3`.
    Three,
}

impl Choice {
    /// Parses normalized input into a choice label.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(Self::One),
            "2" => Some(Self::Two),
            "3" => Some(Self::Three),
            _ => None,
        }
    }

    /// The label as the player types it.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
        }
    }
}

/// Effect applied to a player's net worth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Add a signed amount.
    NetWorth(i64),
    /// Add `floor(net_worth * fraction)`; the fraction is signed, e.g. `-0.5`.
    NetWorthPercentage(f64),
    /// The player dies.
    Eliminate,
}

/// The result of picking one option at a prompt node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// Reply text.
    pub message: &'static str,
    /// Effect on net worth.
    pub effect: Effect,
    /// Key of a random event triggered after the effect.
    pub random_event: Option<&'static str>,
    /// Destination node; `None` ends the chain and falls back to the intro.
    pub next_state: Option<&'static str>,
}

/// How a random event changes the destination chosen by its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTransition {
    /// Keep the outcome's destination.
    Inherit,
    /// Replace the destination with this node.
    Goto(&'static str),
    /// Replace the destination with none.
    End,
}

/// A secondary effect triggered by an outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomEvent {
    /// Text appended to the outcome's reply.
    pub message: &'static str,
    /// Effect on net worth.
    pub effect: Effect,
    /// Destination override.
    pub next_state: EventTransition,
}

/// Where a prompt node leads.
#[derive(Debug, Clone, Copy)]
pub enum Transition {
    /// Unconditional move to another node (used by the intro).
    Next(&'static str),
    /// Outcome per choice label.
    Outcomes(&'static [(Choice, Outcome)]),
}

/// A node that asks the player something.
#[derive(Debug, Clone, Copy)]
pub struct PromptNode {
    /// Question text.
    pub message: &'static str,
    /// Option lines, already numbered.
    pub options: &'static [&'static str],
    /// Where the node leads.
    pub transition: Transition,
}

impl PromptNode {
    /// The outcome table, if this node has one.
    #[must_use]
    pub fn outcomes(&self) -> Option<&'static [(Choice, Outcome)]> {
        match self.transition {
            Transition::Outcomes(outcomes) => Some(outcomes),
            Transition::Next(_) => None,
        }
    }

    /// The outcome for a choice, if the node defines one.
    #[must_use]
    pub fn outcome(&self, choice: Choice) -> Option<&'static Outcome> {
        self.outcomes()?
            .iter()
            .find(|(label, _)| *label == choice)
            .map(|(_, outcome)| outcome)
    }

    /// Option lines joined by newlines.
    #[must_use]
    pub fn options_text(&self) -> String {
        self.options.join("\n")
    }

    /// Message followed by the option lines.
    #[must_use]
    pub fn prompt_text(&self) -> String {
        format!("{}\n{}", self.message, self.options_text())
    }
}

/// A step in the narrative graph.
#[derive(Debug, Clone, Copy)]
pub enum Node {
    /// Asks the player to choose.
    Prompt(PromptNode),
    /// Fixed message with no further transition.
    Terminal(&'static str),
}

/// A complete narrative game.
#[derive(Debug)]
pub struct Script {
    /// Key of the node shown when the game is selected.
    pub intro: &'static str,
    /// Synthetic destination meaning "the resolver already checked for a win".
    pub check_win: &'static str,
    /// Net worth that wins the game.
    pub goal: i64,
    /// Appended to the reply on a win.
    pub win_message: &'static str,
    /// Final reply whenever the player is eliminated.
    pub default_death_message: &'static str,
    /// Nodes by key.
    pub nodes: &'static [(&'static str, Node)],
    /// Random events by key.
    pub random_events: &'static [(&'static str, RandomEvent)],
}

impl Script {
    /// Looks up a node.
    #[must_use]
    pub fn node(&self, key: &str) -> Option<&'static Node> {
        self.nodes
            .iter()
            .find(|(node_key, _)| *node_key == key)
            .map(|(_, node)| node)
    }

    /// Looks up a node and returns it only if it is a prompt.
    #[must_use]
    pub fn prompt(&self, key: &str) -> Option<&'static PromptNode> {
        match self.node(key)? {
            Node::Prompt(prompt) => Some(prompt),
            Node::Terminal(_) => None,
        }
    }

    /// Looks up a random event.
    #[must_use]
    pub fn random_event(&self, key: &str) -> Option<&'static RandomEvent> {
        self.random_events
            .iter()
            .find(|(event_key, _)| *event_key == key)
            .map(|(_, event)| event)
    }

    /// The intro node and the node whose outcomes resolve the player's first reply.
    #[must_use]
    pub fn intro_and_first_question(&self) -> Option<(&'static PromptNode, &'static PromptNode)> {
        let intro = self.prompt(self.intro)?;
        let Transition::Next(first) = intro.transition else {
            return None;
        };
        let first = self.prompt(first)?;
        first.outcomes()?;
        Some((intro, first))
    }

    fn is_destination(&self, key: &str) -> bool {
        key == self.check_win || self.node(key).is_some()
    }

    /// Checks the graph invariants: every destination exists (or is the
    /// check-win marker), every referenced random event exists, and the intro
    /// leads to a node with outcomes.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first broken reference.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.intro_and_first_question().is_none() {
            return Err(DomainError::Validation(format!(
                "intro node {} must lead to a node with outcomes",
                self.intro
            )));
        }

        for (key, node) in self.nodes {
            let Node::Prompt(prompt) = node else {
                continue;
            };
            match prompt.transition {
                Transition::Next(next) if !self.is_destination(next) => {
                    return Err(DomainError::Validation(format!(
                        "node {key} points at unknown node {next}"
                    )));
                }
                Transition::Next(_) => {}
                Transition::Outcomes(outcomes) => {
                    for (choice, outcome) in outcomes {
                        self.validate_outcome(key, *choice, outcome)?;
                    }
                }
            }
        }

        for (key, event) in self.random_events {
            if let EventTransition::Goto(next) = event.next_state
                && !self.is_destination(next)
            {
                return Err(DomainError::Validation(format!(
                    "random event {key} points at unknown node {next}"
                )));
            }
        }

        Ok(())
    }

    fn validate_outcome(
        &self,
        key: &str,
        choice: Choice,
        outcome: &Outcome,
    ) -> Result<(), DomainError> {
        if let Some(next) = outcome.next_state
            && !self.is_destination(next)
        {
            return Err(DomainError::Validation(format!(
                "outcome {} of node {key} points at unknown node {next}",
                choice.label()
            )));
        }
        if let Some(event) = outcome.random_event
            && self.random_event(event).is_none()
        {
            return Err(DomainError::Validation(format!(
                "outcome {} of node {key} references unknown random event {event}",
                choice.label()
            )));
        }
        Ok(())
    }
}

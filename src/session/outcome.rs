//! What a round did, in the form a renderer consumes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Visual variant for an eliminated participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EliminationStyle {
    Puff,
    Shrink,
}

impl EliminationStyle {
    /// Variants a round picks from.
    pub const ALL: [EliminationStyle; 2] = [EliminationStyle::Puff, EliminationStyle::Shrink];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EliminationStyle::Puff => "puff",
            EliminationStyle::Shrink => "shrink",
        }
    }
}

/// Lasting visual state of a participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Presentation {
    Eliminated(EliminationStyle),
    Winner,
}

/// Result of one round for one participant who was live when it began.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeKind {
    Eliminated(EliminationStyle),
    Winner,
    Survived,
    /// Nobody was eliminated this round.
    NoOpShake,
}

impl OutcomeKind {
    /// Stable lowercase name for renderers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            OutcomeKind::Eliminated(_) => "eliminated",
            OutcomeKind::Winner => "winner",
            OutcomeKind::Survived => "survived",
            OutcomeKind::NoOpShake => "no-op-shake",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantOutcome {
    pub name: String,
    pub kind: OutcomeKind,
}

impl ParticipantOutcome {
    pub fn new(name: impl Into<String>, kind: OutcomeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Identifies one raised "no casualties" signal.
///
/// A timer that wants to clear the signal hands its token back; the clear
/// only happens if no newer round has replaced the signal since.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShakeToken(pub u64);

/// Everything one `play_round` call produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundReport {
    /// Round counter after this round.
    pub round_number: u64,

    /// Denominator actually used, after clamping.
    pub num_chances: u32,

    /// One entry per participant live at the start of the round, in seat order.
    pub outcomes: Vec<ParticipantOutcome>,

    /// Names eliminated this round, in elimination order.
    pub eliminated: SmallVec<[String; 4]>,

    /// The winner, if one exists after this round.
    pub winner: Option<String>,

    /// Set when the round eliminated nobody and no winner exists.
    pub shake: Option<ShakeToken>,
}

impl RoundReport {
    /// True if the round ran without eliminating anyone.
    #[must_use]
    pub fn is_no_op(&self) -> bool {
        self.eliminated.is_empty()
    }

    /// Outcome for `name`, if they took part.
    #[must_use]
    pub fn outcome_for(&self, name: &str) -> Option<OutcomeKind> {
        self.outcomes
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.kind)
    }
}

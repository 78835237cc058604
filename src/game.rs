//! Match bookkeeping: first to three round wins (or losses) ends the match.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::audio::SoundName;

/// Round wins or losses that end a match.
pub const ROUNDS_TO_FINISH: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    Rock,
    Paper,
    Scissors,
}

impl Gesture {
    pub const ALL: [Gesture; 3] = [Gesture::Rock, Gesture::Paper, Gesture::Scissors];

    pub fn beats(self, other: Gesture) -> bool {
        matches!(
            (self, other),
            (Gesture::Rock, Gesture::Scissors)
                | (Gesture::Paper, Gesture::Rock)
                | (Gesture::Scissors, Gesture::Paper)
        )
    }

    /// Result of this gesture (the player's) against `other`.
    pub fn against(self, other: Gesture) -> RoundResult {
        if self == other {
            RoundResult::Draw
        } else if self.beats(other) {
            RoundResult::Win
        } else {
            RoundResult::Lose
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Gesture {
        *Gesture::ALL.choose(rng).unwrap_or(&Gesture::Rock)
    }

    pub fn label(self) -> &'static str {
        match self {
            Gesture::Rock => "rock",
            Gesture::Paper => "paper",
            Gesture::Scissors => "scissors",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundResult {
    Win,
    Lose,
    Draw,
}

impl RoundResult {
    pub fn sound(self) -> SoundName {
        match self {
            RoundResult::Win => SoundName::Win,
            RoundResult::Lose => SoundName::Lose,
            RoundResult::Draw => SoundName::Draw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalResult {
    Win,
    Lose,
}

impl FinalResult {
    pub fn sound(self) -> SoundName {
        match self {
            FinalResult::Win => SoundName::YouWin,
            FinalResult::Lose => SoundName::Lose,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchProgress {
    Continue {
        current_round: u32,
        wins: u32,
        losses: u32,
    },
    GameOver(FinalResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchState {
    current_round: u32,
    wins: u32,
    losses: u32,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            current_round: 1,
            wins: 0,
            losses: 0,
        }
    }
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    /// Applies a round result. A deciding round does not advance the round
    /// counter; a draw is replayed under the same number.
    pub fn record(&mut self, result: RoundResult) -> MatchProgress {
        match result {
            RoundResult::Win => {
                self.wins += 1;
                if self.wins >= ROUNDS_TO_FINISH {
                    return MatchProgress::GameOver(FinalResult::Win);
                }
                self.current_round += 1;
            }
            RoundResult::Lose => {
                self.losses += 1;
                if self.losses >= ROUNDS_TO_FINISH {
                    return MatchProgress::GameOver(FinalResult::Lose);
                }
                self.current_round += 1;
            }
            RoundResult::Draw => {}
        }
        MatchProgress::Continue {
            current_round: self.current_round,
            wins: self.wins,
            losses: self.losses,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn gesture_outcomes() {
        assert_eq!(Gesture::Rock.against(Gesture::Scissors), RoundResult::Win);
        assert_eq!(Gesture::Rock.against(Gesture::Paper), RoundResult::Lose);
        assert_eq!(Gesture::Paper.against(Gesture::Paper), RoundResult::Draw);
        for player in Gesture::ALL {
            for computer in Gesture::ALL {
                let forward = player.against(computer);
                let backward = computer.against(player);
                match forward {
                    RoundResult::Win => assert_eq!(backward, RoundResult::Lose),
                    RoundResult::Lose => assert_eq!(backward, RoundResult::Win),
                    RoundResult::Draw => assert_eq!(backward, RoundResult::Draw),
                }
            }
        }
    }

    #[test]
    fn draws_do_not_advance_the_round() {
        let mut state = MatchState::new();
        assert_eq!(
            state.record(RoundResult::Draw),
            MatchProgress::Continue {
                current_round: 1,
                wins: 0,
                losses: 0
            }
        );
        assert_eq!(
            state.record(RoundResult::Win),
            MatchProgress::Continue {
                current_round: 2,
                wins: 1,
                losses: 0
            }
        );
    }

    #[test]
    fn third_win_ends_the_match() {
        let mut state = MatchState::new();
        state.record(RoundResult::Win);
        state.record(RoundResult::Lose);
        state.record(RoundResult::Win);
        assert_eq!(state.current_round(), 4);
        assert_eq!(
            state.record(RoundResult::Win),
            MatchProgress::GameOver(FinalResult::Win)
        );
        assert_eq!(state.wins(), 3);
        assert_eq!(state.current_round(), 4);
    }

    #[test]
    fn third_loss_ends_the_match() {
        let mut state = MatchState::new();
        for _ in 0..2 {
            state.record(RoundResult::Lose);
        }
        assert_eq!(
            state.record(RoundResult::Lose),
            MatchProgress::GameOver(FinalResult::Lose)
        );
        assert_eq!(state.losses(), 3);
    }

    #[test]
    fn random_gestures_cover_all_choices() {
        let mut rng = StdRng::seed_from_u64(7);
        let picks: Vec<Gesture> = (0..64).map(|_| Gesture::random(&mut rng)).collect();
        for gesture in Gesture::ALL {
            assert!(picks.contains(&gesture));
        }
    }

    #[test]
    fn result_sounds() {
        assert_eq!(RoundResult::Draw.sound(), SoundName::Draw);
        assert_eq!(FinalResult::Win.sound(), SoundName::YouWin);
    }
}

use std::fmt;

/// How hard the computer plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Position between the easy and hard weight of every heuristic.
    pub const fn multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 0.0,
            Difficulty::Medium => 0.5,
            Difficulty::Hard => 1.0,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

/// A weight interpolated between its easy and hard settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigurationValue {
    pub easy: f64,
    pub hard: f64,
    pub multiplier: f64,
}

impl ConfigurationValue {
    pub const fn new(easy: f64, hard: f64, multiplier: f64) -> Self {
        Self {
            easy,
            hard,
            multiplier,
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.easy + (self.hard - self.easy) * self.multiplier
    }
}

/// Weights of every board rater plus the suicide penalty.
#[derive(Debug, Clone, PartialEq)]
pub struct AiConfiguration {
    pub difficulty: Difficulty,
    pub suicide_multiplier: ConfigurationValue,
    pub count_pieces: ConfigurationValue,
    pub board_dominance: ConfigurationValue,
    pub center_ownership: ConfigurationValue,
    pub center_dominance: ConfigurationValue,
    pub threatened_pieces: ConfigurationValue,
    pub pawn_progression: ConfigurationValue,
    pub king_surrounding_possession: ConfigurationValue,
    pub checkmate_opportunity: ConfigurationValue,
    pub center_four_occupation: ConfigurationValue,
}

impl AiConfiguration {
    pub const fn new(difficulty: Difficulty) -> Self {
        let m = difficulty.multiplier();
        Self {
            difficulty,
            suicide_multiplier: ConfigurationValue::new(0.0, 0.0, m),
            count_pieces: ConfigurationValue::new(3.0, 3.0, m),
            board_dominance: ConfigurationValue::new(0.0, 0.1, m),
            center_ownership: ConfigurationValue::new(0.1, 0.3, m),
            center_dominance: ConfigurationValue::new(0.0, 0.3, m),
            threatened_pieces: ConfigurationValue::new(0.0, 1.5, m),
            pawn_progression: ConfigurationValue::new(0.1, 1.0, m),
            king_surrounding_possession: ConfigurationValue::new(0.0, 0.3, m),
            checkmate_opportunity: ConfigurationValue::new(0.0, 2.0, m),
            center_four_occupation: ConfigurationValue::new(0.1, 0.3, m),
        }
    }
}

impl Default for AiConfiguration {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

//! Computer player: weighted board raters over every legal reply.

pub mod configuration;
pub mod player;
pub mod rater;

pub use configuration::{AiConfiguration, ConfigurationValue, Difficulty};
pub use player::{AiPlayer, Choice, Move, legal_moves};
pub use rater::Rater;

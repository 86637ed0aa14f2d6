pub mod bloom;
pub mod family;
pub mod prediction;

pub use bloom::{BloomLevel, CANONICAL_LEVELS};
pub use family::ModelFamily;
pub use prediction::{BatchItemOutcome, ClassificationResult, RawPrediction, VoteTally};

pub mod adjustment;
pub mod components;
pub mod config;
pub mod engine;
pub mod explain;
pub mod extract;
pub mod factors;
pub mod industry;
pub mod record;
pub mod rules;
pub mod validation;

pub use adjustment::{Adjustment, AdjustmentSignal};
pub use components::ComponentScores;
pub use config::*;
pub use engine::{BatchOutcome, EntityInput, Priority, ScoreResult, ScoringEngine, UNKNOWN_ENTITY};
pub use factors::RangeOp;
pub use industry::{IndustryMatch, DEFAULT_INDUSTRY};
pub use record::{EntityRecord, Field};
pub use validation::validate_scoring;

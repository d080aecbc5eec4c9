mod client;
mod trainer;

pub use client::{
    map_relationship, MockRelatedWords, RelatedWordsSource, WordRelationship, WordnikClient,
    WordnikConfig,
};
pub use trainer::{Trainer, TrainingConfig, TrainingStats};

mod argv;
mod stem;

pub use argv::split_into_argv;
pub use stem::{normalize_phrase, normalize_words, stem};

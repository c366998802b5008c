pub mod classifier;
pub mod coverage;
pub mod cursor;
pub mod documentation;
pub mod expression;
pub mod language;
pub mod source;
pub mod types;

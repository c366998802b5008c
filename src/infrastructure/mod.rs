// Infrastructure implementations for Delineate.

pub mod concurrency;
pub mod fixture;
pub mod image;
pub mod json_writer;

pub use fixture::FixtureFrontend;
pub use image::{Finalized, Image, ImageSummary};
pub use json_writer::{JsonWriter, WriteError};

//! Chunk delivery to the device topic and whole-blob accumulation.
//!
//! Every retrieved chunk is published to the device-facing topic as its own
//! message, fire-and-forget, while the dispatcher accumulates the base64
//! encoding of the full blob for the session's final result. Publish
//! failures are logged and never affect the session outcome; blob
//! reassembly is correct independently of sink delivery.

mod dispatcher;
mod error;
mod sink;

pub use dispatcher::ChunkDispatcher;
pub use error::PublishError;
pub use sink::{ChunkMessage, HttpPublisher, PublishSink};

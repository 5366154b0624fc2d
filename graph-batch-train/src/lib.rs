//! Epoch driver and loss reporting over packed graph batches
//!
//! This crate drives an autoencoder training or evaluation epoch over the
//! batches a [`BatchPacker`](graph_batch_pack::BatchPacker) produces. The
//! model, optimizer and per-field loss functions are external
//! collaborators reached only through the narrow traits defined here; the
//! driver owns batch consumption, loss bookkeeping and the per-field loss
//! report.

#![warn(missing_docs)]

pub mod epoch;
pub mod error;
pub mod loss;
pub mod model;

// Re-export key types for convenience
pub use epoch::{run_epoch, run_over_components, EpochLosses, EpochReport};
pub use error::{Error, Result};
pub use loss::{compute_losses, FieldLossSet, LossPolicy, SumPolicy};
pub use model::{Autoencoder, Optimizer, Reconstruction};

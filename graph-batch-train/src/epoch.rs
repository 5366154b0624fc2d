//! Epoch loops over packed batches

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use graph_batch_core::schema::FieldSpec;
use graph_batch_core::source::ComponentSource;
use graph_batch_pack::{BatchPacker, PackerConfig};

use crate::error::Result;
use crate::loss::{compute_losses, FieldLossSet, LossPolicy};
use crate::model::{Autoencoder, Optimizer};

/// Accumulated losses from one pass over a component source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpochLosses {
    /// Combined loss summed over all batches
    pub total: f32,

    /// Per-field loss history, one value per batch the field appeared in
    pub by_field: HashMap<String, Vec<f32>>,
}

/// Per-field reconstruction losses for one train/dev epoch
///
/// Serializable for the external reporting surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpochReport {
    /// Losses over the training data
    pub train: EpochLosses,

    /// Losses over the dev data
    pub dev: EpochLosses,
}

impl EpochReport {
    /// Serialize this report as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Run one pass over a component source
///
/// Pulls batches from a fresh packer until exhaustion; per batch, clears
/// gradients, runs the model forward, gathers per-field losses and
/// combines them under the policy. When `train` is set the combined loss
/// is back-propagated and the optimizer stepped. The model's previous
/// training mode is restored afterwards.
#[allow(clippy::too_many_arguments)]
pub fn run_over_components<M, O, S, R>(
    model: &mut M,
    optimizer: &mut O,
    losses: &FieldLossSet,
    policy: &dyn LossPolicy,
    source: &S,
    spec: &FieldSpec,
    config: &PackerConfig,
    rng: &mut R,
    train: bool,
) -> Result<EpochLosses>
where
    M: Autoencoder,
    O: Optimizer,
    S: ComponentSource,
    R: Rng,
{
    let old_mode = model.training();
    model.set_training(train);

    let mut accumulated = EpochLosses::default();
    let packer = BatchPacker::new(source, spec, config.clone(), &mut *rng)?;
    for batch in packer {
        let batch = batch?;
        optimizer.zero_grad();
        let reconstruction = model.forward(&batch)?;
        let by_field = compute_losses(&batch, &reconstruction, spec, losses)?;
        let batch_loss = policy.combine(&by_field);
        accumulated.total += batch_loss;
        if train {
            model.backward(batch_loss)?;
            optimizer.step();
        }
        for (name, loss) in by_field {
            accumulated.by_field.entry(name).or_default().push(loss);
        }
    }

    model.set_training(old_mode);
    Ok(accumulated)
}

/// Run one full epoch: a training pass and a dev evaluation pass
#[allow(clippy::too_many_arguments)]
pub fn run_epoch<M, O, S, T, R>(
    model: &mut M,
    optimizer: &mut O,
    losses: &FieldLossSet,
    policy: &dyn LossPolicy,
    train_data: &S,
    dev_data: &T,
    spec: &FieldSpec,
    config: &PackerConfig,
    rng: &mut R,
) -> Result<EpochReport>
where
    M: Autoencoder,
    O: Optimizer,
    S: ComponentSource,
    T: ComponentSource,
    R: Rng,
{
    let train = run_over_components(
        model, optimizer, losses, policy, train_data, spec, config, rng, true,
    )?;
    let dev = run_over_components(
        model, optimizer, losses, policy, dev_data, spec, config, rng, false,
    )?;
    info!(
        train_loss = train.total,
        dev_loss = dev.total,
        "epoch complete"
    );
    Ok(EpochReport { train, dev })
}

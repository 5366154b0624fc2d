//! Budgeted batch packing over a component source

use std::mem;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use graph_batch_core::component::Component;
use graph_batch_core::error::{Error, Result};
use graph_batch_core::schema::FieldSpec;
use graph_batch_core::source::ComponentSource;
use graph_batch_core::Batch;

use crate::split::split_batch;
use crate::stack::stack_batch;

/// Configuration for a [`BatchPacker`]
#[derive(Debug, Clone)]
pub struct PackerConfig {
    /// Entity budget per batch
    pub batch_size: usize,

    /// Never emit a batch larger than the budget
    ///
    /// With `subselect` off, a component larger than the budget is
    /// dropped entirely rather than emitted oversized.
    pub strict: bool,

    /// Allow splitting a component across multiple batches
    pub subselect: bool,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            batch_size: 1024,
            strict: false,
            subselect: true,
        }
    }
}

impl PackerConfig {
    /// Create a configuration with the given entity budget
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size,
            ..Self::default()
        }
    }

    /// Builder: set the strict flag
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Builder: set the subselect flag
    pub fn with_subselect(mut self, subselect: bool) -> Self {
        self.subselect = subselect;
        self
    }
}

/// Lazy iterator of stacked batches over a component source
///
/// Components are visited in a random order fixed at construction, and
/// accumulated into batches under the configured entity budget. The
/// sequence is finite, single-pass, and not restartable; a fresh packer
/// draws a fresh order from its generator.
///
/// How a component that cannot join the running batch is handled depends
/// on the flags:
///
/// - `subselect`: the component is split so the running batch fills to
///   exactly the budget, and the remainder carries over.
/// - neither flag, component over budget: it is emitted alone, oversized.
/// - `strict` without `subselect`, component over budget: it is dropped,
///   counted by [`dropped_components`](Self::dropped_components).
#[derive(Debug)]
pub struct BatchPacker<'a, S, R> {
    /// Source the components are pulled from
    source: &'a S,

    /// Canonical field set for stacking
    spec: &'a FieldSpec,

    /// Packing policy
    config: PackerConfig,

    /// Injected randomness for split selection
    rng: R,

    /// Randomized component visit order
    order: Vec<usize>,

    /// Position of the next unvisited component in `order`
    position: usize,

    /// Remainder of a partially consumed component
    pending: Option<Component>,

    /// Components accumulated for the next batch
    current_batch: Vec<Component>,

    /// Summed entity count of the accumulator
    current_total: usize,

    /// Components dropped on the strict path
    dropped: usize,
}

impl<'a, S: ComponentSource, R: Rng> BatchPacker<'a, S, R> {
    /// Create a packer, shuffling the component order with `rng`
    pub fn new(
        source: &'a S,
        spec: &'a FieldSpec,
        config: PackerConfig,
        mut rng: R,
    ) -> Result<Self> {
        if config.batch_size == 0 {
            return Err(Error::InvalidInput(
                "batch_size must be at least 1".to_string(),
            ));
        }

        let mut order: Vec<usize> = (0..source.num_components()).collect();
        order.shuffle(&mut rng);

        Ok(Self {
            source,
            spec,
            config,
            rng,
            order,
            position: 0,
            pending: None,
            current_batch: Vec::new(),
            current_total: 0,
            dropped: 0,
        })
    }

    /// Number of components dropped so far on the strict path
    pub fn dropped_components(&self) -> usize {
        self.dropped
    }

    /// Stack and reset the accumulator
    fn flush(&mut self) -> Result<Batch> {
        let components = mem::take(&mut self.current_batch);
        self.current_total = 0;
        let batch = stack_batch(&components, self.spec)?;
        debug!(entities = batch.len(), components = components.len(), "emitting batch");
        Ok(batch)
    }

    /// Pull the next component to process, from the pending remainder or
    /// the visit order
    fn next_component(&mut self) -> Option<Result<Component>> {
        if let Some(component) = self.pending.take() {
            return Some(Ok(component));
        }
        if self.position < self.order.len() {
            let id = self.order[self.position];
            self.position += 1;
            return Some(self.source.component(id));
        }
        None
    }
}

impl<S: ComponentSource, R: Rng> Iterator for BatchPacker<'_, S, R> {
    type Item = Result<Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let component = match self.next_component() {
                Some(Ok(component)) => component,
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    // order exhausted; emit whatever accumulated
                    if self.current_batch.is_empty() {
                        return None;
                    }
                    return Some(self.flush());
                }
            };

            if component.is_empty() {
                continue;
            }
            let len = component.len();

            if len > self.config.batch_size && !self.config.subselect {
                // component is larger than the budget and may not be split
                if self.config.strict {
                    self.dropped += 1;
                    warn!(
                        entities = len,
                        batch_size = self.config.batch_size,
                        "dropping component larger than the entity budget"
                    );
                    continue;
                }
                return Some(stack_batch(&[component], self.spec));
            }

            if self.current_total + len > self.config.batch_size {
                // component does not fit next to the accumulator
                if self.config.subselect {
                    let take = self.config.batch_size - self.current_total;
                    if take > 0 {
                        match split_batch(&component, take, &mut self.rng) {
                            Ok((first, second)) => {
                                self.current_batch.push(first);
                                self.pending = Some(second);
                            }
                            Err(e) => return Some(Err(e)),
                        }
                    } else {
                        self.pending = Some(component);
                    }
                } else {
                    self.pending = Some(component);
                }
                return Some(self.flush());
            }

            self.current_batch.push(component);
            self.current_total += len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_batch_core::component::Entity;
    use graph_batch_core::schema::{FieldDef, FieldKind};
    use graph_batch_core::source::InMemorySource;
    use graph_batch_core::value::FieldValue;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spec() -> FieldSpec {
        FieldSpec::new(vec![FieldDef::new("id", FieldKind::Numeric)])
    }

    fn component(ids: std::ops::Range<usize>) -> Component {
        Component::from_entities(
            ids.map(|i| Entity::new().with("id", FieldValue::Scalar(i as f32)))
                .collect(),
        )
    }

    fn source(sizes: &[usize]) -> InMemorySource {
        let mut next = 0;
        InMemorySource::new(
            sizes
                .iter()
                .map(|&n| {
                    let c = component(next..next + n);
                    next += n;
                    c
                })
                .collect(),
        )
    }

    fn batch_sizes(config: PackerConfig, sizes: &[usize], seed: u64) -> Vec<usize> {
        let source = source(sizes);
        let spec = spec();
        let packer =
            BatchPacker::new(&source, &spec, config, StdRng::seed_from_u64(seed)).unwrap();
        packer.map(|b| b.unwrap().len()).collect()
    }

    #[test]
    fn zero_budget_is_rejected() {
        let source = source(&[1]);
        let spec = spec();
        let err = BatchPacker::new(
            &source,
            &spec,
            PackerConfig::new(0),
            StdRng::seed_from_u64(0),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn subselect_fills_every_batch_to_the_budget() {
        for seed in 0..5 {
            let sizes = batch_sizes(PackerConfig::new(6), &[5, 3, 4], seed);
            assert_eq!(sizes.iter().sum::<usize>(), 12);
            assert!(sizes.iter().all(|&s| s <= 6));
            // all but the last batch fill exactly
            for &s in &sizes[..sizes.len() - 1] {
                assert_eq!(s, 6);
            }
        }
    }

    #[test]
    fn strict_without_subselect_drops_oversized() {
        let source = source(&[10]);
        let spec = spec();
        let mut packer = BatchPacker::new(
            &source,
            &spec,
            PackerConfig::new(6).with_strict(true).with_subselect(false),
            StdRng::seed_from_u64(3),
        )
        .unwrap();
        assert!(packer.next().is_none());
        assert_eq!(packer.dropped_components(), 1);
    }

    #[test]
    fn lenient_without_subselect_emits_oversized_alone() {
        let sizes = batch_sizes(
            PackerConfig::new(6).with_subselect(false),
            &[10],
            3,
        );
        assert_eq!(sizes, vec![10]);
    }

    #[test]
    fn without_subselect_accumulator_flushes_before_retry() {
        for seed in 0..5 {
            let sizes = batch_sizes(PackerConfig::new(6), &[4, 4, 4], seed);
            assert_eq!(sizes.iter().sum::<usize>(), 12);
            let sizes = batch_sizes(
                PackerConfig::new(6).with_subselect(false),
                &[4, 4, 4],
                seed,
            );
            // nothing fits pairwise, each component ships alone
            assert_eq!(sizes, vec![4, 4, 4]);
        }
    }

    #[test]
    fn empty_components_are_consumed_silently() {
        let sizes = batch_sizes(PackerConfig::new(6), &[0, 3, 0, 2], 11);
        assert_eq!(sizes, vec![5]);
    }

    #[test]
    fn exactly_full_accumulator_flushes_without_empty_split() {
        for seed in 0..5 {
            let sizes = batch_sizes(PackerConfig::new(4), &[4, 3], seed);
            assert!(sizes.iter().sum::<usize>() == 7);
            assert!(sizes.iter().all(|&s| s <= 4));
        }
    }

    #[test]
    fn order_is_deterministic_under_a_seed() {
        let a = batch_sizes(PackerConfig::new(5), &[2, 3, 4, 1], 21);
        let b = batch_sizes(PackerConfig::new(5), &[2, 3, 4, 1], 21);
        assert_eq!(a, b);
    }
}

/*!
 * Sampling Reservoirs
 *
 * Bounded statistical samples of a stream of values.
 *
 * # Forward-Decaying Priority Sampling
 *
 * `ExponentiallyDecayingReservoir` keeps a fixed-size sample biased toward
 * recent values (Cormode et al., "Forward Decay"):
 *
 * - weight   = exp(alpha * (now - landmark))
 * - priority = weight / u, u uniform in (0, 1]
 * - keep the `size` highest priorities
 *
 * Weights grow without bound as `now` moves away from the landmark, so every
 * rescale period the landmark is moved to `now` and all weights and
 * priorities are scaled down by the same factor. Samples whose weight
 * underflows to zero are dropped.
 */

use super::clock::{default_clock, Clock};
use super::snapshot::{WeightedSample, WeightedSnapshot};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering as CmpOrdering;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Default sample size, ~99.9% confidence with 5% margin of error
pub const DEFAULT_SIZE: usize = 1028;

/// Default decay factor, heavily biases toward the last 5 minutes
pub const DEFAULT_ALPHA: f64 = 0.015;

/// Seconds between landmark rescales
pub const RESCALE_PERIOD_SECS: u64 = 60;

/// Statistically representative sample of a data stream
pub trait Reservoir: Send + Sync {
    /// Number of retained samples
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn update(&self, value: i64);

    fn snapshot(&self) -> WeightedSnapshot;
}

/// Totally ordered `f64` priority key
#[derive(Debug, Clone, Copy)]
struct Priority(f64);

impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == CmpOrdering::Equal
    }
}

impl Eq for Priority {}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.0.total_cmp(&other.0)
    }
}

struct State {
    samples: BTreeMap<Priority, WeightedSample>,
    /// Landmark, in clock seconds
    start_time: u64,
    next_rescale: u64,
    rng: StdRng,
}

pub struct ExponentiallyDecayingReservoir {
    state: Mutex<State>,
    count: AtomicUsize,
    size: usize,
    alpha: f64,
    clock: Arc<dyn Clock>,
}

impl ExponentiallyDecayingReservoir {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_SIZE, DEFAULT_ALPHA)
    }

    pub fn with_config(size: usize, alpha: f64) -> Self {
        Self::with_clock(size, alpha, default_clock())
    }

    pub fn with_clock(size: usize, alpha: f64, clock: Arc<dyn Clock>) -> Self {
        Self::build(size, alpha, clock, StdRng::from_entropy())
    }

    /// Deterministic sampling, for reproducible tests
    pub fn with_seed(size: usize, alpha: f64, clock: Arc<dyn Clock>, seed: u64) -> Self {
        Self::build(size, alpha, clock, StdRng::seed_from_u64(seed))
    }

    fn build(size: usize, alpha: f64, clock: Arc<dyn Clock>, rng: StdRng) -> Self {
        let start_time = clock.time();
        Self {
            state: Mutex::new(State {
                samples: BTreeMap::new(),
                start_time,
                next_rescale: start_time + RESCALE_PERIOD_SECS,
                rng,
            }),
            count: AtomicUsize::new(0),
            size,
            alpha,
            clock,
        }
    }

    pub fn capacity(&self) -> usize {
        self.size
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn rescale_if_needed(&self, state: &mut State, now: u64) {
        if now < state.next_rescale {
            return;
        }

        state.next_rescale = now + RESCALE_PERIOD_SECS;
        let old_start = state.start_time;
        state.start_time = now;

        let scaling_factor = (-self.alpha * now.saturating_sub(old_start) as f64).exp();
        if scaling_factor == 0.0 {
            state.samples.clear();
        } else {
            let samples = std::mem::take(&mut state.samples);
            state.samples = samples
                .into_iter()
                .filter_map(|(priority, sample)| {
                    let weight = sample.weight * scaling_factor;
                    (weight != 0.0).then(|| {
                        (
                            Priority(priority.0 * scaling_factor),
                            WeightedSample::new(sample.value, weight),
                        )
                    })
                })
                .collect();
        }

        self.count.store(state.samples.len(), Ordering::Release);
    }
}

impl Reservoir for ExponentiallyDecayingReservoir {
    fn len(&self) -> usize {
        self.size.min(self.count.load(Ordering::Acquire))
    }

    fn update(&self, value: i64) {
        let now = self.clock.time();
        let mut state = self.state.lock();
        self.rescale_if_needed(&mut state, now);

        let weight = (self.alpha * now.saturating_sub(state.start_time) as f64).exp();
        // gen() is in [0, 1); flip it so the divisor is never zero
        let unit = 1.0 - state.rng.gen::<f64>();
        let priority = Priority(weight / unit);
        let sample = WeightedSample::new(value, weight);

        self.count.fetch_add(1, Ordering::AcqRel);

        if state.samples.len() < self.size {
            state.samples.insert(priority, sample);
            return;
        }

        let lowest = match state.samples.first_key_value() {
            Some((lowest, _)) => *lowest,
            None => return,
        };
        if lowest < priority {
            if let Entry::Vacant(slot) = state.samples.entry(priority) {
                slot.insert(sample);
                state.samples.pop_first();
            }
        }
    }

    fn snapshot(&self) -> WeightedSnapshot {
        let now = self.clock.time();
        let mut state = self.state.lock();
        self.rescale_if_needed(&mut state, now);

        WeightedSnapshot::new(state.samples.values().copied().collect())
    }
}

impl Default for ExponentiallyDecayingReservoir {
    fn default() -> Self {
        Self::new()
    }
}

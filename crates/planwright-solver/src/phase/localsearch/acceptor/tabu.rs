//! Shared tabu bookkeeping used by the entity, value and move tabu
//! acceptors.

use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use rand::rngs::StdRng;
use rand::Rng;

/// Resolves the working tabu size from the problem scale.
///
/// Resolved at phase start and re-resolved every step, so ratio-based
/// sizes follow the entity count. This is the one deliberately
/// type-erased seam in the solver: it runs a few times per step, never
/// per move.
pub trait TabuSizeStrategy: Send {
    fn resolve(&self, entity_count: usize) -> u64;
}

/// A constant tabu size, independent of problem scale.
#[derive(Debug, Clone)]
pub struct FixedTabuSize(pub u64);

impl TabuSizeStrategy for FixedTabuSize {
    fn resolve(&self, _entity_count: usize) -> u64 {
        self.0
    }
}

/// A tabu size proportional to the entity count, at least 1.
#[derive(Debug, Clone)]
pub struct EntityRatioTabuSize(pub f64);

impl TabuSizeStrategy for EntityRatioTabuSize {
    fn resolve(&self, entity_count: usize) -> u64 {
        ((entity_count as f64 * self.0).round() as u64).max(1)
    }
}

/// Sliding tabu window over recently used items.
///
/// Items recorded at a step stay fully tabu for `tabu_size` steps, then
/// fade out over `fading_size` further steps during which they are
/// accepted with linearly increasing probability. Re-recording an item
/// refreshes its position in the window.
///
/// Aspiration, when enabled, overrides any tabu for a candidate that
/// would beat the phase's best score.
pub struct TabuWindow<T> {
    size_strategy: Box<dyn TabuSizeStrategy>,
    fading_size_strategy: Box<dyn TabuSizeStrategy>,
    working_tabu_size: u64,
    working_fading_size: u64,
    sequence: VecDeque<T>,
    recorded_step_index: HashMap<T, u64>,
    aspiration_enabled: bool,
    assert_key_consistency: bool,
}

impl<T: Debug> Debug for TabuWindow<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabuWindow")
            .field("working_tabu_size", &self.working_tabu_size)
            .field("working_fading_size", &self.working_fading_size)
            .field("sequence", &self.sequence)
            .field("aspiration_enabled", &self.aspiration_enabled)
            .finish()
    }
}

impl<T: Eq + Hash + Clone + Debug + Send> TabuWindow<T> {
    pub fn new(
        size_strategy: Box<dyn TabuSizeStrategy>,
        fading_size_strategy: Box<dyn TabuSizeStrategy>,
    ) -> Self {
        Self {
            size_strategy,
            fading_size_strategy,
            working_tabu_size: 0,
            working_fading_size: 0,
            sequence: VecDeque::new(),
            recorded_step_index: HashMap::new(),
            aspiration_enabled: true,
            assert_key_consistency: cfg!(debug_assertions),
        }
    }

    /// Creates a window with a fixed size and no fading.
    pub fn fixed(tabu_size: u64) -> Self {
        Self::new(Box::new(FixedTabuSize(tabu_size)), Box::new(FixedTabuSize(0)))
    }

    /// Disables the aspiration override.
    pub fn without_aspiration(mut self) -> Self {
        self.aspiration_enabled = false;
        self
    }

    pub fn working_tabu_size(&self) -> u64 {
        self.working_tabu_size
    }

    pub fn working_fading_size(&self) -> u64 {
        self.working_fading_size
    }

    fn total_size(&self) -> u64 {
        self.working_tabu_size + self.working_fading_size
    }

    fn resolve_sizes(&mut self, entity_count: usize) {
        self.working_tabu_size = self.size_strategy.resolve(entity_count);
        self.working_fading_size = self.fading_size_strategy.resolve(entity_count);
    }

    pub fn phase_started(&mut self, entity_count: usize) {
        self.resolve_sizes(entity_count);
        self.sequence.clear();
        self.recorded_step_index.clear();
    }

    pub fn phase_ended(&mut self) {
        self.sequence.clear();
        self.recorded_step_index.clear();
    }

    /// Records the items the winning step used and evicts expired ones.
    pub fn step_ended(
        &mut self,
        entity_count: usize,
        step_index: u64,
        items: impl IntoIterator<Item = T>,
    ) {
        self.resolve_sizes(entity_count);
        // The sequence is ordered by recording step, so eviction stops at
        // the first entry still inside the window.
        while let Some(front) = self.sequence.front() {
            let recorded = self.recorded_step_index.get(front).copied().unwrap_or(0);
            if step_index - recorded >= self.total_size() {
                let expired = self.sequence.pop_front();
                if let Some(expired) = expired {
                    self.recorded_step_index.remove(&expired);
                }
            } else {
                break;
            }
        }
        for item in items {
            if self.recorded_step_index.remove(&item).is_some() {
                // Refresh: move the item to the young end of the window.
                if let Some(pos) = self.sequence.iter().position(|x| *x == item) {
                    self.sequence.remove(pos);
                }
            }
            self.sequence.push_back(item.clone());
            self.recorded_step_index.insert(item, step_index);
        }
    }

    /// Returns true if a candidate identified by `keys` may be accepted
    /// at `step_index`. `improves_best` feeds the aspiration override.
    pub fn is_accepted<'k, I>(
        &self,
        keys: I,
        step_index: u64,
        improves_best: bool,
        rng: &mut StdRng,
    ) -> bool
    where
        I: IntoIterator<Item = &'k T>,
        T: 'k,
    {
        let mut max_recorded: Option<u64> = None;
        for key in keys {
            match self.recorded_step_index.get(key) {
                Some(&recorded) => {
                    max_recorded = Some(max_recorded.map_or(recorded, |m| m.max(recorded)));
                }
                None => {
                    if self.assert_key_consistency && self.sequence.contains(key) {
                        panic!(
                            "Tabu key {:?} is present in the tabu sequence but missing \
                             from the index map; its Hash impl disagrees with Eq or the \
                             key was mutated while tabu",
                            key
                        );
                    }
                }
            }
        }
        let Some(recorded) = max_recorded else {
            return true;
        };
        if self.aspiration_enabled && improves_best {
            return true;
        }
        let tabu_step_count = step_index.saturating_sub(recorded);
        if tabu_step_count <= self.working_tabu_size {
            return false;
        }
        let fading_step = tabu_step_count - self.working_tabu_size;
        if fading_step > self.working_fading_size {
            return true;
        }
        let accept_chance = (self.working_fading_size + 1 - fading_step) as f64
            / (self.working_fading_size + 1) as f64;
        rng.random::<f64>() < accept_chance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn item_is_tabu_for_the_window_then_accepted() {
        let mut window = TabuWindow::fixed(2).without_aspiration();
        window.phase_started(10);
        window.step_ended(10, 5, [7usize]);

        let mut rng = rng();
        assert!(!window.is_accepted([&7], 6, false, &mut rng));
        assert!(!window.is_accepted([&7], 7, false, &mut rng));
        assert!(window.is_accepted([&7], 8, false, &mut rng));
        assert!(window.is_accepted([&3], 6, false, &mut rng));
    }

    #[test]
    fn re_recording_refreshes_the_window() {
        let mut window = TabuWindow::fixed(2).without_aspiration();
        window.phase_started(10);
        window.step_ended(10, 5, [7usize]);
        window.step_ended(10, 6, [7usize]);

        let mut rng = rng();
        assert!(!window.is_accepted([&7], 8, false, &mut rng));
        assert!(window.is_accepted([&7], 9, false, &mut rng));
    }

    #[test]
    fn aspiration_overrides_tabu() {
        let mut window = TabuWindow::fixed(5);
        window.phase_started(10);
        window.step_ended(10, 1, [7usize]);

        let mut rng = rng();
        assert!(!window.is_accepted([&7], 2, false, &mut rng));
        assert!(window.is_accepted([&7], 2, true, &mut rng));
    }

    #[test]
    fn multi_key_candidates_use_the_youngest_recording() {
        let mut window = TabuWindow::fixed(2).without_aspiration();
        window.phase_started(10);
        window.step_ended(10, 1, [1usize]);
        window.step_ended(10, 4, [2usize]);

        let mut rng = rng();
        // Key 1 alone expired, but key 2 keeps the pair tabu.
        assert!(window.is_accepted([&1], 5, false, &mut rng));
        assert!(!window.is_accepted([&1, &2], 5, false, &mut rng));
    }

    #[test]
    fn fading_accept_chance_stays_strictly_between_zero_and_one() {
        let mut window = TabuWindow::new(
            Box::new(FixedTabuSize(1)),
            Box::new(FixedTabuSize(3)),
        )
        .without_aspiration();
        window.phase_started(10);
        window.step_ended(10, 0, [7usize]);

        // Inside fading (tabu_step_count in 2..=4), acceptance is
        // probabilistic: over many draws both outcomes occur.
        for fading_step_index in 2..=4u64 {
            let mut rng = rng();
            let accepted = (0..2000)
                .filter(|_| window.is_accepted([&7], fading_step_index, false, &mut rng))
                .count();
            assert!(accepted > 0, "chance collapsed to 0 at {}", fading_step_index);
            assert!(accepted < 2000, "chance collapsed to 1 at {}", fading_step_index);
        }
        // Past the fading window the item is always accepted again.
        let mut rng = rng();
        assert!(window.is_accepted([&7], 5, false, &mut rng));
    }

    #[test]
    fn eviction_drops_expired_items() {
        let mut window = TabuWindow::fixed(2).without_aspiration();
        window.phase_started(10);
        window.step_ended(10, 0, [1usize]);
        window.step_ended(10, 1, [2usize]);
        window.step_ended(10, 5, [3usize]);

        let mut rng = rng();
        // 1 and 2 fell out of the window during the eviction at step 5.
        assert!(window.is_accepted([&1], 5, false, &mut rng));
        assert!(window.is_accepted([&2], 5, false, &mut rng));
        assert!(!window.is_accepted([&3], 6, false, &mut rng));
    }

    #[test]
    fn entity_ratio_scales_with_problem_size() {
        assert_eq!(EntityRatioTabuSize(0.1).resolve(100), 10);
        assert_eq!(EntityRatioTabuSize(0.1).resolve(3), 1);
        assert_eq!(FixedTabuSize(7).resolve(1_000_000), 7);
    }

    mod hash_instability {
        use super::*;
        use std::hash::{Hash, Hasher};
        use std::sync::atomic::{AtomicU64, Ordering};

        static COUNTER: AtomicU64 = AtomicU64::new(0);

        // Equal by value, but hashes differently on every call.
        #[derive(Clone, Debug, PartialEq, Eq)]
        struct UnstableKey(u64);

        impl Hash for UnstableKey {
            fn hash<H: Hasher>(&self, state: &mut H) {
                COUNTER.fetch_add(1, Ordering::Relaxed).hash(state);
            }
        }

        #[test]
        #[should_panic(expected = "Hash impl disagrees with Eq")]
        fn unstable_hash_is_detected() {
            let mut window = TabuWindow::fixed(5).without_aspiration();
            window.phase_started(10);
            window.step_ended(10, 1, [UnstableKey(7)]);

            let mut rng = StdRng::seed_from_u64(42);
            // Each lookup hashes differently and misses the map, but the
            // linear sequence scan still finds the equal key. Repeated in
            // case a lookup lands in the right bucket by accident.
            for _ in 0..100 {
                window.is_accepted([&UnstableKey(7)], 2, false, &mut rng);
            }
        }
    }
}

// In-memory respawn timer store.
//
// One last-kill timestamp per (world, rank) pair, no history: a write
// always overwrites. Every read and write takes the single mutex, so a
// mutation is atomic with respect to the renderer and other writers. The
// guard is never held across an await point.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::catalog::{Rank, World};
use crate::metrics;

/// Forward offset applied when a kill is marked by hand (button press) and
/// when seeding unknown timers at startup. The entry reads as "not yet
/// due" until the window opens.
pub fn kill_mark_offset() -> Duration {
    Duration::hours(4)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("world {0} is not tracked")]
    UntrackedWorld(World),
}

/// Thread-safe timer store, cloneable handle semantics.
#[derive(Debug, Clone)]
pub struct TimerStore {
    inner: Arc<Mutex<HashMap<(World, Rank), DateTime<Utc>>>>,
}

impl TimerStore {
    /// Seed every (world, rank) pair with the placeholder timestamp
    /// `now + kill_mark_offset()`: state is unknown at startup and is
    /// rendered as imminent rather than overdue.
    pub fn new(worlds: &[World], now: DateTime<Utc>) -> Self {
        let mut map = HashMap::new();
        for &world in worlds {
            for rank in Rank::ALL {
                map.insert((world, rank), now + kill_mark_offset());
            }
        }
        Self {
            inner: Arc::new(Mutex::new(map)),
        }
    }

    /// Worlds with timers, in catalog order.
    pub fn worlds(&self) -> Vec<World> {
        let map = self.inner.lock().unwrap();
        World::ALL
            .into_iter()
            .filter(|&w| Rank::ALL.iter().any(|&r| map.contains_key(&(w, r))))
            .collect()
    }

    pub fn tracks(&self, world: World) -> bool {
        let map = self.inner.lock().unwrap();
        Rank::ALL.iter().any(|&r| map.contains_key(&(world, r)))
    }

    /// Button path: the user just killed the rank, so the next window is
    /// not yet open. Writes `now + kill_mark_offset()`. Last write wins.
    pub fn mark_killed(
        &self,
        world: World,
        rank: Rank,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.write(world, rank, now + kill_mark_offset(), "mark")
    }

    /// Webhook path: an externally verified kill at exactly `now`.
    pub fn report_kill(
        &self,
        world: World,
        rank: Rank,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.write(world, rank, now, "report")
    }

    /// Command path: set the kill time to `now - offset` for one rank, or
    /// for every rank in the world when `rank` is `None`. The caller has
    /// already parsed and validated everything; this either writes the
    /// whole request or (for an untracked world) nothing.
    pub fn apply_offset(
        &self,
        world: World,
        rank: Option<Rank>,
        offset: Duration,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let timestamp = now - offset;
        let mut map = self.inner.lock().unwrap();
        match rank {
            Some(rank) => {
                if !map.contains_key(&(world, rank)) {
                    return Err(StoreError::UntrackedWorld(world));
                }
                map.insert((world, rank), timestamp);
                metrics::TIMER_WRITES_TOTAL.with_label_values(&["offset"]).inc();
            }
            None => {
                if !map.contains_key(&(world, Rank::ALL[0])) {
                    return Err(StoreError::UntrackedWorld(world));
                }
                for rank in Rank::ALL {
                    map.insert((world, rank), timestamp);
                }
                metrics::TIMER_WRITES_TOTAL.with_label_values(&["offset"]).inc();
            }
        }
        Ok(())
    }

    pub fn last_killed(&self, world: World, rank: Rank) -> Option<DateTime<Utc>> {
        let map = self.inner.lock().unwrap();
        map.get(&(world, rank)).copied()
    }

    /// All timers for one world, keyed by rank. Empty when untracked.
    pub fn snapshot(&self, world: World) -> HashMap<Rank, DateTime<Utc>> {
        let map = self.inner.lock().unwrap();
        Rank::ALL
            .into_iter()
            .filter_map(|r| map.get(&(world, r)).map(|ts| (r, *ts)))
            .collect()
    }

    fn write(
        &self,
        world: World,
        rank: Rank,
        timestamp: DateTime<Utc>,
        op: &str,
    ) -> Result<(), StoreError> {
        let mut map = self.inner.lock().unwrap();
        if !map.contains_key(&(world, rank)) {
            return Err(StoreError::UntrackedWorld(world));
        }
        map.insert((world, rank), timestamp);
        metrics::TIMER_WRITES_TOTAL.with_label_values(&[op]).inc();
        Ok(())
    }
}

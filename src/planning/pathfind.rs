//! Dijkstra search over the region adjacency graph
//!
//! Two execution modes share one relaxation scheme: the horizon-bounded
//! sweep enumerates every region an army could reach this turn, while
//! the point route stops at the first pop of the target (optimal under
//! non-negative enter costs). Both use lazy deletion instead of
//! decrease-key and degrade softly when their iteration cap trips.

use crate::core::config::AiConfig;
use crate::core::types::{PlayerId, RegionId, IMPASSABLE};
use crate::planning::queue::MinHeap;
use crate::world::Territory;

/// Horizon value that never bounds a sweep
pub const NO_HORIZON: u32 = u32::MAX;

/// Sanity bound on parent-chain reconstruction; a longer chain means a
/// corrupt or cyclic parent table
const MAX_PATH_LEN: usize = 4096;

/// Outcome of a point-to-point route query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    pub found: bool,
    /// Ordered start -> target inclusive when found, empty otherwise
    pub path: Vec<RegionId>,
    pub cost: u32,
}

impl PathResult {
    fn found(path: Vec<RegionId>, cost: u32) -> Self {
        Self {
            found: true,
            path,
            cost,
        }
    }

    fn not_found() -> Self {
        Self {
            found: false,
            path: Vec::new(),
            cost: IMPASSABLE,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ReachEntry {
    cost: u32,
    parent: Option<RegionId>,
}

/// Every region reachable from a start within a horizon, with optimal
/// costs and parent pointers for path reconstruction
///
/// Backed by a dense array indexed by region id.
#[derive(Debug, Clone)]
pub struct ReachabilitySet {
    start: RegionId,
    entries: Vec<Option<ReachEntry>>,
    truncated: bool,
}

impl ReachabilitySet {
    fn new(region_count: usize, start: RegionId) -> Self {
        let mut entries = vec![None; region_count];
        if start.index() < region_count {
            entries[start.index()] = Some(ReachEntry {
                cost: 0,
                parent: None,
            });
        }
        Self {
            start,
            entries,
            truncated: false,
        }
    }

    pub fn start(&self) -> RegionId {
        self.start
    }

    pub fn contains(&self, region: RegionId) -> bool {
        self.cost(region).is_some()
    }

    /// Optimal cost to the region, if reached
    pub fn cost(&self, region: RegionId) -> Option<u32> {
        self.entries
            .get(region.index())
            .and_then(|entry| entry.as_ref())
            .map(|entry| entry.cost)
    }

    /// True when the sweep hit its iteration cap and the set is only
    /// the best-known partial result
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Number of reached regions, the start included
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reached regions with their costs, in region-id order
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, u32)> + '_ {
        self.entries.iter().enumerate().filter_map(|(idx, entry)| {
            entry
                .as_ref()
                .map(|entry| (RegionId(idx as u32), entry.cost))
        })
    }

    /// Reconstruct the start -> region path by walking parent pointers
    ///
    /// Returns an empty path when the region was not reached, or when
    /// the parent chain exceeds the sanity bound (corrupt table).
    pub fn path_to(&self, region: RegionId) -> Vec<RegionId> {
        if self.cost(region).is_none() {
            return Vec::new();
        }
        let mut path = vec![region];
        let mut current = region;
        while let Some(parent) = self
            .entries
            .get(current.index())
            .and_then(|entry| entry.as_ref())
            .and_then(|entry| entry.parent)
        {
            if path.len() >= MAX_PATH_LEN {
                tracing::error!(
                    region = region.0,
                    "parent chain exceeds {MAX_PATH_LEN} entries, aborting reconstruction"
                );
                return Vec::new();
            }
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }
}

/// Shortest-path search over the region graph
///
/// Stateless apart from its iteration caps; per-query scratch lives in
/// dense arrays sized to the territory.
#[derive(Debug, Clone)]
pub struct PathPlanner {
    search_iteration_cap: usize,
    route_iteration_cap: usize,
}

impl PathPlanner {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            search_iteration_cap: config.search_iteration_cap,
            route_iteration_cap: config.route_iteration_cap,
        }
    }

    /// Enumerate every region reachable from `start` within `horizon`
    /// movement points, with optimal costs
    ///
    /// Edge weight into a neighbor is `Territory::enter_cost` for the
    /// searching player; the impassable sentinel prunes the edge. The
    /// sweep must exhaust the horizon rather than stop early because
    /// callers need *all* reachable regions.
    pub fn reachable_regions<T: Territory>(
        &self,
        territory: &T,
        start: RegionId,
        player: PlayerId,
        horizon: u32,
    ) -> ReachabilitySet {
        let region_count = territory.region_count();
        let mut set = ReachabilitySet::new(region_count, start);
        if start.index() >= region_count {
            return set;
        }

        let mut done = vec![false; region_count];
        let mut in_queue = vec![false; region_count];
        let mut heap = MinHeap::with_capacity(64);
        heap.push(0, start);
        in_queue[start.index()] = true;

        let mut iterations = 0usize;
        while let Some((key, node)) = heap.pop() {
            iterations += 1;
            if iterations > self.search_iteration_cap {
                tracing::warn!(
                    start = start.0,
                    cap = self.search_iteration_cap,
                    "reachability sweep hit its iteration cap, returning partial set"
                );
                set.truncated = true;
                break;
            }

            // Lazy deletion: an already finalized node is skipped here
            // instead of being removed from the queue.
            if done[node.index()] {
                continue;
            }
            let best = set.cost(node).unwrap_or(IMPASSABLE);
            if key > best {
                // Stale key from an improvement found while this entry
                // was pending; requeue at the corrected cost.
                heap.push(best, node);
                continue;
            }
            done[node.index()] = true;
            in_queue[node.index()] = false;

            for &neighbor in territory.neighbor_regions(node) {
                if neighbor.index() >= region_count || done[neighbor.index()] {
                    continue;
                }
                let step = territory.enter_cost(neighbor, player);
                if step == IMPASSABLE {
                    continue;
                }
                let new_cost = best.saturating_add(step);
                if new_cost >= IMPASSABLE || new_cost > horizon {
                    continue;
                }
                if new_cost < set.cost(neighbor).unwrap_or(IMPASSABLE) {
                    set.entries[neighbor.index()] = Some(ReachEntry {
                        cost: new_cost,
                        parent: Some(node),
                    });
                    if !in_queue[neighbor.index()] {
                        heap.push(new_cost, neighbor);
                        in_queue[neighbor.index()] = true;
                    }
                }
            }
        }

        set
    }

    /// Route from `start` to `target` with no horizon bound
    ///
    /// Identical relaxation to [`Self::reachable_regions`] but returns
    /// as soon as the target pops: with non-negative weights the first
    /// pop of a node carries its optimal cost. Point routes may be
    /// long, so this uses the larger iteration cap.
    pub fn shortest_path<T: Territory>(
        &self,
        territory: &T,
        start: RegionId,
        target: RegionId,
        player: PlayerId,
    ) -> PathResult {
        let region_count = territory.region_count();
        if start.index() >= region_count || target.index() >= region_count {
            return PathResult::not_found();
        }
        if start == target {
            return PathResult::found(vec![start], 0);
        }

        let mut set = ReachabilitySet::new(region_count, start);
        let mut done = vec![false; region_count];
        let mut in_queue = vec![false; region_count];
        let mut heap = MinHeap::with_capacity(64);
        heap.push(0, start);
        in_queue[start.index()] = true;

        let mut iterations = 0usize;
        while let Some((key, node)) = heap.pop() {
            iterations += 1;
            if iterations > self.route_iteration_cap {
                tracing::warn!(
                    start = start.0,
                    target = target.0,
                    cap = self.route_iteration_cap,
                    "route search hit its iteration cap"
                );
                return PathResult::not_found();
            }

            if done[node.index()] {
                continue;
            }
            let best = set.cost(node).unwrap_or(IMPASSABLE);
            if key > best {
                heap.push(best, node);
                continue;
            }
            done[node.index()] = true;
            in_queue[node.index()] = false;

            if node == target {
                let path = set.path_to(target);
                if path.is_empty() {
                    return PathResult::not_found();
                }
                return PathResult::found(path, best);
            }

            for &neighbor in territory.neighbor_regions(node) {
                if neighbor.index() >= region_count || done[neighbor.index()] {
                    continue;
                }
                let step = territory.enter_cost(neighbor, player);
                if step == IMPASSABLE {
                    continue;
                }
                let new_cost = best.saturating_add(step);
                if new_cost >= IMPASSABLE {
                    continue;
                }
                if new_cost < set.cost(neighbor).unwrap_or(IMPASSABLE) {
                    set.entries[neighbor.index()] = Some(ReachEntry {
                        cost: new_cost,
                        parent: Some(node),
                    });
                    if !in_queue[neighbor.index()] {
                        heap.push(new_cost, neighbor);
                        in_queue[neighbor.index()] = true;
                    }
                }
            }
        }

        PathResult::not_found()
    }

    /// Longest prefix of `path` whose cumulative enter cost fits the
    /// budget
    ///
    /// Re-checks every step against current territory state; ownership
    /// or terrain may have changed since the path was computed, and a
    /// step that turned impassable ends the prefix there.
    pub fn trim_path_to_budget<T: Territory>(
        &self,
        territory: &T,
        path: &[RegionId],
        player: PlayerId,
        budget: u32,
    ) -> Vec<RegionId> {
        let Some((&first, rest)) = path.split_first() else {
            return Vec::new();
        };
        let mut trimmed = vec![first];
        let mut spent = 0u32;
        for &step in rest {
            let cost = territory.enter_cost(step, player);
            if cost == IMPASSABLE || spent.saturating_add(cost) > budget {
                break;
            }
            spent += cost;
            trimmed.push(step);
        }
        trimmed
    }

    /// Recompute the total cost of a path by re-summing per-step enter
    /// costs against current territory state
    ///
    /// Returns the impassable sentinel if any step is currently
    /// impassable. The starting region is free; cost is paid on entry.
    pub fn path_cost<T: Territory>(
        &self,
        territory: &T,
        path: &[RegionId],
        player: PlayerId,
    ) -> u32 {
        let mut total = 0u32;
        for &step in path.iter().skip(1) {
            let cost = territory.enter_cost(step, player);
            if cost == IMPASSABLE {
                return IMPASSABLE;
            }
            total = total.saturating_add(cost);
        }
        total
    }
}

impl Default for PathPlanner {
    fn default() -> Self {
        Self::new(&AiConfig::default())
    }
}

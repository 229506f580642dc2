//! Planner property tests
//!
//! Randomized checks over the heap and the pathfinder, using generated
//! maps so the invariants hold beyond the handful of hand-built
//! fixtures in the unit tests.

use proptest::prelude::*;

use warmarch::core::config::AiConfig;
use warmarch::core::types::{PlayerId, RegionId};
use warmarch::planning::{MinHeap, PathPlanner, NO_HORIZON};
use warmarch::world::{Territory, WorldMap};

proptest! {
    #[test]
    fn heap_drains_in_nondecreasing_key_order(keys in prop::collection::vec(0u32..10_000, 0..200)) {
        let mut heap = MinHeap::new();
        for (idx, &key) in keys.iter().enumerate() {
            heap.push(key, idx);
        }
        prop_assert_eq!(heap.len(), keys.len());

        let mut drained = Vec::with_capacity(keys.len());
        while let Some((key, _)) = heap.pop() {
            drained.push(key);
        }
        prop_assert!(drained.windows(2).all(|pair| pair[0] <= pair[1]));

        let mut sorted = keys.clone();
        sorted.sort_unstable();
        prop_assert_eq!(drained, sorted);
    }

    #[test]
    fn reachability_costs_obey_edge_relaxation(seed in 0u64..500) {
        // For every reached region, no neighbor may offer a cheaper
        // way in than the recorded optimal cost.
        let map = WorldMap::generate_demo(20, 2, seed);
        let planner = PathPlanner::new(&AiConfig::default());
        let player = PlayerId(1);
        let start = RegionId(0);

        let reach = planner.reachable_regions(&map, start, player, NO_HORIZON);
        prop_assert!(!reach.truncated());
        for (region, cost) in reach.iter() {
            for &neighbor in map.neighbor_regions(region) {
                let Some(neighbor_cost) = reach.cost(neighbor) else {
                    continue;
                };
                let edge = map.enter_cost(region, player);
                if edge == warmarch::core::types::IMPASSABLE {
                    continue;
                }
                prop_assert!(cost <= neighbor_cost.saturating_add(edge));
            }
        }
    }

    #[test]
    fn shortest_path_agrees_with_reachability(seed in 0u64..200, target in 0u32..20) {
        let map = WorldMap::generate_demo(20, 2, seed);
        let planner = PathPlanner::new(&AiConfig::default());
        let player = PlayerId(1);
        let start = RegionId(0);
        let target = RegionId(target);

        let reach = planner.reachable_regions(&map, start, player, NO_HORIZON);
        let route = planner.shortest_path(&map, start, target, player);

        match reach.cost(target) {
            Some(cost) => {
                prop_assert!(route.found);
                prop_assert_eq!(route.cost, cost);
                prop_assert_eq!(route.path.first().copied(), Some(start));
                prop_assert_eq!(route.path.last().copied(), Some(target));
                // Walking the path reproduces the optimal cost
                prop_assert_eq!(planner.path_cost(&map, &route.path, player), cost);
            }
            None => prop_assert!(!route.found),
        }
    }

    #[test]
    fn trimming_is_idempotent_and_within_budget(seed in 0u64..200, budget in 0u32..40) {
        let map = WorldMap::generate_demo(20, 2, seed);
        let planner = PathPlanner::new(&AiConfig::default());
        let player = PlayerId(1);
        let route = planner.shortest_path(&map, RegionId(0), RegionId(10), player);
        prop_assume!(route.found);

        let trimmed = planner.trim_path_to_budget(&map, &route.path, player, budget);
        prop_assert!(!trimmed.is_empty());
        prop_assert_eq!(trimmed.first().copied(), Some(RegionId(0)));
        prop_assert!(planner.path_cost(&map, &trimmed, player) <= budget);

        let again = planner.trim_path_to_budget(&map, &trimmed, player, budget);
        prop_assert_eq!(again, trimmed);
    }
}

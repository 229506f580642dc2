//! Pathfinding benchmarks over generated maps

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use warmarch::core::config::AiConfig;
use warmarch::core::types::{PlayerId, RegionId};
use warmarch::planning::{PathPlanner, NO_HORIZON};
use warmarch::world::WorldMap;

fn bench_reachability(c: &mut Criterion) {
    let planner = PathPlanner::new(&AiConfig::default());
    let player = PlayerId(1);

    let mut group = c.benchmark_group("reachable_regions");
    for &size in &[64usize, 256, 1024] {
        let map = WorldMap::generate_demo(size, 2, 42);
        group.bench_function(format!("{size}_regions_unbounded"), |b| {
            b.iter(|| {
                planner.reachable_regions(
                    black_box(&map),
                    RegionId(0),
                    player,
                    NO_HORIZON,
                )
            })
        });
        group.bench_function(format!("{size}_regions_horizon_20"), |b| {
            b.iter(|| planner.reachable_regions(black_box(&map), RegionId(0), player, 20))
        });
    }
    group.finish();
}

fn bench_shortest_path(c: &mut Criterion) {
    let planner = PathPlanner::new(&AiConfig::default());
    let player = PlayerId(1);

    let mut group = c.benchmark_group("shortest_path");
    for &size in &[64usize, 256, 1024] {
        let map = WorldMap::generate_demo(size, 2, 42);
        // Antipodal on the ring backbone, the worst case for early exit
        let target = RegionId((size / 2) as u32);
        group.bench_function(format!("{size}_regions_cross_map"), |b| {
            b.iter(|| planner.shortest_path(black_box(&map), RegionId(0), target, player))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reachability, bench_shortest_path);
criterion_main!(benches);

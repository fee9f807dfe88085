use polygon_algebra::{
    polygon,
    polygon::{
        internal::crossings::find_crossings, CrossingOptions, CrossingStrategy, SegmentOrderCache,
    },
    ring,
};

fn main() {
    env_logger::init();

    let a = polygon![
        ring![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
        ring![(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0)],
    ];
    let b = polygon![ring![(3.0, -1.0), (6.0, -1.0), (6.0, 11.0), (3.0, 11.0)]];

    let cache = SegmentOrderCache::new();
    let mut reference = None;
    for strategy in [
        CrossingStrategy::Exhaustive,
        CrossingStrategy::Sweep,
        CrossingStrategy::Parallel,
    ] {
        let options = CrossingOptions {
            strategy,
            segment_order_cache: Some(&cache),
            ..CrossingOptions::new()
        };

        let crossings = find_crossings(&a, &b, &options);
        println!("{:?}: {} crossings", strategy, crossings.len());
        for c in crossings.iter() {
            println!(
                "  ({:.3}, {:.3}) a: ring {} seg {} t {:.3}, b: ring {} seg {} t {:.3}",
                c.point.x,
                c.point.y,
                c.location_a.ring_index,
                c.location_a.segment_index,
                c.location_a.ratio,
                c.location_b.ring_index,
                c.location_b.segment_index,
                c.location_b.ratio,
            );
        }

        // both strip sides cross the outer square twice, the left side crosses the inner square
        assert_eq!(crossings.len(), 6);
        match &reference {
            None => reference = Some(crossings),
            Some(r) => assert_eq!(r, &crossings),
        }
    }

    println!("cached segment orders: {}", cache.len());
}

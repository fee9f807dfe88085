use log::info;
use polygon_algebra::{
    polygon,
    polygon::{difference, intersect, union, xor, BooleanOp, Polygon},
    ring,
};

fn main() {
    env_logger::init();

    let a = polygon![ring![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]];
    let b = polygon![ring![(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0)]];

    overlapping_squares(&a, &b);
    absent_operands(&a);
    touching_squares();
}

fn print_result(name: &str, result: Option<&Polygon<f64>>) {
    match result {
        None => println!("{}: empty", name),
        Some(p) => {
            println!(
                "{}: {} ring(s), area {:.3}",
                name,
                p.ring_count(),
                p.area().unwrap()
            );
            for (i, r) in p.rings.iter().enumerate() {
                println!("  ring {} ({:?}): {:?}", i, r.hole, r.points);
            }
        }
    }
}

fn overlapping_squares(a: &Polygon<f64>, b: &Polygon<f64>) {
    println!("Overlapping squares...");

    let and = intersect(Some(a), Some(b)).unwrap();
    assert!((and.as_ref().unwrap().area().unwrap() - 25.0).abs() < 1e-8);
    print_result("intersect", and.as_ref());

    let or = union(Some(a), Some(b)).unwrap();
    assert!((or.as_ref().unwrap().area().unwrap() - 175.0).abs() < 1e-8);
    print_result("union", or.as_ref());

    let not = difference(Some(a), Some(b)).unwrap();
    assert!((not.as_ref().unwrap().area().unwrap() - 75.0).abs() < 1e-8);
    print_result("difference", not.as_ref());

    let sym = xor(Some(a), Some(b)).unwrap();
    assert!((sym.as_ref().unwrap().area().unwrap() - 150.0).abs() < 1e-8);
    print_result("xor", sym.as_ref());

    // method form dispatches to the same operations
    let or_method = a.boolean(b, BooleanOp::Or).unwrap();
    assert!(or_method
        .as_ref()
        .unwrap()
        .spatially_eq_eps(or.as_ref().unwrap(), 1e-5));

    info!("overlapping squares done");
}

fn absent_operands(a: &Polygon<f64>) {
    println!("Absent operands...");

    assert_eq!(intersect(Some(a), None).unwrap(), None);
    assert_eq!(union(Some(a), None).unwrap().as_ref(), Some(a));
    assert_eq!(difference(None, Some(a)).unwrap(), None);
    assert_eq!(difference(Some(a), None).unwrap().as_ref(), Some(a));
    assert_eq!(xor(None, Some(a)).unwrap().as_ref(), Some(a));
}

fn touching_squares() {
    println!("Edge touching squares...");

    let lower = polygon![ring![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]];
    let upper = polygon![ring![(0.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)]];

    // shared edge bounds no area
    assert_eq!(intersect(Some(&lower), Some(&upper)).unwrap(), None);

    let merged = union(Some(&lower), Some(&upper)).unwrap();
    print_result("union", merged.as_ref());
    assert_eq!(merged.unwrap().rings[0].point_count(), 4);
}

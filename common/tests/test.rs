use common::shapes::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_new_and_getters() {
    let rect = Boundary::new(2, 3, 4, 6);
    assert_eq!(rect.width(), 4);
    assert_eq!(rect.height(), 6);
    assert_eq!(rect.left(), 2);
    assert_eq!(rect.right(), 6);
    assert_eq!(rect.top(), 3);
    assert_eq!(rect.bottom(), 9);
}

#[test]
fn test_contains_is_half_open() {
    let rect = Boundary::new(0, 0, 10, 10);
    assert!(rect.contains(0, 0));
    assert!(rect.contains(9, 9));
    assert!(!rect.contains(10, 5));
    assert!(!rect.contains(5, 10));
    assert!(!rect.contains(-1, 5));
}

#[test]
fn test_contains_near_coordinate_limits() {
    let rect = Boundary::new(i32::MAX - 4, 0, 5, 1);
    assert!(rect.contains(i32::MAX, 0));
    assert_eq!(rect.right(), i32::MAX as i64 + 1);
}

#[test]
fn test_intersects() {
    let rect = Boundary::new(0, 0, 10, 10);
    assert!(rect.intersects(&Boundary::new(5, 5, 10, 10)));
    assert!(rect.intersects(&Boundary::new(-5, -5, 6, 6)));
    assert!(rect.intersects(&Boundary::new(2, 2, 1, 1)));
    // Touching edges share no cell.
    assert!(!rect.intersects(&Boundary::new(10, 0, 5, 5)));
    assert!(!rect.intersects(&Boundary::new(0, -5, 5, 5)));
    assert!(!rect.intersects(&Boundary::new(20, 20, 5, 5)));
}

#[test]
fn test_around() {
    let rect = Boundary::around(Point::new(10, 10), 3);
    assert_eq!(rect, Boundary::new(7, 7, 7, 7));
    assert!(rect.contains(13, 13));
    assert!(rect.contains(7, 7));
    assert!(!rect.contains(14, 10));

    let clamped = Boundary::around(Point::new(i32::MIN + 1, 0), 5);
    assert_eq!(clamped.x, i32::MIN);
    assert_eq!(clamped.width, 7);
}

#[test]
fn test_widest_boundary_stops_short_of_max() {
    // u32 extents leave the last i32 cell outside any rectangle from i32::MIN
    let widest = Boundary::new(i32::MIN, i32::MIN, u32::MAX, u32::MAX);
    assert_eq!(widest.right(), i32::MAX as i64);
    assert!(widest.contains(i32::MAX - 1, i32::MAX - 1));
    assert!(!widest.contains(i32::MAX, 0));
    assert!(!widest.contains(0, i32::MAX));

    let around = Boundary::around(Point::new(0, 0), u32::MAX);
    assert_eq!(around, widest);
    assert!(!around.contains(i32::MAX, 0));
}

#[test]
fn test_distance_sq() {
    assert_eq!(Point::new(0, 0).distance_sq(&Point::new(3, 4)), 25);
    assert_eq!(Point::new(-3, 0).distance_sq(&Point::new(0, -4)), 25);
    let far = Point::new(i32::MIN, i32::MIN).distance_sq(&Point::new(i32::MAX, i32::MAX));
    assert_eq!(far, u64::MAX);
}

#[test]
fn test_distance_sq_to_point() {
    let rect = Boundary::new(2, 3, 4, 6);
    assert_eq!(rect.distance_sq_to_point(Point::new(3, 4)), 0);
    // Last covered column is x = 5.
    assert_eq!(rect.distance_sq_to_point(Point::new(8, 4)), 9);
    assert_eq!(rect.distance_sq_to_point(Point::new(0, 0)), 4 + 9);
}

#[test]
fn test_random_point_inside() {
    let rect = Boundary::new(-5, 3, 6, 8);

    // Use a fixed seed for reproducibility.
    let mut rng: StdRng = SeedableRng::seed_from_u64(123);

    for _ in 0..100 {
        let point = rect.random_point_inside(&mut rng).unwrap();
        assert!(rect.contains_point(point));
    }
}

#[test]
fn test_random_point_inside_empty_rectangle() {
    let rect = Boundary::new(2, 3, 0, 2);
    let mut rng: StdRng = SeedableRng::seed_from_u64(123);
    assert!(rect.random_point_inside(&mut rng).is_none());
}

use glam::{Vec2, Vec3};
use verlet_core::config::PhysicsConfig;
use verlet_core::particle::VerletParticle;
use verlet_core::plane::Plane;

fn sphere(position: Vec3, radius: f32, bounce: f32) -> VerletParticle {
    VerletParticle::new(position, radius, 1.0, bounce, 0.2)
}

#[test]
fn test_pair_apart_untouched() {
    let config = PhysicsConfig::default();
    let mut a = sphere(Vec3::ZERO, 1.0, 0.5);
    let mut b = sphere(Vec3::new(2.5, 0.0, 0.0), 1.0, 0.5);
    let (a0, b0) = (a, b);

    a.collide_with(&mut b, &config);

    assert_eq!(a, a0);
    assert_eq!(b, b0);
}

#[test]
fn test_overlapping_pair_separates() {
    let config = PhysicsConfig::default();
    let mut a = sphere(Vec3::ZERO, 5.0, 0.5);
    let mut b = sphere(Vec3::new(7.0, 0.0, 0.0), 5.0, 0.5);

    a.collide_with(&mut b, &config);

    let dist = a.position.distance(b.position);
    assert!(dist > 7.0, "pair should separate, dist={}", dist);
    assert!(a.position.x < 0.0, "a pushed toward -X");
    assert!(b.position.x > 7.0, "b pushed toward +X");
}

#[test]
fn test_moving_pair_separates() {
    let config = PhysicsConfig::default();
    let mut a = sphere(Vec3::ZERO, 2.0, 0.3);
    let mut b = sphere(Vec3::new(3.0, 1.0, 0.0), 2.0, 0.3);
    a.set_velocity(Vec3::new(0.5, 0.0, 0.0));
    b.set_velocity(Vec3::new(-0.5, 0.2, 0.0));
    let before = a.position.distance(b.position);

    a.collide_with(&mut b, &config);

    let after = a.position.distance(b.position);
    assert!(after > before, "before={} after={}", before, after);
}

#[test]
fn test_corrections_are_mass_weighted() {
    let config = PhysicsConfig::default();
    let mut light = VerletParticle::new(Vec3::ZERO, 5.0, 1.0, 0.5, 0.2);
    let mut heavy = VerletParticle::new(Vec3::new(7.0, 0.0, 0.0), 5.0, 10.0, 0.5, 0.2);

    light.collide_with(&mut heavy, &config);

    let light_moved = light.position.distance(Vec3::ZERO);
    let heavy_moved = heavy.position.distance(Vec3::new(7.0, 0.0, 0.0));
    assert!(
        light_moved > heavy_moved * 5.0,
        "light moved {}, heavy moved {}",
        light_moved,
        heavy_moved
    );
}

#[test]
fn test_coincident_pair_uses_fallbacks() {
    let config = PhysicsConfig::default();
    let mut a = sphere(Vec3::new(3.0, 3.0, 0.0), 1.0, 0.5);
    let mut b = sphere(Vec3::new(3.0, 3.0, 0.0), 1.0, 0.5);

    a.collide_with(&mut b, &config);

    assert!(a.position.is_finite() && b.position.is_finite());
    // With a zero delta only the reflected terms act, along the Y fallback axis,
    // each scaled by the 0.1 fallback factor and the 0.5 reflect share.
    assert!(a.position.y < 3.0, "a moved down: {:?}", a.position);
    assert!(b.position.y > 3.0, "b moved up: {:?}", b.position);
    assert!((a.position.distance(b.position) - 0.1).abs() < 1e-5);
}

#[test]
fn test_pinned_partner_does_not_move() {
    let config = PhysicsConfig::default();
    let mut a = sphere(Vec3::ZERO, 5.0, 0.5);
    let mut wall = sphere(Vec3::new(7.0, 0.0, 0.0), 5.0, 0.5);
    wall.pinned = true;

    a.collide_with(&mut wall, &config);

    assert_eq!(wall.position, Vec3::new(7.0, 0.0, 0.0));
    assert!(a.position.x < 0.0);
}

#[test]
fn test_plane_clear_particle_untouched() {
    let config = PhysicsConfig::default();
    let ground = Plane::new(Vec3::Y, 0.0);
    let mut p = sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, 0.5);
    p.set_velocity(Vec3::new(0.0, -3.0, 0.0));
    let before = p;

    let hit = p.collide_plane(&ground, &config);

    assert!(!hit, "exactly touching is not penetrating");
    assert_eq!(p, before);
}

#[test]
fn test_plane_penetration_resolved() {
    let config = PhysicsConfig::default();
    let ground = Plane::new(Vec3::Y, 0.0);
    let mut p = sphere(Vec3::new(2.0, 0.4, 0.0), 1.0, 0.5);
    p.set_velocity(Vec3::new(1.0, -2.0, 0.0));

    let hit = p.collide_plane(&ground, &config);

    assert!(hit);
    assert!((ground.distance(p.position) - 1.0).abs() < 1e-5, "resting on surface");
    assert_eq!(p.position.x, 2.0);
    // reflected (1, 2) scaled by -bounce gives previous = position - (0.5, 1.0)
    assert!((p.velocity() - Vec3::new(0.5, 1.0, 0.0)).length() < 1e-5, "v={:?}", p.velocity());
    assert!(p.collided);
}

#[test]
fn test_plane_slow_contact_not_flagged() {
    let config = PhysicsConfig::default();
    let ground = Plane::new(Vec3::Y, 0.0);
    let mut p = sphere(Vec3::new(0.0, 0.95, 0.0), 1.0, 0.5);
    p.set_velocity(Vec3::new(0.0, -0.1, 0.0));

    assert!(p.collide_plane(&ground, &config));

    // 0.05² is below the 0.01 threshold
    assert!(!p.collided);
    assert!((p.position.y - 1.0).abs() < 1e-5);
}

#[test]
fn test_plane_with_offset_and_tilt() {
    let config = PhysicsConfig::default();
    let wall = Plane::from_point_normal(Vec3::new(10.0, 0.0, 0.0), Vec3::NEG_X);
    let mut p = sphere(Vec3::new(9.5, 5.0, 0.0), 2.0, 0.0);

    assert!(p.collide_plane(&wall, &config));

    assert!((p.position.x - 8.0).abs() < 1e-5);
    assert_eq!(p.velocity(), Vec3::ZERO, "zero bounce kills velocity");
}

#[test]
fn test_plane_ignores_pinned_particle() {
    let config = PhysicsConfig::default();
    let ground = Plane::new(Vec3::Y, 0.0);
    let mut p = sphere(Vec3::new(0.0, 0.5, 0.0), 1.0, 0.5);
    p.pinned = true;
    let before = p;

    assert!(!p.collide_plane(&ground, &config));

    assert_eq!(p, before, "pinned particle is never moved by a plane");
}

#[test]
#[should_panic(expected = "non-finite particle position")]
fn test_plane_non_finite_position_panics() {
    let config = PhysicsConfig::default();
    let mut p = sphere(Vec3::ZERO, 1.0, 0.5);
    p.position.x = f32::NAN;
    p.collide_plane(&Plane::new(Vec3::Y, 0.0), &config);
}

#[test]
fn test_box_walls_face_inward() {
    let walls = Plane::box_walls(Vec2::ZERO, Vec2::new(1500.0, 800.0));
    let inside = Vec3::new(750.0, 400.0, 0.0);

    for wall in &walls {
        assert!(wall.distance(inside) > 0.0, "{:?} should face the interior", wall);
    }
    assert_eq!(walls[0].distance(Vec3::ZERO), 0.0, "floor through y=0");
    assert_eq!(walls[1].distance(Vec3::new(0.0, 800.0, 0.0)), 0.0, "ceiling at y=800");
    assert_eq!(walls[3].distance(Vec3::new(1500.0, 0.0, 0.0)), 0.0, "right wall at x=1500");
}

use phys_contact::collision::{
    CollisionGroup, ContactId, FeatureType, Filter, Manifold,
};
use phys_contact::contacts::{carry_impulses, ContactEventQueue, ContactEventType, ContactKind, FixtureRef};
use phys_contact::math::{Transform, Vector2};
use phys_contact::shapes::{ChainShape, CircleShape, EdgeShape, PolygonShape, ShapeType};
use phys_contact::bodies::{mix_friction, mix_restitution};
use phys_contact::{
    Body, BodyHandle, BodyType, Contact, ContactConfig, ContactListener, ContactRegistry, ContactWorld, FixtureDef,
    FixtureHandle, Material,
};
use approx::assert_relative_eq;
use rand::Rng;

fn at(x: f32, y: f32) -> Transform {
    Transform::from_position(Vector2::new(x, y))
}

fn add_body(world: &mut ContactWorld, x: f32, y: f32, body_type: BodyType) -> BodyHandle {
    world.create_body(Body::new(at(x, y), body_type))
}

fn add_circle(world: &mut ContactWorld, x: f32, y: f32, radius: f32) -> (BodyHandle, FixtureHandle) {
    let body = add_body(world, x, y, BodyType::Dynamic);
    let fixture = world
        .create_fixture(body, FixtureDef::new(CircleShape::new(radius)))
        .unwrap();
    (body, fixture)
}

fn add_box(world: &mut ContactWorld, x: f32, y: f32, hx: f32, hy: f32, body_type: BodyType) -> (BodyHandle, FixtureHandle) {
    let body = add_body(world, x, y, body_type);
    let fixture = world
        .create_fixture(body, FixtureDef::new(PolygonShape::new_box(hx, hy)))
        .unwrap();
    (body, fixture)
}

fn id(index_a: u8, index_b: u8) -> ContactId {
    ContactId::new(index_a, index_b, FeatureType::Face, FeatureType::Vertex)
}

#[test]
fn test_touching_circles_lifecycle() {
    let mut world = ContactWorld::new();

    let body_a = add_body(&mut world, 0.0, 0.0, BodyType::Dynamic);
    let body_b = add_body(&mut world, 1.9, 0.0, BodyType::Dynamic);
    world
        .create_fixture(
            body_a,
            FixtureDef::new(CircleShape::new(1.0)).with_friction(0.4).with_restitution(0.1),
        )
        .unwrap();
    world
        .create_fixture(
            body_b,
            FixtureDef::new(CircleShape::new(1.0)).with_friction(0.9).with_restitution(0.8),
        )
        .unwrap();

    assert_eq!(world.find_new_contacts().unwrap(), 1);
    assert_eq!(world.contact_count(), 1);

    // Pairs are only created once
    assert_eq!(world.find_new_contacts().unwrap(), 0);

    let mut events = ContactEventQueue::new();
    world.collide(Some(&mut events)).unwrap();
    assert_eq!(events.event_types(), vec![ContactEventType::Begin, ContactEventType::PreSolve]);

    let (handle, contact) = world.contacts().next().unwrap();
    assert_eq!(contact.kind(), ContactKind::CircleCircle);
    assert!(contact.is_touching());
    assert_eq!(contact.manifold().point_count, 1);
    assert_relative_eq!(contact.friction(), 0.6, epsilon = 1e-6);
    assert_relative_eq!(contact.restitution(), 0.8);

    let world_manifold = world.world_manifold(handle).unwrap();
    assert_relative_eq!(world_manifold.separations[0], -0.1, epsilon = 1e-5);

    // Still touching: only the pre-solve callback fires
    events.clear();
    world.collide(Some(&mut events)).unwrap();
    assert_eq!(events.event_types(), vec![ContactEventType::PreSolve]);
    assert_eq!(events.iter().next().unwrap().old_point_count, Some(1));

    // Apart but still within the fattened boxes: the contact survives untouched
    world.set_transform(body_b, at(2.05, 0.0)).unwrap();
    events.clear();
    world.collide(Some(&mut events)).unwrap();
    assert_eq!(events.event_types(), vec![ContactEventType::End]);
    assert_eq!(world.contact_count(), 1);
    assert!(!world.contact(handle).unwrap().is_touching());

    // Far apart: the contact is destroyed without further events
    world.set_transform(body_b, at(3.5, 0.0)).unwrap();
    events.clear();
    world.collide(Some(&mut events)).unwrap();
    assert!(events.is_empty());
    assert_eq!(world.contact_count(), 0);
    assert!(world.contact_list().is_none());
    assert_eq!(world.body_contacts(body_a).unwrap().count(), 0);
}

#[test]
fn test_material_mixing() {
    assert_relative_eq!(mix_friction(0.4, 0.9), 0.6, epsilon = 1e-6);
    assert_eq!(mix_friction(0.0, 0.9), 0.0);
    assert_eq!(mix_restitution(0.1, 0.8), 0.8);

    let mut world = ContactWorld::new();
    let ice = add_body(&mut world, 0.0, 0.0, BodyType::Dynamic);
    let rubber = add_body(&mut world, 1.5, 0.0, BodyType::Dynamic);
    let ice_fixture = world
        .create_fixture(ice, FixtureDef::new(CircleShape::new(1.0)).with_material(Material::ice()))
        .unwrap();
    world
        .create_fixture(rubber, FixtureDef::new(CircleShape::new(1.0)).with_material(Material::rubber()))
        .unwrap();
    assert_eq!(world.fixture(ice_fixture).unwrap().material(), &Material::ice());

    world.find_new_contacts().unwrap();
    let (_, contact) = world.contacts().next().unwrap();
    assert_relative_eq!(contact.friction(), (0.02f32 * 0.9).sqrt(), epsilon = 1e-6);
    assert_eq!(contact.restitution(), 0.8);
}

#[test]
fn test_reset_friction_and_restitution() {
    let mut world = ContactWorld::new();

    let body_a = add_body(&mut world, 0.0, 0.0, BodyType::Dynamic);
    let body_b = add_body(&mut world, 1.5, 0.0, BodyType::Dynamic);
    world
        .create_fixture(body_a, FixtureDef::new(CircleShape::new(1.0)).with_friction(0.4).with_restitution(0.1))
        .unwrap();
    world
        .create_fixture(body_b, FixtureDef::new(CircleShape::new(1.0)).with_friction(0.9).with_restitution(0.8))
        .unwrap();
    world.find_new_contacts().unwrap();

    let handle = world.contact_list().unwrap();
    let contact = world.contact_mut(handle).unwrap();

    contact.set_friction(2.0);
    contact.set_restitution(0.0);
    contact.set_tangent_speed(1.5);
    assert_eq!(contact.friction(), 2.0);
    assert_eq!(contact.restitution(), 0.0);
    assert_eq!(contact.tangent_speed(), 1.5);

    contact.reset_friction();
    contact.reset_restitution();
    assert_relative_eq!(contact.friction(), 0.6, epsilon = 1e-6);
    assert_relative_eq!(contact.restitution(), 0.8);

    // Overrides survive updates
    contact.set_friction(0.25);
    world.collide(None).unwrap();
    assert_eq!(world.contact(handle).unwrap().friction(), 0.25);
}

#[test]
fn test_carry_impulses_matches_ids() {
    let mut old = Manifold::new();
    old.point_count = 2;
    old.points[0].id = id(0, 1);
    old.points[0].normal_impulse = 5.0;
    old.points[0].tangent_impulse = 0.5;
    old.points[1].id = id(0, 2);
    old.points[1].normal_impulse = 7.0;
    old.points[1].tangent_impulse = 0.7;

    let mut new = Manifold::new();
    new.point_count = 2;
    new.points[0].id = id(0, 2);
    new.points[0].normal_impulse = 100.0;
    new.points[1].id = id(0, 3);
    new.points[1].normal_impulse = 100.0;
    new.points[1].tangent_impulse = 100.0;

    carry_impulses(&mut new, &old);

    assert_eq!(new.points[0].normal_impulse, 7.0);
    assert_eq!(new.points[0].tangent_impulse, 0.7);
    assert_eq!(new.points[1].normal_impulse, 0.0);
    assert_eq!(new.points[1].tangent_impulse, 0.0);
}

#[test]
fn test_carry_impulses_first_match_wins_and_is_idempotent() {
    let mut old = Manifold::new();
    old.point_count = 2;
    old.points[0].id = id(1, 1);
    old.points[0].normal_impulse = 3.0;
    old.points[1].id = id(1, 1);
    old.points[1].normal_impulse = 9.0;

    let mut new = Manifold::new();
    new.point_count = 1;
    new.points[0].id = id(1, 1);

    carry_impulses(&mut new, &old);
    assert_eq!(new.points[0].normal_impulse, 3.0);

    // Carrying a manifold onto itself changes nothing
    let snapshot = new;
    carry_impulses(&mut new, &snapshot);
    assert_eq!(new, snapshot);
}

#[test]
fn test_warm_starting_through_updates() {
    let mut world = ContactWorld::new();
    add_box(&mut world, 0.0, 0.0, 5.0, 0.5, BodyType::Static);
    add_box(&mut world, 0.0, 0.99, 0.5, 0.5, BodyType::Dynamic);

    world.find_new_contacts().unwrap();
    world.collide(None).unwrap();

    let handle = world.contact_list().unwrap();
    assert_eq!(world.contact(handle).unwrap().manifold().point_count, 2);

    // Impulses the solver wrote last step are carried over
    for (i, point) in world.contact_mut(handle).unwrap().manifold_mut().points_mut().iter_mut().enumerate() {
        point.normal_impulse = 1.0 + i as f32;
        point.tangent_impulse = -0.5;
    }

    world.collide(None).unwrap();
    let manifold = world.contact(handle).unwrap().manifold();
    assert_eq!(manifold.point_count, 2);
    assert_eq!(manifold.points[0].normal_impulse, 1.0);
    assert_eq!(manifold.points[1].normal_impulse, 2.0);
    assert_eq!(manifold.points[1].tangent_impulse, -0.5);
}

#[test]
fn test_disabling_lasts_one_update() {
    let mut world = ContactWorld::new();
    add_circle(&mut world, 0.0, 0.0, 1.0);
    add_circle(&mut world, 1.5, 0.0, 1.0);
    world.find_new_contacts().unwrap();

    let handle = world.contact_list().unwrap();
    world.contact_mut(handle).unwrap().set_enabled(false);
    assert!(!world.contact(handle).unwrap().is_enabled());

    // Disabling does not skip the evaluation
    let mut events = ContactEventQueue::new();
    world.update_contact(handle, Some(&mut events)).unwrap();
    assert!(world.contact(handle).unwrap().is_enabled());
    assert!(world.contact(handle).unwrap().is_touching());
    assert_eq!(events.event_types(), vec![ContactEventType::Begin, ContactEventType::PreSolve]);
}

#[test]
fn test_box_landing_on_ground_begins_once() {
    let mut world = ContactWorld::new();
    add_box(&mut world, 0.0, 0.0, 5.0, 0.5, BodyType::Static);
    let (block, _) = add_box(&mut world, 0.0, 1.05, 0.5, 0.5, BodyType::Dynamic);

    assert_eq!(world.find_new_contacts().unwrap(), 1);
    let handle = world.contact_list().unwrap();

    let mut events = ContactEventQueue::new();
    world.collide(Some(&mut events)).unwrap();
    assert!(events.is_empty());
    assert_eq!(world.contact(handle).unwrap().manifold().point_count, 0);

    world.set_transform(block, at(0.0, 0.99)).unwrap();
    world.collide(Some(&mut events)).unwrap();
    assert_eq!(events.event_types(), vec![ContactEventType::Begin, ContactEventType::PreSolve]);
    assert!(events.events_of_type(ContactEventType::End).is_empty());

    let contact = world.contact(handle).unwrap();
    assert!(contact.is_touching());
    assert_eq!(contact.manifold().point_count, 2);
}

struct DisableInPreSolve {
    calls: usize,
}

impl ContactListener for DisableInPreSolve {
    fn pre_solve(&mut self, contact: &mut Contact, _old_manifold: &Manifold) {
        self.calls += 1;
        contact.set_enabled(false);
        contact.set_friction(0.123);
    }
}

#[test]
fn test_pre_solve_changes_survive_the_update() {
    let mut world = ContactWorld::new();
    let (a, _) = add_circle(&mut world, 0.0, 0.0, 1.0);
    let (b, _) = add_circle(&mut world, 1.5, 0.0, 1.0);
    add_circle(&mut world, 8.0, 0.0, 1.0);
    add_circle(&mut world, 9.5, 0.0, 1.0);
    assert_eq!(world.find_new_contacts().unwrap(), 2);

    // The same listener serves consecutive steps
    let mut listener = DisableInPreSolve { calls: 0 };
    world.collide(Some(&mut listener)).unwrap();
    assert_eq!(listener.calls, 2);
    world.collide(Some(&mut listener)).unwrap();
    assert_eq!(listener.calls, 4);

    for (_, contact) in world.contacts() {
        assert!(contact.is_touching());
        assert!(!contact.is_enabled());
        assert_relative_eq!(contact.friction(), 0.123);
    }

    let islands = world.build_islands().unwrap();
    assert_eq!(islands.len(), 4);
    assert!(islands.iter().all(|island| island.contact_count() == 0));
    assert!(islands.iter().any(|island| island.contains_body(a) && !island.contains_body(b)));
}

#[test]
fn test_destroying_a_touching_contact_wakes_bodies() {
    let mut world = ContactWorld::new();
    let (body_a, _) = add_circle(&mut world, 0.0, 0.0, 1.0);
    let (body_b, _) = add_circle(&mut world, 1.9, 0.0, 1.0);
    world.find_new_contacts().unwrap();
    world.collide(None).unwrap();

    let handle = world.contact_list().unwrap();
    assert_eq!(world.contact(handle).unwrap().manifold().point_count, 1);

    world.body_mut(body_a).unwrap().set_awake(false);
    world.body_mut(body_b).unwrap().set_awake(false);

    world.destroy_contact(handle).unwrap();
    assert!(world.body(body_a).unwrap().is_awake());
    assert!(world.body(body_b).unwrap().is_awake());
}

#[test]
fn test_destroying_an_empty_contact_keeps_bodies_asleep() {
    let mut world = ContactWorld::new();
    let (body_a, _) = add_circle(&mut world, 0.0, 0.0, 1.0);
    let (body_b, _) = add_circle(&mut world, 2.1, 0.0, 1.0);
    world.find_new_contacts().unwrap();
    world.collide(None).unwrap();

    let handle = world.contact_list().unwrap();
    assert_eq!(world.contact(handle).unwrap().manifold().point_count, 0);

    world.body_mut(body_a).unwrap().set_awake(false);
    world.body_mut(body_b).unwrap().set_awake(false);

    world.destroy_contact(handle).unwrap();
    assert!(!world.body(body_a).unwrap().is_awake());
    assert!(!world.body(body_b).unwrap().is_awake());
}

#[test]
fn test_sensor_reports_overlap_without_manifold() {
    let mut world = ContactWorld::new();
    let (_, sensor) = add_circle(&mut world, 0.0, 0.0, 1.0);
    let (body, _) = add_box(&mut world, 1.2, 0.0, 0.5, 0.5, BodyType::Dynamic);
    world.set_sensor(sensor, true).unwrap();
    assert!(world.fixture(sensor).unwrap().is_sensor());

    world.find_new_contacts().unwrap();

    let mut events = ContactEventQueue::new();
    world.collide(Some(&mut events)).unwrap();
    assert_eq!(events.event_types(), vec![ContactEventType::Begin]);

    let (_, contact) = world.contacts().next().unwrap();
    assert!(contact.is_touching());
    assert_eq!(contact.manifold().point_count, 0);

    // Leaving the sensor ends the overlap
    world.set_transform(body, at(1.65, 0.0)).unwrap();
    events.clear();
    world.collide(Some(&mut events)).unwrap();
    assert_eq!(events.event_types(), vec![ContactEventType::End]);
}

#[test]
fn test_registry_swaps_mirrored_pairs() {
    let mut world = ContactWorld::new();
    let (_, circle) = add_circle(&mut world, 0.0, 0.0, 1.0);
    let (_, polygon) = add_box(&mut world, 1.0, 0.0, 0.5, 0.5, BodyType::Dynamic);

    let registry = ContactRegistry::with_default_types();
    let contact = registry
        .create(
            FixtureRef::new(circle, world.fixture(circle).unwrap(), 0),
            FixtureRef::new(polygon, world.fixture(polygon).unwrap(), 0),
        )
        .unwrap();

    assert_eq!(contact.kind(), ContactKind::PolygonCircle);
    assert_eq!(contact.fixture_a(), polygon);
    assert_eq!(contact.fixture_b(), circle);

    // The world goes through the same dispatch
    world.find_new_contacts().unwrap();
    let (_, contact) = world.contacts().next().unwrap();
    assert_eq!(contact.fixture_a(), polygon);
}

#[test]
fn test_mixed_pairs_match_in_either_order() {
    let chain = || {
        ChainShape::new_chain(
            &[
                Vector2::new(-4.0, 0.0),
                Vector2::new(-1.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(4.0, 0.0),
            ],
            None,
            None,
        )
        .unwrap()
    };
    let edge = || EdgeShape::new(Vector2::new(-5.0, 0.0), Vector2::new(5.0, 0.0));

    let cases: Vec<(ContactKind, FixtureDef, FixtureDef, Vector2)> = vec![
        (
            ContactKind::EdgeCircle,
            FixtureDef::new(edge()),
            FixtureDef::new(CircleShape::new(0.5)),
            Vector2::new(0.0, 0.4),
        ),
        (
            ContactKind::EdgePolygon,
            FixtureDef::new(edge()),
            FixtureDef::new(PolygonShape::new_box(0.5, 0.5)),
            Vector2::new(0.0, 0.49),
        ),
        (
            ContactKind::ChainCircle,
            FixtureDef::new(chain()),
            FixtureDef::new(CircleShape::new(0.5)),
            Vector2::new(-2.5, 0.4),
        ),
        (
            ContactKind::ChainPolygon,
            FixtureDef::new(chain()),
            FixtureDef::new(PolygonShape::new_box(0.5, 0.5)),
            Vector2::new(-2.5, 0.49),
        ),
    ];

    for (kind, ground_def, mover_def, position) in cases {
        let mut results = Vec::new();

        for swapped in [false, true] {
            let mut world = ContactWorld::new();
            let ground = add_body(&mut world, 0.0, 0.0, BodyType::Static);
            let ground_fixture = world.create_fixture(ground, ground_def.clone()).unwrap();
            let mover = add_body(&mut world, position.x, position.y, BodyType::Dynamic);
            let mover_fixture = world.create_fixture(mover, mover_def.clone()).unwrap();

            let handle = if swapped {
                world.add_pair(mover_fixture, 0, ground_fixture, 0)
            } else {
                world.add_pair(ground_fixture, 0, mover_fixture, 0)
            }
            .unwrap()
            .unwrap();
            world.update_contact(handle, None).unwrap();

            let contact = world.contact(handle).unwrap();
            assert_eq!(contact.kind(), kind);
            assert_eq!(contact.fixture_a(), ground_fixture);
            assert_eq!(contact.fixture_b(), mover_fixture);
            assert!(contact.is_touching(), "{:?} not touching, swapped = {}", kind, swapped);
            results.push((contact.manifold().point_count, contact.is_touching()));
        }

        assert_eq!(results[0], results[1], "{:?} differs by argument order", kind);
    }
}

#[test]
fn test_registry_is_symmetric() {
    let registry = ContactRegistry::with_default_types();
    assert!(registry.is_initialized());

    let mut rng = rand::thread_rng();
    for _ in 0..64 {
        let type_a = ShapeType::ALL[rng.gen_range(0..ShapeType::COUNT)];
        let type_b = ShapeType::ALL[rng.gen_range(0..ShapeType::COUNT)];

        let forward = registry.registration(type_a, type_b);
        let backward = registry.registration(type_b, type_a);
        assert_eq!(forward.is_some(), backward.is_some());

        if let (Some(forward), Some(backward)) = (forward, backward) {
            if type_a == type_b {
                assert!(forward.primary);
            } else {
                assert_ne!(forward.primary, backward.primary);
            }
        }
    }

    for kind in ContactKind::ALL {
        let (type_a, type_b) = kind.shape_types();
        assert!(registry.registration(type_a, type_b).unwrap().primary);
    }

    // Pairs without a manifold routine
    assert!(registry.registration(ShapeType::Edge, ShapeType::Edge).is_none());
    assert!(registry.registration(ShapeType::Chain, ShapeType::Edge).is_none());
    assert!(registry.registration(ShapeType::Chain, ShapeType::Chain).is_none());
}

#[test]
fn test_registry_initialization_is_idempotent() {
    let mut registry = ContactRegistry::new();
    assert!(!registry.is_initialized());
    assert!(registry.registration(ShapeType::Circle, ShapeType::Circle).is_none());

    registry.initialize();
    registry.initialize();
    assert!(registry.is_initialized());
    assert!(registry.registration(ShapeType::Circle, ShapeType::Circle).is_some());
}

#[test]
fn test_unsupported_pairs_are_not_created() {
    let mut world = ContactWorld::new();
    let a = add_body(&mut world, 0.0, 0.0, BodyType::Dynamic);
    let b = add_body(&mut world, 0.0, 0.0, BodyType::Dynamic);
    let edge = EdgeShape::new(Vector2::new(-1.0, 0.0), Vector2::new(1.0, 0.0));
    let fa = world.create_fixture(a, FixtureDef::new(edge.clone())).unwrap();
    let fb = world.create_fixture(b, FixtureDef::new(edge)).unwrap();

    assert_eq!(world.add_pair(fa, 0, fb, 0).unwrap(), None);
    assert_eq!(world.find_new_contacts().unwrap(), 0);
}

#[test]
fn test_pairs_need_a_dynamic_body_on_different_bodies() {
    let mut world = ContactWorld::new();
    let (_, ground_a) = add_box(&mut world, 0.0, 0.0, 1.0, 1.0, BodyType::Static);
    let (_, ground_b) = add_box(&mut world, 0.5, 0.0, 1.0, 1.0, BodyType::Kinematic);
    assert_eq!(world.add_pair(ground_a, 0, ground_b, 0).unwrap(), None);

    let body = add_body(&mut world, 0.0, 0.0, BodyType::Dynamic);
    let f1 = world.create_fixture(body, FixtureDef::new(CircleShape::new(1.0))).unwrap();
    let f2 = world.create_fixture(body, FixtureDef::new(CircleShape::new(0.5))).unwrap();
    assert_eq!(world.add_pair(f1, 0, f2, 0).unwrap(), None);

    // Dynamic against static works, in either argument order, once
    let created = world.add_pair(ground_a, 0, f1, 0).unwrap();
    assert!(created.is_some());
    assert_eq!(world.add_pair(f1, 0, ground_a, 0).unwrap(), None);
}

#[test]
fn test_filter_change_destroys_contact() {
    let mut world = ContactWorld::new();
    let (_, fixture_a) = add_circle(&mut world, 0.0, 0.0, 1.0);
    let (_, fixture_b) = add_circle(&mut world, 1.5, 0.0, 1.0);
    world.find_new_contacts().unwrap();
    world.collide(None).unwrap();
    assert_eq!(world.contact_count(), 1);

    let no_collide = Filter { group_index: -3, ..Filter::default() };
    world.set_filter_data(fixture_a, no_collide).unwrap();
    world.set_filter_data(fixture_b, no_collide).unwrap();
    assert!(world.contact(world.contact_list().unwrap()).unwrap().is_flagged_for_filtering());

    world.collide(None).unwrap();
    assert_eq!(world.contact_count(), 0);

    // Rejected pairs are not recreated
    assert_eq!(world.find_new_contacts().unwrap(), 0);
}

#[test]
fn test_filter_change_that_still_accepts_keeps_contact() {
    let mut world = ContactWorld::new();
    let (_, fixture_a) = add_circle(&mut world, 0.0, 0.0, 1.0);
    add_circle(&mut world, 1.5, 0.0, 1.0);
    world.find_new_contacts().unwrap();

    let filter = Filter {
        category_bits: CollisionGroup::DYNAMIC,
        ..Filter::default()
    };
    world.set_filter_data(fixture_a, filter).unwrap();
    world.collide(None).unwrap();

    let (_, contact) = world.contacts().next().unwrap();
    assert!(!contact.is_flagged_for_filtering());
    assert!(contact.is_touching());
}

#[test]
fn test_sleeping_pairs_are_skipped() {
    let mut world = ContactWorld::new();
    let (body_a, _) = add_circle(&mut world, 0.0, 0.0, 1.0);
    let (body_b, _) = add_circle(&mut world, 1.9, 0.0, 1.0);
    world.find_new_contacts().unwrap();

    world.body_mut(body_a).unwrap().set_awake(false);
    world.body_mut(body_b).unwrap().set_awake(false);

    world.collide(None).unwrap();
    let handle = world.contact_list().unwrap();
    assert!(!world.contact(handle).unwrap().is_touching());

    world.config_mut().allow_sleeping = false;
    world.collide(None).unwrap();
    assert!(world.contact(handle).unwrap().is_touching());

    // Starting to touch wakes both bodies
    assert!(world.body(body_a).unwrap().is_awake());
    assert!(world.body(body_b).unwrap().is_awake());
}

#[test]
fn test_world_list_is_most_recent_first() {
    let mut world = ContactWorld::new();
    let (_, left) = add_circle(&mut world, 0.0, 0.0, 1.0);
    let (_, middle) = add_circle(&mut world, 1.5, 0.0, 1.0);
    let (_, right) = add_circle(&mut world, 3.0, 0.0, 1.0);

    let first = world.add_pair(left, 0, middle, 0).unwrap().unwrap();
    let second = world.add_pair(middle, 0, right, 0).unwrap().unwrap();

    let order: Vec<_> = world.contacts().map(|(handle, _)| handle).collect();
    assert_eq!(order, vec![second, first]);
    assert_eq!(world.contact(second).unwrap().next(), Some(first));
    assert_eq!(world.contact(first).unwrap().prev(), Some(second));

    world.destroy_contact(second).unwrap();
    assert_eq!(world.contact_list(), Some(first));
    assert_eq!(world.contact(first).unwrap().prev(), None);
}

#[test]
fn test_contact_graph_links_both_bodies() {
    let mut world = ContactWorld::new();
    let (left_body, left) = add_circle(&mut world, 0.0, 0.0, 1.0);
    let (middle_body, middle) = add_circle(&mut world, 1.5, 0.0, 1.0);
    let (right_body, right) = add_circle(&mut world, 3.0, 0.0, 1.0);

    let first = world.add_pair(left, 0, middle, 0).unwrap().unwrap();
    let second = world.add_pair(middle, 0, right, 0).unwrap().unwrap();

    let others: Vec<BodyHandle> = world.body_contacts(middle_body).unwrap().map(|edge| edge.other).collect();
    assert_eq!(others, vec![right_body, left_body]);

    let contacts: Vec<_> = world.body_contacts(middle_body).unwrap().map(|edge| edge.contact).collect();
    assert_eq!(contacts, vec![second, first]);

    let left_edges: Vec<_> = world.body_contacts(left_body).unwrap().collect();
    assert_eq!(left_edges.len(), 1);
    assert_eq!(left_edges[0].other, middle_body);

    world.destroy_contact(first).unwrap();
    assert_eq!(world.body_contacts(left_body).unwrap().count(), 0);
    let remaining: Vec<_> = world.body_contacts(middle_body).unwrap().map(|edge| edge.other).collect();
    assert_eq!(remaining, vec![right_body]);

    // Removing a body takes its contacts along
    world.destroy_body(right_body).unwrap();
    assert_eq!(world.contact_count(), 0);
    assert!(world.body_contacts(middle_body).unwrap().next().is_none());
}

#[test]
fn test_destroy_fixture_removes_its_contacts() {
    let mut world = ContactWorld::new();
    let (body, circle) = add_circle(&mut world, 0.0, 0.0, 1.0);
    add_circle(&mut world, 1.5, 0.0, 1.0);
    world.find_new_contacts().unwrap();
    assert_eq!(world.contact_count(), 1);

    world.destroy_fixture(circle).unwrap();
    assert_eq!(world.contact_count(), 0);
    assert!(world.body(body).unwrap().fixtures().is_empty());
    assert!(world.fixture(circle).is_err());
}

#[test]
fn test_islands_follow_touching_contacts() {
    let mut world = ContactWorld::new();
    let (ground, _) = add_box(&mut world, 0.0, 0.0, 5.0, 0.5, BodyType::Static);
    let (lower, _) = add_box(&mut world, 0.0, 0.99, 0.5, 0.5, BodyType::Dynamic);
    let (upper, _) = add_box(&mut world, 0.0, 1.98, 0.5, 0.5, BodyType::Dynamic);
    let (other, _) = add_box(&mut world, 3.0, 0.99, 0.5, 0.5, BodyType::Dynamic);
    let (loner, _) = add_circle(&mut world, 20.0, 20.0, 1.0);

    world.find_new_contacts().unwrap();
    world.collide(None).unwrap();
    assert_eq!(world.contact_count(), 3);

    let islands = world.build_islands().unwrap();
    assert_eq!(islands.len(), 3);

    let stack = islands.iter().find(|island| island.contains_body(lower)).unwrap();
    assert!(stack.contains_body(upper));
    assert!(stack.contains_body(ground));
    assert!(!stack.contains_body(other));
    assert_eq!(stack.body_count(), 3);
    assert_eq!(stack.contact_count(), 2);

    // Static bodies may join several islands
    let side = islands.iter().find(|island| island.contains_body(other)).unwrap();
    assert!(side.contains_body(ground));
    assert_eq!(side.contact_count(), 1);

    let alone = islands.iter().find(|island| island.contains_body(loner)).unwrap();
    assert_eq!(alone.body_count(), 1);
    assert_eq!(alone.contact_count(), 0);

    assert!(!world.body(ground).unwrap().is_in_island());
    assert!(!world.body(ground).unwrap().is_awake());
}

#[test]
fn test_islands_skip_sleeping_and_sensor_links() {
    let mut world = ContactWorld::new();
    let (sleeper, _) = add_circle(&mut world, 0.0, 0.0, 1.0);
    let (sensor_body, sensor) = add_circle(&mut world, 1.5, 0.0, 1.0);
    world.set_sensor(sensor, true).unwrap();

    world.find_new_contacts().unwrap();
    world.collide(None).unwrap();
    assert!(world.contacts().next().unwrap().1.is_touching());

    world.body_mut(sleeper).unwrap().set_awake(false);

    let islands = world.build_islands().unwrap();
    assert_eq!(islands.len(), 1);
    assert!(islands[0].contains_body(sensor_body));
    assert!(!islands[0].contains_body(sleeper));
    assert!(!world.body(sleeper).unwrap().is_awake());
}

#[test]
fn test_disabled_contacts_do_not_join_islands() {
    let mut world = ContactWorld::new();
    let (a, _) = add_circle(&mut world, 0.0, 0.0, 1.0);
    let (b, _) = add_circle(&mut world, 1.5, 0.0, 1.0);
    world.find_new_contacts().unwrap();
    world.collide(None).unwrap();

    let handle = world.contact_list().unwrap();
    world.contact_mut(handle).unwrap().set_enabled(false);

    let islands = world.build_islands().unwrap();
    assert_eq!(islands.len(), 2);
    assert!(islands.iter().all(|island| island.contact_count() == 0));
    assert!(islands.iter().any(|island| island.contains_body(a)));
    assert!(islands.iter().any(|island| island.contains_body(b)));
}

#[test]
fn test_chain_children_get_their_own_contacts() {
    let mut world = ContactWorld::with_config(ContactConfig::default());
    let ground = add_body(&mut world, 0.0, 0.0, BodyType::Static);
    let chain = ChainShape::new_chain(
        &[
            Vector2::new(-4.0, 0.0),
            Vector2::new(-1.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(4.0, 0.0),
        ],
        None,
        None,
    )
    .unwrap();
    world.create_fixture(ground, FixtureDef::new(chain)).unwrap();

    // Straddles the vertex between children 0 and 1
    add_box(&mut world, -1.0, 0.49, 0.5, 0.5, BodyType::Dynamic);

    assert_eq!(world.find_new_contacts().unwrap(), 2);
    world.collide(None).unwrap();

    let mut children: Vec<usize> = world
        .contacts()
        .map(|(_, contact)| {
            assert_eq!(contact.kind(), ContactKind::ChainPolygon);
            contact.child_index_a()
        })
        .collect();
    children.sort();
    assert_eq!(children, vec![0, 1]);
    assert!(world.contacts().any(|(_, contact)| contact.is_touching()));
}

#[test]
fn test_one_sided_chain_loop_contains_circle_from_inside() {
    let mut world = ContactWorld::new();
    let ground = add_body(&mut world, 0.0, 0.0, BodyType::Static);

    // Clockwise loop so the edge normals face inwards
    let walls = ChainShape::new_loop(&[
        Vector2::new(-2.0, -2.0),
        Vector2::new(-2.0, 2.0),
        Vector2::new(2.0, 2.0),
        Vector2::new(2.0, -2.0),
    ])
    .unwrap();
    world.create_fixture(ground, FixtureDef::new(walls)).unwrap();

    add_circle(&mut world, 0.0, -1.6, 0.5);
    world.find_new_contacts().unwrap();
    world.collide(None).unwrap();

    let touching: Vec<_> = world
        .contacts()
        .filter(|(_, contact)| contact.is_touching())
        .map(|(_, contact)| contact.kind())
        .collect();
    assert_eq!(touching, vec![ContactKind::ChainCircle]);
}

#[test]
fn test_edge_polygon_contact_through_world() {
    let mut world = ContactWorld::new();
    let ground = add_body(&mut world, 0.0, 0.0, BodyType::Static);
    let edge = EdgeShape::new(Vector2::new(-5.0, 0.0), Vector2::new(5.0, 0.0));
    world.create_fixture(ground, FixtureDef::new(edge)).unwrap();
    add_box(&mut world, 0.0, 0.49, 0.5, 0.5, BodyType::Dynamic);

    world.find_new_contacts().unwrap();
    let mut events = ContactEventQueue::new();
    world.collide(Some(&mut events)).unwrap();

    let (_, contact) = world.contacts().next().unwrap();
    assert_eq!(contact.kind(), ContactKind::EdgePolygon);
    assert_eq!(contact.manifold().point_count, 2);
    assert_eq!(events.events_of_type(ContactEventType::Begin).len(), 1);
    assert_eq!(events.events_for_fixture(contact.fixture_a()).len(), 2);
}

#[test]
fn test_toi_cache() {
    let mut world = ContactWorld::new();
    add_circle(&mut world, 0.0, 0.0, 1.0);
    add_circle(&mut world, 1.5, 0.0, 1.0);
    world.find_new_contacts().unwrap();

    let handle = world.contact_list().unwrap();
    let contact = world.contact_mut(handle).unwrap();
    assert_eq!(contact.toi(), None);

    contact.set_toi(0.25);
    contact.set_toi(0.5);
    assert_eq!(contact.toi(), Some(0.5));
    assert_eq!(contact.toi_count(), 2);

    contact.reset_toi();
    assert_eq!(contact.toi(), None);
    assert_eq!(contact.toi_count(), 0);
}

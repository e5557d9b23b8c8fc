//! End-to-end frame loop tests: a world with physics, walls, and gameplay
//! listeners, driven for multiple frames.

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use arcade_engine::foundation::logging;
use arcade_engine::prelude::*;

fn spawn_wall(world: &mut World, x: f32, y: f32, width: f32, height: f32) -> EntityId {
    let id = world.create_entity("wall");
    world.get_component_mut::<Transform>(id).unwrap().position = Vec2::new(x, y);
    world.add_component(id, BoxCollider::new().with_size(width, height));
    world.add_component(
        id,
        ShapeRenderer::new(Shape::Rect { width, height }),
    );
    id
}

fn spawn_ball(world: &mut World, x: f32, y: f32, vx: f32, vy: f32) -> EntityId {
    let id = world.create_entity("ball");
    world.get_component_mut::<Transform>(id).unwrap().position = Vec2::new(x, y);
    world.add_component(id, RigidBody::new().with_velocity(vx, vy));
    world.add_component(id, CircleCollider::new().with_radius(1.0));
    world.add_component(id, ShapeRenderer::new(Shape::Circle { radius: 1.0 }));
    id
}

#[test]
fn ball_bounces_around_a_closed_arena() {
    logging::init_for_tests();

    let mut world = World::new();
    world.init(Viewport {
        width: 200.0,
        height: 200.0,
    });
    world.add_system(PhysicsSystem::new());

    // Four walls enclosing x, y in [-100, 100], each 10 thick.
    spawn_wall(&mut world, -105.0, 0.0, 10.0, 220.0);
    spawn_wall(&mut world, 105.0, 0.0, 10.0, 220.0);
    spawn_wall(&mut world, 0.0, -105.0, 220.0, 10.0);
    spawn_wall(&mut world, 0.0, 105.0, 220.0, 10.0);

    let ball = spawn_ball(&mut world, 0.0, 0.0, 173.0, 91.0);

    let bounces = Rc::new(RefCell::new(0u32));
    let sink = Rc::clone(&bounces);
    world.events().on(topics::COLLISION, move |payload| {
        if payload.as_collision().is_some() {
            *sink.borrow_mut() += 1;
        }
    });

    // Ten simulated seconds at 60 Hz.
    for _ in 0..600 {
        world.update(1.0 / 60.0);
    }

    let position = world.get_component::<Transform>(ball).unwrap().position;
    assert!(position.x.abs() < 100.0, "ball escaped the arena: {position:?}");
    assert!(position.y.abs() < 100.0, "ball escaped the arena: {position:?}");
    assert!(*bounces.borrow() > 0);

    // Elastic bounces preserve speed.
    let body = world.get_component::<RigidBody>(ball).unwrap();
    let expected = Vec2::new(173.0, 91.0).norm();
    assert_relative_eq!(body.speed(), expected, epsilon = 1e-2);
}

#[test]
fn gameplay_listener_destroys_projectile_on_impact() {
    let mut world = World::new();
    world.init(Viewport::default());
    world.add_system(PhysicsSystem::with_config(
        PhysicsConfig::new().with_max_dt(1.0),
    ));

    spawn_wall(&mut world, 35.0, 0.0, 10.0, 20.0);
    let bullet = spawn_ball(&mut world, 0.0, 0.0, 30.0, 0.0);

    // Record what was hit; destruction happens on the frame after the
    // event since listeners do not hold the world.
    let hits: Rc<RefCell<Vec<EntityId>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&hits);
    world.events().on(topics::COLLISION, move |payload| {
        if let Some(event) = payload.as_collision() {
            sink.borrow_mut().push(event.entity_a);
        }
    });

    world.update(1.0);
    for &hit in hits.borrow().iter() {
        world.destroy(hit);
    }
    assert!(world.is_alive(bullet));

    world.update(1.0 / 60.0);
    assert!(!world.is_alive(bullet));
    assert_eq!(world.find_by_tag("ball"), None);
}

#[test]
fn physics_system_is_reachable_by_type() {
    let mut world = World::new();
    world.add_system(PhysicsSystem::new());

    let system = world.get_system::<PhysicsSystem>().unwrap();
    assert_eq!(system.config().max_bounces, 5);

    world.remove_system::<PhysicsSystem>();
    assert!(world.get_system::<PhysicsSystem>().is_none());
}

#[test]
fn dispose_after_play_leaves_world_empty() {
    let mut world = World::new();
    world.init(Viewport::default());
    world.add_system(PhysicsSystem::new());
    spawn_wall(&mut world, 50.0, 0.0, 10.0, 100.0);
    spawn_ball(&mut world, 0.0, 0.0, 20.0, 0.0);

    world.update(1.0 / 60.0);
    world.dispose();

    assert_eq!(world.entity_count(), 0);
    assert!(world.get_system::<PhysicsSystem>().is_none());
}

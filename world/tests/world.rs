use lane_defence_core::{
    CellCoord, Command, Event, FieldPoint, Lane, MessageTint, Outcome, PlacementError, Rules,
};
use lane_defence_world::{apply, query, World};

fn classic_world() -> World {
    World::new(Rules::classic()).expect("classic rules are valid")
}

fn tick(world: &mut World, events: &mut Vec<Event>) {
    apply(world, Command::Tick { pointer: None }, events);
}

#[test]
fn placement_spends_once_and_rejects_repeat_clicks() {
    let mut world = classic_world();
    let mut events = Vec::new();
    let cell = CellCoord::new(2, 3);

    apply(&mut world, Command::PlaceDefender { cell }, &mut events);
    apply(&mut world, Command::PlaceDefender { cell }, &mut events);

    assert!(matches!(
        events[0],
        Event::DefenderPlaced { resources: 200, .. }
    ));
    assert_eq!(
        events[1],
        Event::DefenderPlacementRejected {
            cell,
            reason: PlacementError::Occupied,
        }
    );
    assert_eq!(query::economy(&world).resources, 200);
    assert_eq!(query::defenders(&world).len(), 1);
    assert!(query::defender_at(&world, cell).is_some());
}

#[test]
fn placement_without_funds_changes_nothing() {
    let mut rules = Rules::classic();
    rules.starting_resources = 50;
    let mut world = World::new(rules).expect("valid rules");
    let mut events = Vec::new();

    apply(
        &mut world,
        Command::PlaceDefender {
            cell: CellCoord::new(4, 2),
        },
        &mut events,
    );

    assert_eq!(
        events,
        vec![Event::DefenderPlacementRejected {
            cell: CellCoord::new(4, 2),
            reason: PlacementError::InsufficientResources,
        }]
    );
    assert_eq!(query::economy(&world).resources, 50);
    assert!(query::defenders(&world).is_empty());
}

#[test]
fn single_defender_defeats_single_enemy() {
    let mut world = classic_world();
    let mut events = Vec::new();
    let lane = Lane::new(3);

    apply(
        &mut world,
        Command::PlaceDefender {
            cell: CellCoord::new(0, 3),
        },
        &mut events,
    );
    assert_eq!(query::economy(&world).resources, 200);

    apply(&mut world, Command::SpawnEnemy { lane, speed: 0.5 }, &mut events);
    assert_eq!(query::lane_population(&world, lane), 1);

    let mut defeated = false;
    for _ in 0..3_000 {
        events.clear();
        tick(&mut world, &mut events);
        if events
            .iter()
            .any(|event| matches!(event, Event::EnemyDefeated { reward: 10, .. }))
        {
            defeated = true;
            break;
        }
    }

    assert!(defeated, "enemy should fall before reaching the defender");
    let economy = query::economy(&world);
    assert_eq!((economy.resources, economy.score), (210, 10));
    assert_eq!(query::lane_population(&world, lane), 0);
    assert!(query::occupied_lanes(&world).is_empty());
    assert_eq!(query::enemy_count(&world), 0);
    assert_eq!(query::outcome(&world), None);
}

#[test]
fn contact_holds_enemy_until_defender_falls() {
    let mut world = classic_world();
    let mut events = Vec::new();

    apply(
        &mut world,
        Command::PlaceDefender {
            cell: CellCoord::new(7, 1),
        },
        &mut events,
    );
    apply(
        &mut world,
        Command::SpawnEnemy {
            lane: Lane::new(1),
            speed: 0.5,
        },
        &mut events,
    );

    for _ in 0..100 {
        tick(&mut world, &mut events);
    }
    let held = query::enemies(&world)[0];
    assert_eq!(held.movement, 0.0);
    tick(&mut world, &mut events);
    assert_eq!(query::enemies(&world)[0].bounds.x, held.bounds.x);

    events.clear();
    while !events
        .iter()
        .any(|event| matches!(event, Event::DefenderDestroyed { .. }))
    {
        tick(&mut world, &mut events);
    }

    let released = query::enemies(&world)[0];
    assert!((released.movement - 0.5).abs() < f32::EPSILON);
    assert!(query::defender_at(&world, CellCoord::new(7, 1)).is_none());
}

fn defender_health_after_contact(enemies: usize, ticks: usize) -> f32 {
    let mut world = classic_world();
    let mut events = Vec::new();
    let cell = CellCoord::new(7, 1);

    apply(&mut world, Command::PlaceDefender { cell }, &mut events);
    for _ in 0..enemies {
        apply(
            &mut world,
            Command::SpawnEnemy {
                lane: Lane::new(1),
                speed: 0.5,
            },
            &mut events,
        );
    }
    for _ in 0..ticks {
        tick(&mut world, &mut events);
    }

    query::defenders(&world)
        .into_iter()
        .find(|defender| defender.cell == cell)
        .map_or(0.0, |defender| defender.health)
}

#[test]
fn contact_damage_stacks_per_touching_enemy() {
    let lone = defender_health_after_contact(1, 20);
    let pair = defender_health_after_contact(2, 20);

    assert!(lone < 100.0, "single enemy should already be in contact");
    assert!(
        ((100.0 - pair) - 2.0 * (100.0 - lone)).abs() < 1e-3,
        "two enemies should deal twice the damage: lone {lone}, pair {pair}"
    );
}

#[test]
fn simultaneous_kills_are_each_rewarded_once() {
    let mut world = classic_world();
    let mut events = Vec::new();
    let (upper, lower, bystander) = (Lane::new(1), Lane::new(2), Lane::new(4));

    for row in [1, 2] {
        apply(
            &mut world,
            Command::PlaceDefender {
                cell: CellCoord::new(0, row),
            },
            &mut events,
        );
    }
    for (lane, speed) in [(upper, 0.5), (lower, 0.5), (bystander, 0.1)] {
        apply(&mut world, Command::SpawnEnemy { lane, speed }, &mut events);
    }
    assert_eq!(query::economy(&world).resources, 100);

    let health_in = |world: &World, lane: Lane| {
        query::enemies(world)
            .into_iter()
            .find(|enemy| enemy.lane == lane)
            .map(|enemy| enemy.health)
    };

    let mut defeated = Vec::new();
    for _ in 0..3_000 {
        events.clear();
        tick(&mut world, &mut events);
        defeated = events
            .iter()
            .filter_map(|event| match event {
                Event::EnemyDefeated { lane, reward, .. } => Some((*lane, *reward)),
                _ => None,
            })
            .collect();
        if !defeated.is_empty() {
            break;
        }
        assert_eq!(
            health_in(&world, upper),
            health_in(&world, lower),
            "both projectiles must land on the same tick"
        );
    }

    assert_eq!(defeated, vec![(upper, 10), (lower, 10)]);
    let economy = query::economy(&world);
    assert_eq!((economy.resources, economy.score), (120, 20));
    assert_eq!(query::lane_population(&world, upper), 0);
    assert_eq!(query::lane_population(&world, lower), 0);
    assert_eq!(query::lane_population(&world, bystander), 1);
    assert_eq!(query::occupied_lanes(&world), vec![bystander]);

    let survivors = query::enemies(&world);
    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0].lane, bystander);
    assert!((survivors[0].health - 100.0).abs() < f32::EPSILON);
}

#[test]
fn breach_latches_loss_and_freezes_world() {
    let mut world = classic_world();
    let mut events = Vec::new();

    apply(
        &mut world,
        Command::SpawnEnemy {
            lane: Lane::new(5),
            speed: 100.0,
        },
        &mut events,
    );
    for _ in 0..9 {
        tick(&mut world, &mut events);
    }

    assert_eq!(query::outcome(&world), Some(Outcome::Lost));
    assert!(events.contains(&Event::OutcomeDecided {
        outcome: Outcome::Lost
    }));
    let frame = query::economy(&world).frame;

    events.clear();
    tick(&mut world, &mut events);
    apply(&mut world, Command::DeclareVictory, &mut events);
    assert!(events.is_empty());
    assert_eq!(query::economy(&world).frame, frame);
    assert_eq!(query::outcome(&world), Some(Outcome::Lost));
}

#[test]
fn pickup_score_follows_rules() {
    for (rules, expected_score) in [(Rules::classic(), 0), (Rules::extended(), 30)] {
        let mut world = World::new(rules).expect("valid rules");
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnPickup {
                x: 300.0,
                lane: Lane::new(2),
                amount: 30,
            },
            &mut events,
        );
        assert_eq!(query::pickup_count(&world), 1);

        apply(
            &mut world,
            Command::Tick {
                pointer: Some(FieldPoint::new(310.0, 205.0)),
            },
            &mut events,
        );

        let economy = query::economy(&world);
        assert_eq!(economy.resources, 330);
        assert_eq!(economy.score, expected_score);
        assert_eq!(query::pickup_count(&world), 0);
    }
}

#[test]
fn messages_expire_after_their_lifespan() {
    let mut world = classic_world();
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::ShowMessage {
            text: "Need more resources".into(),
            position: FieldPoint::new(0.0, 50.0),
            size: 20.0,
            tint: MessageTint::Warning,
        },
        &mut events,
    );
    assert_eq!(query::messages(&world).len(), 1);

    for _ in 0..50 {
        tick(&mut world, &mut events);
    }
    assert!(query::messages(&world).is_empty());
}

#[test]
fn grid_is_built_once() {
    let mut world = classic_world();
    let mut events = Vec::new();
    for _ in 0..120 {
        tick(&mut world, &mut events);
    }
    assert_eq!(query::grid_cell_count(&world), 40);
    assert_eq!(query::economy(&world).frame, 120);
}

#[test]
fn victory_is_latched_once() {
    let mut world = classic_world();
    let mut events = Vec::new();
    apply(&mut world, Command::DeclareVictory, &mut events);
    apply(&mut world, Command::DeclareVictory, &mut events);
    assert_eq!(
        events,
        vec![Event::OutcomeDecided {
            outcome: Outcome::Won
        }]
    );
}

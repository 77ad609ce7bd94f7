use lane_defence_core::{Command, Event, Rules};
use lane_defence_system_spawning::{Config, SpawnContext, Spawning};
use lane_defence_world::{apply, query, World};

fn frames(range: std::ops::Range<u64>) -> Vec<Event> {
    range.map(|frame| Event::TimeAdvanced { frame }).collect()
}

#[test]
fn first_enemy_spawns_on_frame_zero() {
    let mut spawning = Spawning::new(Config::from_rules(&Rules::classic(), 1));
    let mut commands = Vec::new();

    spawning.handle(&frames(0..1), SpawnContext::default(), &mut commands);

    assert!(matches!(commands[0], Command::SpawnEnemy { .. }));
    assert!(matches!(commands[1], Command::SpawnPickup { .. }));
    assert_eq!(spawning.enemy_interval(), 560);
}

#[test]
fn enemy_interval_ramps_down_to_the_floor() {
    let mut spawning = Spawning::new(Config::from_rules(&Rules::classic(), 2));
    let mut commands = Vec::new();
    let mut observed = Vec::new();

    for frame in 0..60_000 {
        let before = commands.len();
        spawning.handle(
            &[Event::TimeAdvanced { frame }],
            SpawnContext {
                score: 0,
                active_pickups: 0,
            },
            &mut commands,
        );
        if commands[before..]
            .iter()
            .any(|command| matches!(command, Command::SpawnEnemy { .. }))
        {
            observed.push(spawning.enemy_interval());
        }
    }

    assert_eq!(&observed[..3], &[560, 520, 480]);
    assert!(observed.iter().all(|interval| *interval >= 100));
    assert_eq!(observed.last(), Some(&100));
}

#[test]
fn enemy_speeds_stay_in_range() {
    let mut spawning = Spawning::new(Config::from_rules(&Rules::classic(), 3));
    let mut commands = Vec::new();
    spawning.handle(&frames(0..20_000), SpawnContext::default(), &mut commands);

    let speeds: Vec<f32> = commands
        .iter()
        .filter_map(|command| match command {
            Command::SpawnEnemy { speed, .. } => Some(*speed),
            _ => None,
        })
        .collect();
    assert!(!speeds.is_empty());
    assert!(speeds.iter().all(|speed| (0.4..0.6).contains(speed)));
}

#[test]
fn nothing_spawns_after_the_winning_score() {
    let rules = Rules::classic();
    let mut spawning = Spawning::new(Config::from_rules(&rules, 4));
    let mut commands = Vec::new();

    spawning.handle(
        &frames(0..2_000),
        SpawnContext {
            score: rules.winning_score,
            active_pickups: 0,
        },
        &mut commands,
    );

    assert!(commands.is_empty(), "spawner must stop once the game is won");
}

#[test]
fn pickup_cap_blocks_new_pickups() {
    let rules = Rules::extended();
    let mut spawning = Spawning::new(Config::from_rules(&rules, 5));
    let mut commands = Vec::new();

    spawning.handle(
        &frames(500..501),
        SpawnContext {
            score: 0,
            active_pickups: 4,
        },
        &mut commands,
    );
    assert!(commands.is_empty());

    spawning.handle(
        &frames(1_000..1_001),
        SpawnContext {
            score: 0,
            active_pickups: 3,
        },
        &mut commands,
    );
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], Command::SpawnPickup { .. }));
}

#[test]
fn identical_seeds_replay_identically() {
    let rules = Rules::classic();
    let run = |seed| {
        let mut spawning = Spawning::new(Config::from_rules(&rules, seed));
        let mut commands = Vec::new();
        spawning.handle(&frames(0..5_000), SpawnContext::default(), &mut commands);
        commands
    };

    assert_eq!(run(0x5eed), run(0x5eed));
    assert_ne!(run(0x5eed), run(0x5eee));
}

#[test]
fn spawn_commands_are_accepted_by_the_world() {
    let rules = Rules::classic();
    let mut world = World::new(rules.clone()).expect("valid rules");
    let mut spawning = Spawning::new(Config::from_rules(&rules, 6));
    let mut commands = Vec::new();
    spawning.handle(&frames(0..1), SpawnContext::default(), &mut commands);

    let mut events = Vec::new();
    for command in commands {
        apply(&mut world, command, &mut events);
    }

    assert_eq!(query::enemy_count(&world), 1);
    assert_eq!(query::pickup_count(&world), 1);
    assert_eq!(query::occupied_lanes(&world).len(), 1);
}

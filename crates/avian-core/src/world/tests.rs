use super::*;
use crate::agent::{BirdState, CallType};
use crate::color::Rgb;
use crate::constants::FEED_PITCH_LIFT;
use crate::flocking::SteeringParams;
use crate::lifecycle::{Death, DeathCause};
use crate::metrics::count_flocks;
use glam::DVec3;
use std::collections::HashSet;

const DT: f64 = 1.0 / 60.0;

fn make_config(population: usize) -> SimConfig {
    SimConfig {
        initial_population: population,
        tree_count: 0,
        ..SimConfig::default()
    }
}

fn make_world(population: usize) -> World {
    World::new(make_config(population)).unwrap()
}

fn evolving_world(config: SimConfig) -> World {
    let mut world = World::new(config).unwrap();
    world.settings_mut().evolution.enabled = true;
    world
}

fn ids(world: &World) -> Vec<AgentId> {
    world.agents().iter().map(|a| a.id).collect()
}

#[test]
fn new_rejects_invalid_config() {
    let config = SimConfig {
        world_size: f64::NAN,
        ..make_config(1)
    };
    assert!(matches!(
        World::new(config),
        Err(WorldInitError::Config(SimConfigError::InvalidWorldSize))
    ));
}

#[test]
fn founders_get_unique_sequential_ids() {
    let world = make_world(40);
    assert_eq!(world.population(), 40);
    let unique: HashSet<_> = ids(&world).into_iter().collect();
    assert_eq!(unique.len(), 40);
    assert_eq!(world.agents()[39].id, AgentId(39));
}

#[test]
fn trees_are_generated_once() {
    let world = World::new(SimConfig::default()).unwrap();
    assert_eq!(world.trees().len(), 150);
}

#[test]
fn energy_stays_within_band_every_tick() {
    let config = SimConfig {
        initial_population: 60,
        tree_count: 0,
        ..SimConfig::default()
    };
    let mut world = evolving_world(config);
    world.settings_mut().evolution.food_abundance = 20.0;
    let max_energy = world.config().max_energy;
    for _ in 0..600 {
        world.tick(DT);
        for agent in world.agents() {
            assert!((0.0..=max_energy).contains(&agent.energy), "{}", agent.energy);
        }
    }
}

#[test]
fn flying_speed_stays_within_band() {
    let mut world = make_world(50);
    for _ in 0..400 {
        world.tick(DT);
        let params = SteeringParams::new(world.config(), &world.settings().sim, DT);
        for agent in world.agents().iter().filter(|a| a.state == BirdState::Flying) {
            let (min, limit) = params.speed_band(agent);
            let speed = agent.velocity.length();
            assert!(speed >= min - 1e-9 && speed <= limit + 1e-9, "speed {speed}");
        }
    }
}

#[test]
fn reproduction_impossible_while_immature() {
    let config = SimConfig {
        initial_population: 20,
        tree_count: 0,
        maturation_age: 1_000.0,
        initial_energy: 100.0,
        metabolic_rate: 0.0,
        base_reproduction_rate: 1.0e9,
        ..SimConfig::default()
    };
    let mut world = evolving_world(config);
    for _ in 0..200 {
        assert!(world.tick(DT).births.is_empty());
    }
    assert_eq!(world.total_births(), 0);
}

#[test]
fn reproduction_impossible_at_or_below_threshold() {
    let config = SimConfig {
        initial_population: 20,
        tree_count: 0,
        maturation_age: 0.0,
        initial_energy: 90.0,
        reproduction_threshold: 90.0,
        metabolic_rate: 0.0,
        foraging_rate: 0.0,
        base_reproduction_rate: 1.0e9,
        ..SimConfig::default()
    };
    let mut world = evolving_world(config);
    for _ in 0..200 {
        world.tick(DT);
    }
    assert_eq!(world.total_births(), 0);
    assert_eq!(world.population(), 20);
}

#[test]
fn dead_agents_are_absent_after_the_tick() {
    let config = SimConfig {
        initial_population: 10,
        tree_count: 0,
        lifespan_min: 0.05,
        lifespan_jitter: 0.0,
        ..SimConfig::default()
    };
    let mut world = evolving_world(config);
    let before = ids(&world);
    let report = world.tick(0.1);
    assert_eq!(world.population(), 0);
    assert_eq!(report.deaths.len(), before.len());
    assert!(report
        .deaths
        .iter()
        .all(|death| death.cause == DeathCause::OldAge && (death.age - 0.1).abs() < 1e-12));
    for id in before {
        assert!(world.agent(id).is_none());
    }
}

#[test]
fn starving_agent_is_removed_after_one_tick() {
    let config = SimConfig {
        initial_population: 1,
        tree_count: 0,
        initial_energy: 1.0,
        metabolic_rate: 5.0,
        ..SimConfig::default()
    };
    let mut world = evolving_world(config);
    let id = world.agents()[0].id;
    let report = world.tick(1.0);
    assert_eq!(world.population(), 0);
    assert_eq!(
        report.deaths,
        vec![Death {
            agent_id: id,
            cause: DeathCause::Starvation,
            age: 1.0,
        }]
    );
    assert_eq!(world.total_deaths(), 1);
}

#[test]
fn evolution_disabled_freezes_lifecycle() {
    let config = SimConfig {
        initial_energy: 1.0,
        metabolic_rate: 50.0,
        ..make_config(5)
    };
    let mut world = World::new(config).unwrap();
    for _ in 0..100 {
        world.tick(1.0);
    }
    assert_eq!(world.population(), 5);
    assert!(world.agents().iter().all(|a| a.age == 0.0 && a.energy == 1.0));
}

#[test]
fn carrying_capacity_bounds_reproduction() {
    let config = SimConfig {
        initial_population: 8,
        tree_count: 0,
        max_population: Some(10),
        maturation_age: 0.0,
        initial_energy: 100.0,
        reproduction_threshold: 0.0,
        reproduction_cost: 1.0,
        metabolic_rate: 0.0,
        base_reproduction_rate: 1.0e9,
        lifespan_min: 1_000.0,
        ..SimConfig::default()
    };
    let mut world = evolving_world(config);
    let report = world.tick(DT);
    assert_eq!(report.births.len(), 2);
    for _ in 0..50 {
        world.tick(DT);
        assert!(world.population() <= 10);
    }
    assert_eq!(world.population(), 10);

    // Newborns are published after the survivors, one generation down.
    let tail = &world.agents()[8..];
    assert!(tail.iter().all(|a| a.generation == 1));
    assert_eq!(tail.iter().map(|a| a.id).collect::<Vec<_>>(), report.births);
}

#[test]
fn unbounded_population_grows_under_generous_settings() {
    let config = SimConfig {
        initial_population: 4,
        tree_count: 0,
        maturation_age: 0.0,
        initial_energy: 100.0,
        reproduction_threshold: 0.0,
        reproduction_cost: 1.0,
        metabolic_rate: 0.0,
        base_reproduction_rate: 1.0e9,
        lifespan_min: 1_000.0,
        ..SimConfig::default()
    };
    let mut world = evolving_world(config);
    for _ in 0..3 {
        world.tick(DT);
    }
    assert_eq!(world.population(), 32);
    assert_eq!(world.total_births(), 28);
}

#[test]
fn connectivity_matches_fresh_count_and_is_order_independent() {
    let mut world = make_world(80);
    for _ in 0..120 {
        world.tick(DT);
    }
    let radius = world.config().perception_radius;
    let stats = world.stats_now();
    let mut agents = world.agents().to_vec();
    assert_eq!(stats.flock_count, count_flocks(&agents, radius));
    agents.reverse();
    assert_eq!(stats.flock_count, count_flocks(&agents, radius));
    assert!(stats.flock_count >= 1 && stats.flock_count <= 80);
}

#[test]
fn stats_follow_the_sampling_cadence() {
    let config = SimConfig {
        stats_interval: 0.5,
        ..make_config(10)
    };
    let mut world = World::new(config).unwrap();
    let mut sampled_at = Vec::new();
    for tick in 1..=12 {
        if world.tick(0.25).stats.is_some() {
            sampled_at.push(tick);
        }
    }
    assert_eq!(sampled_at, vec![3, 6, 9, 12]);
    let latest = world.latest_stats().unwrap();
    assert_eq!(latest.population, 10);
    assert_eq!(latest.clock, 3.0);
}

#[test]
fn taxonomy_is_deterministic_for_live_agents() {
    let world = make_world(5);
    for agent in world.agents() {
        let first = world.analyze(agent.id).unwrap();
        let second = world.analyze(agent.id).unwrap();
        assert_eq!(first, second);
    }
    assert!(world.analyze(AgentId(999)).is_none());
}

#[test]
fn lone_agent_stays_in_bounds() {
    let mut world = make_world(1);
    let half = world.config().world_size / 2.0;
    for _ in 0..20_000 {
        world.tick(DT);
        assert_eq!(world.population(), 1);
        let agent = &world.agents()[0];
        assert!(agent.position.x.abs() <= half && agent.position.z.abs() <= half);
        assert!(agent.position.y > -2.0 && agent.position.y < 40.0);
        assert!(agent.velocity.length() <= world.config().base_speed + 1e-9);
    }
}

#[test]
fn separation_pushes_close_pair_apart() {
    let mut world = make_world(2);
    for (i, agent) in world.agents.iter_mut().enumerate() {
        agent.position = DVec3::new(i as f64, 10.0, 0.0);
        agent.velocity = DVec3::new(0.0, 0.0, 0.1);
        agent.state = BirdState::Flying;
        agent.state_timer = 10_000.0;
    }
    let before = world.agents[0].position.distance(world.agents[1].position);
    world.tick(DT);
    let after = world.agents[0].position.distance(world.agents[1].position);
    assert!(after > before, "{after} <= {before}");
}

#[test]
fn introduce_species_enters_from_elevated_band() {
    let mut world = make_world(3);
    let color = Rgb::from_hex("#ff8800").unwrap();
    world.submit(WorldCommand::IntroduceSpecies {
        count: 5,
        params: SpeciesParams {
            color,
            scale: 1.0,
            pitch: 500.0,
            name: Some("Ember Finch".into()),
        },
    });
    world.tick(DT);
    assert_eq!(world.population(), 8);
    let introduced: Vec<&Agent> = world.agents().iter().filter(|a| a.id.0 >= 3).collect();
    assert_eq!(introduced.len(), 5);
    for agent in introduced {
        assert_eq!(agent.generation, 0);
        assert_eq!(agent.traits.color, color);
        assert!((0.9..1.1).contains(&agent.traits.scale));
        assert!((475.0..525.0).contains(&agent.traits.pitch));
        // One tick of motion moves at most one speed step.
        assert!(agent.position.y >= 15.0 - 0.2);
    }
}

#[test]
fn select_random_picks_a_live_agent() {
    for seed in 0..20 {
        let config = SimConfig {
            seed,
            ..make_config(3)
        };
        let mut world = World::new(config).unwrap();
        let live = ids(&world);
        world.submit(WorldCommand::SelectRandom);
        let report = world.tick(DT);
        let picked = report.selected.unwrap();
        assert!(live.contains(&picked));
        assert_eq!(world.selected(), Some(picked));
    }
}

#[test]
fn select_random_on_empty_population_is_noop() {
    let mut world = make_world(0);
    world.submit(WorldCommand::SelectRandom);
    let report = world.tick(DT);
    assert!(report.selected.is_none());
    assert!(world.selected().is_none());
}

#[test]
fn remove_takes_the_front_of_the_collection() {
    let mut world = make_world(5);
    world.submit(WorldCommand::Remove { count: 2 });
    world.tick(DT);
    assert_eq!(ids(&world), vec![AgentId(2), AgentId(3), AgentId(4)]);

    world.submit(WorldCommand::Remove { count: 50 });
    world.submit(WorldCommand::Add { count: 1 });
    world.tick(DT);
    // Ids are never reused.
    assert_eq!(ids(&world), vec![AgentId(5)]);
}

#[test]
fn stale_selection_resolves_to_none() {
    let mut world = make_world(3);
    assert!(world.select(AgentId(1)));
    assert_eq!(world.selected(), Some(AgentId(1)));
    world.submit(WorldCommand::Remove { count: 3 });
    world.tick(DT);
    assert!(world.selected().is_none());
    assert!(world.selected_agent().is_none());
    assert!(!world.select(AgentId(1)));
}

#[test]
fn pause_freezes_world_and_keeps_commands_queued() {
    let mut world = make_world(4);
    world.tick(DT);
    let positions: Vec<DVec3> = world.agents().iter().map(|a| a.position).collect();
    let clock = world.clock();

    world.set_paused(true);
    world.submit(WorldCommand::Add { count: 5 });
    for _ in 0..10 {
        let report = world.tick(DT);
        assert!(report.paused);
    }
    assert_eq!(world.clock(), clock);
    assert_eq!(world.population(), 4);
    assert_eq!(world.pending_command_count(), 1);
    let frozen: Vec<DVec3> = world.agents().iter().map(|a| a.position).collect();
    assert_eq!(frozen, positions);

    world.set_paused(false);
    world.tick(DT);
    assert_eq!(world.population(), 9);
    assert_eq!(world.pending_command_count(), 0);
}

#[test]
fn action_is_applied_once_per_timestamp() {
    let mut world = make_world(1);
    let id = world.agents()[0].id;
    assert!(!world.signal_action(AgentId(42), ActionType::Feed, 1.0));

    assert!(world.signal_action(id, ActionType::Feed, 1.0));
    let report = world.tick(DT);
    let agent = world.agent(id).unwrap();
    assert_eq!(agent.state, BirdState::Foraging);
    let lifted = agent.traits.pitch * FEED_PITCH_LIFT;
    assert!(report
        .calls
        .iter()
        .any(|c| c.call == CallType::Social && (c.pitch - lifted).abs() < 1e-9));

    world.agents[0].state = BirdState::Flying;
    assert!(world.signal_action(id, ActionType::Feed, 1.0));
    let report = world.tick(DT);
    assert_eq!(world.agents()[0].state, BirdState::Flying);
    assert!(report.calls.is_empty());
}

#[test]
fn action_stamped_at_start_clock_is_applied() {
    let mut world = make_world(1);
    let id = world.agents()[0].id;
    assert_eq!(world.clock(), 0.0);
    assert!(world.signal_action(id, ActionType::Feed, world.clock()));
    let report = world.tick(DT);
    assert_eq!(world.agents()[0].state, BirdState::Foraging);
    assert!(report
        .calls
        .iter()
        .any(|c| c.agent_id == id && c.call == CallType::Social));
    assert_eq!(world.agents()[0].last_action_time, Some(0.0));

    world.agents[0].state = BirdState::Flying;
    world.signal_action(id, ActionType::Feed, 0.0);
    let report = world.tick(DT);
    assert_eq!(world.agents()[0].state, BirdState::Flying);
    assert!(report.calls.is_empty());
}

/// Place singing agents about to call and return every call heard over `seeds` runs.
fn singing_calls(positions: &[DVec3], age: f64, seeds: u64) -> Vec<CallType> {
    let mut heard = Vec::new();
    for seed in 0..seeds {
        let config = SimConfig {
            seed,
            ..make_config(positions.len())
        };
        let mut world = World::new(config).unwrap();
        for (agent, &position) in world.agents.iter_mut().zip(positions) {
            agent.position = position;
            agent.age = age;
            agent.state = BirdState::Singing;
            agent.state_timer = 10_000.0;
            agent.chirp_timer = 1.0;
        }
        heard.extend(world.tick(DT).calls.into_iter().map(|c| c.call));
    }
    assert!(!heard.is_empty());
    heard
}

#[test]
fn listeners_beyond_social_radius_are_not_counted() {
    let pair = [DVec3::new(0.0, 10.0, 0.0), DVec3::new(9.0, 10.0, 0.0)];
    let calls = singing_calls(&pair, 30.0, 16);
    assert!(calls.iter().all(|&c| c == CallType::Social), "{calls:?}");
}

#[test]
fn listener_at_exact_social_radius_is_not_counted() {
    let pair = [DVec3::new(0.0, 10.0, 0.0), DVec3::new(8.0, 10.0, 0.0)];
    let calls = singing_calls(&pair, 30.0, 16);
    assert!(calls.iter().all(|&c| c == CallType::Social), "{calls:?}");
}

#[test]
fn adult_pair_within_social_radius_sings_mating_calls() {
    let pair = [DVec3::new(0.0, 10.0, 0.0), DVec3::new(5.0, 10.0, 0.0)];
    let calls = singing_calls(&pair, 30.0, 16);
    assert!(calls.iter().all(|&c| c == CallType::Mating), "{calls:?}");
}

#[test]
fn juvenile_pair_within_social_radius_stays_social() {
    let pair = [DVec3::new(0.0, 10.0, 0.0), DVec3::new(5.0, 10.0, 0.0)];
    let calls = singing_calls(&pair, 0.0, 16);
    assert!(calls.iter().all(|&c| c == CallType::Social), "{calls:?}");
}

#[test]
fn tight_cluster_calls_territorially() {
    let cluster = [
        DVec3::new(0.0, 10.0, 0.0),
        DVec3::new(1.0, 10.0, 0.0),
        DVec3::new(0.0, 10.0, 1.0),
        DVec3::new(1.0, 10.0, 1.0),
    ];
    let calls = singing_calls(&cluster, 30.0, 16);
    assert!(calls.iter().all(|&c| c == CallType::Territorial), "{calls:?}");
}

#[test]
fn tick_reports_age_at_death_and_world_keeps_no_history() {
    let config = SimConfig {
        initial_population: 0,
        tree_count: 0,
        lifespan_min: 0.05,
        lifespan_jitter: 0.0,
        ..SimConfig::default()
    };
    let mut world = evolving_world(config);
    for _ in 0..5 {
        // Added agents age within the same tick and outlive their lifespan at once.
        world.submit(WorldCommand::Add { count: 50 });
        let report = world.tick(0.1);
        assert_eq!(world.population(), 0);
        assert_eq!(report.deaths.len(), 50);
        assert!(report.deaths.iter().all(|d| (d.age - 0.1).abs() < 1e-12));
    }
    assert_eq!(world.total_deaths(), 250);

    // A headless run only reports the lifespans of its own deaths.
    let summary = world.run_headless(10).unwrap();
    assert_eq!(summary.deaths_old_age, 0);
    assert!(summary.lifespans.is_empty());
}

#[test]
fn distract_sends_agent_flying() {
    let mut world = make_world(1);
    let id = world.agents()[0].id;
    world.agents[0].state = BirdState::Idle;
    world.agents[0].state_timer = 10_000.0;
    world.signal_action(id, ActionType::Distract, 2.0);
    let report = world.tick(DT);
    assert_eq!(world.agents()[0].state, BirdState::Flying);
    assert!(report
        .calls
        .iter()
        .any(|c| c.agent_id == id && c.call == CallType::Territorial));
}

#[test]
fn run_headless_produces_summary() {
    let config = SimConfig {
        initial_population: 30,
        tree_count: 0,
        ..SimConfig::default()
    };
    let mut world = evolving_world(config);
    let summary = world.run_headless(120).unwrap();
    assert_eq!(summary.ticks, 120);
    assert!(!summary.samples.is_empty());
    assert_eq!(summary.final_population, world.population());
    assert_eq!(
        summary.deaths_old_age + summary.deaths_starvation,
        summary.lifespans.len()
    );
    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("\"schema_version\":1"));
}

#[test]
fn run_headless_rejects_excessive_ticks() {
    let mut world = make_world(1);
    assert!(matches!(
        world.run_headless(World::MAX_HEADLESS_TICKS + 1),
        Err(ExperimentError::TooManyTicks { .. })
    ));
}

#[test]
fn same_seed_same_trajectory() {
    let mut a = make_world(20);
    let mut b = make_world(20);
    a.settings_mut().evolution.enabled = true;
    b.settings_mut().evolution.enabled = true;
    for _ in 0..300 {
        a.tick(DT);
        b.tick(DT);
    }
    let pa: Vec<DVec3> = a.agents().iter().map(|x| x.position).collect();
    let pb: Vec<DVec3> = b.agents().iter().map(|x| x.position).collect();
    assert_eq!(pa, pb);
}

use dilemma_core::{
    run, run_epoch, seeded_rng, Agent, AgentId, ConfigError, Move, Population, SimConfig,
    Simulation, StatusReport, Strategy, StrategyRatios, HISTORY_WINDOW,
};

fn two_agent_config(ratios: StrategyRatios, epochs: u64) -> SimConfig {
    SimConfig {
        population_size: 2,
        initial_energy: 10,
        num_epochs: epochs,
        ratios,
        seed: Some(2024),
    }
}

fn energies(population: &Population) -> Vec<i64> {
    population.agents().iter().map(|a| a.energy()).collect()
}

#[test]
fn two_cooperators_gain_every_initiation() {
    // Both agents initiate once per epoch against the only other living agent:
    // two (+1, +1) matches per epoch.
    let population = run(two_agent_config(StrategyRatios::only(Strategy::Cooperation), 3)).unwrap();
    assert_eq!(energies(&population), vec![16, 16]);
}

#[test]
fn cooperator_against_betrayer_single_epoch() {
    let ratios = StrategyRatios::new(0.5, 0.5, 0.0, 0.0, 0.0);
    let mut sim = Simulation::new(two_agent_config(ratios, 1)).unwrap();

    // Check the first match on its own, then the full epoch
    let mut first = sim.population().clone();
    let mut rng = seeded_rng(Some(0));
    dilemma_core::play_match(&mut first, 0, 1, &mut rng);
    assert_eq!(energies(&first), vec![7, 13]);

    sim.run_to_end();
    let population = sim.population();
    assert_eq!(population.get(0).unwrap().strategy(), Strategy::Cooperation);
    assert_eq!(population.get(1).unwrap().strategy(), Strategy::Betrayal);
    assert_eq!(energies(population), vec![4, 16]);
    assert_eq!(sim.summary().matches_played, 2);
}

#[test]
fn legacy_population_layout() {
    let population = Population::from_ratios(100, 100, &StrategyRatios::new(0.0, 0.0, 0.25, 0.25, 0.5)).unwrap();
    let expected: Vec<Strategy> = std::iter::repeat(Strategy::HitBack)
        .take(25)
        .chain(std::iter::repeat(Strategy::Watcher).take(25))
        .chain(std::iter::repeat(Strategy::Random).take(50))
        .collect();
    let actual: Vec<Strategy> = population.agents().iter().map(|a| a.strategy()).collect();
    assert_eq!(actual, expected);
    let ids: Vec<AgentId> = population.agents().iter().map(|a| a.id()).collect();
    assert_eq!(ids, (0..100).collect::<Vec<AgentId>>());
    assert!(population.agents().iter().all(|a| a.energy() == 100));
}

#[test]
fn ratio_shortfall_assigned_to_random() {
    let population = Population::from_ratios(100, 1, &StrategyRatios::new(0.1, 0.1, 0.1, 0.1, 0.1)).unwrap();
    assert_eq!(population.count_by_strategy()[Strategy::Random.index()], 60);
    assert_eq!(population.len(), 100);
}

#[test]
fn invalid_config_is_fatal() {
    let config = SimConfig {
        ratios: StrategyRatios::new(0.25, 0.25, -0.5, 0.0, 0.0),
        ..SimConfig::default()
    };
    assert!(matches!(run(config), Err(ConfigError::InvalidRatio { strategy: Strategy::HitBack, .. })));
}

#[test]
fn idle_epochs_leave_energy_unchanged() {
    let mut rng = seeded_rng(Some(5));

    let mut empty = Population::from_agents(vec![
        Agent::new(0, Strategy::Betrayal, 0),
        Agent::new(1, Strategy::Cooperation, -7),
    ])
    .unwrap();
    let summary = run_epoch(&mut empty, &mut rng);
    assert_eq!(summary.matches_played, 0);
    assert_eq!(energies(&empty), vec![0, -7]);

    let mut lone = Population::from_agents(vec![
        Agent::new(0, Strategy::Betrayal, 0),
        Agent::new(1, Strategy::Random, 9),
    ])
    .unwrap();
    let summary = run_epoch(&mut lone, &mut rng);
    assert!(summary.was_idle());
    assert_eq!(energies(&lone), vec![0, 9]);
}

#[test]
fn hit_back_answers_recorded_betrayal() {
    let mut agent = Agent::new(0, Strategy::HitBack, 10);
    let mut rng = seeded_rng(Some(1));
    assert_eq!(agent.decide(3, &mut rng), Move::Cooperate);
    agent.record_opponent_move(3, Move::Betray);
    assert_eq!(agent.decide(3, &mut rng), Move::Betray);
    assert_eq!(agent.decide(4, &mut rng), Move::Cooperate);
}

#[test]
fn histories_stay_bounded_over_long_runs() {
    let mut sim = Simulation::new(SimConfig {
        population_size: 12,
        initial_energy: 1_000,
        num_epochs: 300,
        ratios: StrategyRatios::new(0.2, 0.2, 0.2, 0.2, 0.2),
        seed: Some(77),
    })
    .unwrap();
    sim.run_to_end();

    for agent in sim.population().agents() {
        for opponent in 0..12 {
            assert!(agent.history_against(opponent).len() <= HISTORY_WINDOW);
        }
        assert!(agent.history_against(agent.id()).is_empty(), "agents never play themselves");
    }
}

#[test]
fn eliminated_agents_stay_in_population() {
    let population = run(SimConfig {
        population_size: 30,
        initial_energy: 4,
        num_epochs: 100,
        ratios: StrategyRatios::new(0.0, 0.5, 0.0, 0.0, 0.5),
        seed: Some(3),
    })
    .unwrap();

    assert_eq!(population.len(), 30);
    let report = StatusReport::from_population(&population);
    assert_eq!(report.total_alive, population.living_count());
    assert!(report.total_alive < 30);
    for status in &report.strategies {
        assert_eq!(status.alive, status.energies.len());
        assert!(status.energies.iter().all(|e| *e > 0));
    }
}

#[test]
fn energy_saturates_instead_of_overflowing() {
    let config = SimConfig {
        initial_energy: i64::MAX,
        ..two_agent_config(StrategyRatios::only(Strategy::Cooperation), 1)
    };
    let population = run(config).unwrap();
    assert_eq!(energies(&population), vec![i64::MAX, i64::MAX]);
}

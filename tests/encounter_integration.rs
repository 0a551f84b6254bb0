//! Encounter integration tests
//!
//! Whole-session scenarios driven through the public director API.

use chaos_brawler::actor::AnimationState;
use chaos_brawler::core::config::EncounterConfig;
use chaos_brawler::encounter::{
    Director, EncounterEventKind, EncounterEventLog, EncounterSnapshot, MusicTheme,
};
use chaos_brawler::player::{Autopilot, AutopilotPolicy, IntentSet};

fn run_idle(director: &mut Director, ticks: usize) -> EncounterEventLog {
    let mut log = EncounterEventLog::new();
    for _ in 0..ticks {
        log.extend(director.run_tick(&IntentSet::empty()));
    }
    log
}

fn kill_all(director: &mut Director) {
    for enemy in director.enemies.iter_mut() {
        enemy.actor.apply_damage(10_000, 1.0);
    }
}

fn record(director: &mut Director, ticks: usize) -> Vec<EncounterSnapshot> {
    let mut pilot = Autopilot::new(AutopilotPolicy::Brawler);
    let mut snapshots = Vec::with_capacity(ticks);
    for _ in 0..ticks {
        let intents = pilot.next_intents(&director.snapshot());
        director.run_tick(&intents);
        snapshots.push(director.snapshot());
    }
    snapshots
}

#[test]
fn test_phase_one_transition_walkthrough() {
    let mut d = Director::new(EncounterConfig::default());
    run_idle(&mut d, 3);
    assert_eq!(d.enemies.len(), 3);

    // Threshold reached: transition opens and spawning halts
    d.score.chaos_score = 100;
    let log = run_idle(&mut d, 1);
    assert!(d.progress.phase_transitioning);
    assert!(log.contains(|k| matches!(k, EncounterEventKind::PhaseTransitionStarted { phase: 1 })));
    assert_eq!(d.enemies.len(), 3);

    kill_all(&mut d);
    d.player.actor.apply_damage(70, 1.0);
    assert_eq!(d.player.actor.health(), 30);

    // Corpses linger for the death animation, then get reaped and scored
    let log = run_idle(&mut d, 20);
    assert!(d.enemies.is_empty());
    assert_eq!(
        log.count(|k| matches!(k, EncounterEventKind::EnemyDefeated { boss: false, .. })),
        3
    );
    assert_eq!(d.score.chaos_score, 160);
    assert_eq!(d.current_phase(), 1);

    d.player.actor.position.x = d.config.arena_width;
    let log = run_idle(&mut d, 1);
    assert!(log.contains(|k| matches!(k, EncounterEventKind::PhaseAdvanced { phase: 2 })));
    assert_eq!(d.current_phase(), 2);
    assert!(!d.progress.phase_transitioning);
    assert_eq!(d.player.actor.health(), 80);
    assert!(d.player.actor.position.x < d.config.arena_width / 2.0);

    // Spawning resumes in the new phase with tougher grunts
    run_idle(&mut d, 1);
    assert_eq!(d.enemies.len(), 1);
    assert_eq!(d.enemies[0].actor.max_health(), 35);
}

#[test]
fn test_transition_waits_for_player_at_edge() {
    let mut d = Director::new(EncounterConfig::default());
    d.score.chaos_score = 100;
    run_idle(&mut d, 30);
    assert!(d.progress.phase_transitioning);
    assert_eq!(d.current_phase(), 1);
}

#[test]
fn test_boss_phase_to_unlock_to_next_phase() {
    let mut d = Director::new(EncounterConfig::default());
    d.progress.current_phase = 3;
    d.score.chaos_score = 500;
    let log = run_idle(&mut d, 1);
    assert!(d.progress.boss_active);
    assert_eq!(d.theme(), MusicTheme::Boss);
    assert!(log.contains(|k| matches!(k, EncounterEventKind::BossSpawned { phase: 3, .. })));
    assert!(!d.player.special.is_unlocked());

    // No grunts join a boss fight
    run_idle(&mut d, 10);
    assert_eq!(d.enemies.len(), 1);

    kill_all(&mut d);
    let log = run_idle(&mut d, 20);
    assert!(log.contains(|k| *k == EncounterEventKind::SpecialUnlocked));
    assert!(d.player.special.is_unlocked());
    assert!(d.progress.phase_transitioning);
    assert_eq!(d.theme(), MusicTheme::Escalation);

    d.player.actor.position.x = d.config.arena_width;
    run_idle(&mut d, 1);
    assert_eq!(d.current_phase(), 4);
}

#[test]
fn test_phase_four_is_fought_after_boss_overshoot() {
    let mut d = Director::new(EncounterConfig::default());
    d.progress.current_phase = 3;
    d.score.chaos_score = 500;
    run_idle(&mut d, 1);
    kill_all(&mut d);
    run_idle(&mut d, 20);
    assert!(d.score.chaos_score >= 1250);

    d.player.actor.position.x = d.config.arena_width;
    run_idle(&mut d, 1);
    assert_eq!(d.current_phase(), 4);

    // Boss points alone already exceed the configured phase 4 and 5 thresholds
    let log = run_idle(&mut d, 30);
    assert!(!d.progress.phase_transitioning);
    assert!(!log.contains(|k| matches!(k, EncounterEventKind::PhaseTransitionStarted { .. })));
    let snapshot = d.snapshot();
    assert!(snapshot.phase_target > snapshot.chaos_score);
    assert_eq!(snapshot.phase_target, d.progress.phase_start_score + 300);
    assert!(snapshot.alive_enemies().count() > 0);
}

#[test]
fn test_heavy_boss_ends_session_in_victory() {
    let mut d = Director::new(EncounterConfig::default());
    d.progress.current_phase = 5;
    d.score.chaos_score = 1200;
    run_idle(&mut d, 1);
    assert!(d.enemies[0].is_boss);
    assert!(d.enemies[0].boss.as_ref().is_some_and(|b| b.volley.is_some()));

    kill_all(&mut d);
    let log = run_idle(&mut d, 20);
    assert!(log.contains(|k| *k == EncounterEventKind::Victory));
    assert!(log.contains(|k| *k == EncounterEventKind::ThemeChanged { theme: MusicTheme::Victory }));
    assert!(d.snapshot().victory);
}

#[test]
fn test_defeat_freezes_session() {
    let mut d = Director::new(EncounterConfig::default());
    run_idle(&mut d, 5);
    d.player.actor.apply_damage(500, -1.0);
    let log = run_idle(&mut d, 1);
    assert!(log.contains(|k| *k == EncounterEventKind::Defeat));
    let frozen = d.snapshot();
    assert!(frozen.defeated);
    assert_eq!(frozen.player.state, AnimationState::Dead);
    assert_eq!(frozen.health, 0);

    run_idle(&mut d, 50);
    assert_eq!(d.snapshot(), frozen);
}

#[test]
fn test_same_seed_same_session() {
    let config = EncounterConfig::default().with_seed(7);
    let mut a = Director::new(config.clone());
    let mut b = Director::new(config);
    assert_eq!(record(&mut a, 1500), record(&mut b, 1500));
}

#[test]
fn test_different_seed_diverges() {
    let mut a = Director::new(EncounterConfig::default().with_seed(1));
    let mut b = Director::new(EncounterConfig::default().with_seed(2));
    assert_ne!(record(&mut a, 60), record(&mut b, 60));
}

#[test]
fn test_restart_replays_identically() {
    let mut d = Director::new(EncounterConfig::default().with_seed(11));
    let first = record(&mut d, 400);
    d.restart();
    let log = d.drain_events();
    assert!(log.contains(|k| *k == EncounterEventKind::Restarted));
    assert_eq!(d.snapshot().tick, 0);
    let second = record(&mut d, 400);
    assert_eq!(first, second);
}

#[test]
fn test_pause_resume_does_not_perturb_session() {
    let config = EncounterConfig::default().with_seed(5);
    let mut plain = Director::new(config.clone());
    let mut paused = Director::new(config);

    run_idle(&mut plain, 100);
    run_idle(&mut paused, 50);
    paused.set_paused(true);
    run_idle(&mut paused, 25);
    assert!(paused.snapshot().paused);
    assert_eq!(paused.theme(), MusicTheme::Paused);
    paused.set_paused(false);
    run_idle(&mut paused, 50);

    let mut a = plain.snapshot();
    let mut b = paused.snapshot();
    a.theme = MusicTheme::Brawl;
    b.theme = MusicTheme::Brawl;
    assert_eq!(a, b);
}

#[test]
fn test_autopilot_soak_holds_invariants() {
    let mut d = Director::new(EncounterConfig::default().with_seed(99));
    let mut pilot = Autopilot::new(AutopilotPolicy::Brawler);
    let mut last_score = 0;

    for _ in 0..20_000 {
        let intents = pilot.next_intents(&d.snapshot());
        d.run_tick(&intents);
        let s = d.snapshot();

        assert!(s.chaos_score >= last_score);
        last_score = s.chaos_score;
        assert!((1..=10).contains(&s.multiplier));
        assert!((1..=5).contains(&s.phase));
        assert!(s.health <= s.max_health);
        assert!(s.player.position.x >= 0.0 && s.player.position.x <= s.arena_width);
        assert!(s.player.position.y >= s.floor_top && s.player.position.y <= s.floor_bottom);

        for view in std::iter::once(&s.player).chain(s.enemies.iter()) {
            assert!(view.health <= view.max_health);
            assert_eq!(view.health == 0, view.state == AnimationState::Dead);
            assert!(view.position.y >= s.floor_top && view.position.y <= s.floor_bottom);
        }

        if s.boss_active {
            assert_eq!(s.enemies.len(), 1);
        } else {
            assert!(s.alive_enemies().count() <= 5);
        }

        if s.victory || s.defeated {
            break;
        }
    }
}

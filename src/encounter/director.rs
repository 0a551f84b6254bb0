//! Encounter director: owns the session and runs the fixed-timestep pipeline

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::actor::DamageOutcome;
use crate::core::config::EncounterConfig;
use crate::core::types::{ActorId, Tick, Vec2};
use crate::encounter::collision::{
    attack_damage, boxes_overlap, player_anchor, push_direction, within_radius,
};
use crate::encounter::constants::*;
use crate::encounter::events::{EncounterEventKind, EncounterEventLog, HitSource};
use crate::encounter::phase::{PhaseGate, PhaseProgress, SessionOutcome};
use crate::encounter::score::ScoreTracker;
use crate::encounter::snapshot::{ActorView, EncounterSnapshot};
use crate::encounter::spawn::{boss_spawn_position, grunt_spawn_position};
use crate::encounter::theme::{select_theme, MusicTheme};
use crate::enemy::Enemy;
use crate::player::{IntentSet, Player, PlayerAction};

const PLAYER_ID: ActorId = ActorId(0);

/// One play session
///
/// All randomness (spawn placement, AI rolls, dodge rolls) comes from a single
/// ChaCha8 stream seeded from the config, so a seed plus an intent sequence
/// reproduces a session exactly.
#[derive(Debug, Clone)]
pub struct Director {
    pub config: EncounterConfig,
    pub player: Player,
    /// Roster in spawn order
    pub enemies: Vec<Enemy>,
    pub score: ScoreTracker,
    pub progress: PhaseProgress,
    pub hitstop_ticks_remaining: u32,
    pub paused: bool,
    /// Simulated ticks; frozen during pause and hitstop
    pub tick: Tick,
    rng: ChaCha8Rng,
    next_actor_id: u32,
    theme: MusicTheme,
    /// Events raised outside `run_tick` (pause, restart, initial theme)
    pending: EncounterEventLog,
}

impl Director {
    pub fn new(config: EncounterConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let start = Vec2::new(
            PLAYER_START_X,
            (config.floor_top + config.floor_bottom) / 2.0,
        );
        let theme = select_theme(1, false, false, false, false);
        let mut pending = EncounterEventLog::new();
        pending.push(0, EncounterEventKind::ThemeChanged { theme });

        Self {
            config,
            player: Player::new(PLAYER_ID, start),
            enemies: Vec::new(),
            score: ScoreTracker::new(),
            progress: PhaseProgress::new(),
            hitstop_ticks_remaining: 0,
            paused: false,
            tick: 0,
            rng,
            next_actor_id: PLAYER_ID.0 + 1,
            theme,
            pending,
        }
    }

    pub fn outcome(&self) -> SessionOutcome {
        self.progress.outcome
    }

    pub fn current_phase(&self) -> u8 {
        self.progress.current_phase
    }

    pub fn theme(&self) -> MusicTheme {
        self.theme
    }

    pub fn is_victory(&self) -> bool {
        self.progress.outcome == SessionOutcome::Victory
    }

    pub fn is_defeated(&self) -> bool {
        self.progress.outcome == SessionOutcome::Defeat
    }

    pub fn enemy(&self, id: ActorId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.actor.id == id)
    }

    pub fn enemy_mut(&mut self, id: ActorId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.actor.id == id)
    }

    /// Take events raised outside a tick
    pub fn drain_events(&mut self) -> EncounterEventLog {
        std::mem::take(&mut self.pending)
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        let kind = if paused {
            EncounterEventKind::Paused
        } else {
            EncounterEventKind::Resumed
        };
        tracing::debug!(tick = self.tick, paused, "pause toggled");
        self.pending.push(self.tick, kind);
        let mut events = std::mem::take(&mut self.pending);
        self.refresh_theme(&mut events);
        self.pending = events;
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Fresh session from the same config and seed
    pub fn restart(&mut self) {
        tracing::info!(seed = self.config.seed, "restarting encounter");
        *self = Director::new(self.config.clone());
        self.pending.push(0, EncounterEventKind::Restarted);
    }

    /// Add a regular enemy at `position` on behalf of a scripted scenario
    pub fn spawn_enemy_at(&mut self, position: Vec2) -> ActorId {
        let id = self.allocate_id();
        self.enemies
            .push(Enemy::grunt(id, position, self.progress.current_phase));
        id
    }

    fn allocate_id(&mut self) -> ActorId {
        let id = ActorId(self.next_actor_id);
        self.next_actor_id += 1;
        id
    }

    /// Advance the session by one fixed step
    pub fn run_tick(&mut self, intents: &IntentSet) -> EncounterEventLog {
        let mut events = std::mem::take(&mut self.pending);

        if self.paused || self.progress.outcome.is_decided() {
            return events;
        }

        // Hitstop freezes everything, intents included
        if self.hitstop_ticks_remaining > 0 {
            self.hitstop_ticks_remaining -= 1;
            return events;
        }

        self.tick += 1;

        // ===== PHASE 1: PLAYER =====
        self.phase_player(intents, &mut events);

        // ===== PHASE 2: PLAYER ATTACKS =====
        self.phase_player_attacks(&mut events);

        // ===== PHASE 3: ENEMIES =====
        self.phase_enemies(&mut events);

        // ===== PHASE 4: OUTCOME =====
        self.phase_defeat_check(&mut events);
        self.phase_reap(&mut events);

        // ===== PHASE 5: PROGRESSION =====
        self.phase_progression(&mut events);
        self.phase_population();

        self.score.recompute();
        self.refresh_theme(&mut events);

        events
    }

    fn phase_player(&mut self, intents: &IntentSet, events: &mut EncounterEventLog) {
        if self.player.apply_intents(intents) == PlayerAction::SpecialTriggered {
            events.push(self.tick, EncounterEventKind::SpecialTriggered);
        }
        self.player.tick();
        self.player.actor.clamp_position(
            0.0,
            self.config.arena_width,
            self.config.floor_top,
            self.config.floor_bottom,
        );
    }

    fn phase_player_attacks(&mut self, events: &mut EncounterEventLog) {
        let tick = self.tick;

        if let (Some(hitbox), Some(kind)) = (
            self.player.actor.attack_hitbox(),
            self.player.actor.state().attack_kind(),
        ) {
            let damage = attack_damage(kind);
            let direction = self.player.actor.facing.sign();
            for enemy in self.enemies.iter_mut() {
                if !enemy.actor.is_alive() || enemy.actor.is_invincible() {
                    continue;
                }
                if !boxes_overlap(&hitbox, &enemy.actor.body_hitbox()) {
                    continue;
                }
                if enemy.try_dodge(&mut self.rng) {
                    events.push(tick, EncounterEventKind::EnemyDodged { enemy: enemy.actor.id });
                    continue;
                }
                let outcome = enemy.actor.apply_damage(damage, direction);
                if outcome.landed() {
                    tracing::debug!(tick, enemy = ?enemy.actor.id, ?kind, "player hit landed");
                    self.score.register_hit();
                    self.hitstop_ticks_remaining = HITSTOP_TICKS;
                    events.push(
                        tick,
                        EncounterEventKind::HitLanded {
                            target: enemy.actor.id,
                            attack: kind,
                            damage,
                            killed: outcome == DamageOutcome::Killed,
                        },
                    );
                }
            }
        }

        // Expanding ring: no dodge roll and no invincibility window, every tick
        if self.player.special.is_active() {
            let center = self.player.actor.position;
            let radius = self.player.special.blast_radius;
            let fallback = self.player.actor.facing.sign();
            for enemy in self.enemies.iter_mut() {
                if !enemy.actor.is_alive()
                    || !within_radius(center, enemy.actor.position, radius)
                {
                    continue;
                }
                let direction = push_direction(center, enemy.actor.position, fallback);
                let outcome = enemy.actor.apply_area_damage(SPECIAL_DAMAGE, direction);
                if outcome.landed() {
                    self.score.register_hit();
                    events.push(
                        tick,
                        EncounterEventKind::SpecialDamage {
                            target: enemy.actor.id,
                            damage: SPECIAL_DAMAGE,
                            killed: outcome == DamageOutcome::Killed,
                        },
                    );
                }
            }
        }
    }

    fn phase_enemies(&mut self, events: &mut EncounterEventLog) {
        let tick = self.tick;
        let feet = self.player.actor.position;
        let anchor = player_anchor(feet);
        let (floor_top, floor_bottom) = (self.config.floor_top, self.config.floor_bottom);

        for enemy in self.enemies.iter_mut() {
            if enemy.actor.is_alive() {
                enemy.decide(feet, &mut self.rng);
            }
            enemy.tick(anchor);
            // Enemies may stand off-screen; only depth is bounded
            enemy.actor.position.y = enemy.actor.position.y.clamp(floor_top, floor_bottom);

            let id = enemy.actor.id;
            let player = &mut self.player;

            if let Some(hitbox) = enemy.actor.attack_hitbox() {
                if boxes_overlap(&hitbox, &player.actor.body_hitbox()) {
                    let outcome = player
                        .actor
                        .apply_damage(ENEMY_MELEE_DAMAGE, enemy.actor.facing.sign());
                    if outcome.landed() {
                        self.score.reset_streak();
                        events.push(
                            tick,
                            EncounterEventKind::PlayerHit {
                                source: HitSource::Melee(id),
                                damage: ENEMY_MELEE_DAMAGE,
                            },
                        );
                    }
                }
            }

            if player.is_dodging() {
                continue;
            }

            if let Some(radius) = enemy.active_blast_radius() {
                if within_radius(enemy.actor.position, player.actor.position, radius) {
                    let direction = push_direction(
                        enemy.actor.position,
                        player.actor.position,
                        enemy.actor.facing.sign(),
                    );
                    if player.actor.apply_damage(BLAST_DAMAGE, direction).landed() {
                        self.score.reset_streak();
                        events.push(
                            tick,
                            EncounterEventKind::PlayerHit {
                                source: HitSource::Blast(id),
                                damage: BLAST_DAMAGE,
                            },
                        );
                    }
                }
            }

            let hits = enemy
                .boss
                .as_mut()
                .and_then(|b| b.volley.as_mut())
                .map(|v| v.consume_hits(anchor))
                .unwrap_or(0);
            for _ in 0..hits {
                let direction = enemy.actor.facing.sign();
                if player.actor.apply_damage(PROJECTILE_DAMAGE, direction).landed() {
                    self.score.reset_streak();
                    events.push(
                        tick,
                        EncounterEventKind::PlayerHit {
                            source: HitSource::Projectile(id),
                            damage: PROJECTILE_DAMAGE,
                        },
                    );
                }
            }
        }
    }

    fn phase_defeat_check(&mut self, events: &mut EncounterEventLog) {
        if self.player.actor.is_alive() || self.progress.outcome.is_decided() {
            return;
        }
        self.progress.outcome = SessionOutcome::Defeat;
        tracing::info!(
            tick = self.tick,
            phase = self.progress.current_phase,
            chaos = self.score.chaos_score,
            "player defeated"
        );
        events.push(self.tick, EncounterEventKind::Defeat);
    }

    fn phase_reap(&mut self, events: &mut EncounterEventLog) {
        let mut reaped = Vec::new();
        self.enemies.retain(|e| {
            if e.actor.death_complete() {
                reaped.push((e.actor.id, e.is_boss));
                false
            } else {
                true
            }
        });

        for (id, boss) in reaped {
            let base = if boss { BOSS_POINTS } else { GRUNT_POINTS };
            let points = self.score.award(base);
            events.push(
                self.tick,
                EncounterEventKind::EnemyDefeated {
                    enemy: id,
                    boss,
                    points,
                },
            );
            if boss {
                self.on_boss_defeated(events);
            }
        }
    }

    fn on_boss_defeated(&mut self, events: &mut EncounterEventLog) {
        self.progress.boss_active = false;
        let phase = self.progress.current_phase;
        tracing::info!(tick = self.tick, phase, "boss defeated");

        if self.progress.is_final_phase() {
            if !self.progress.outcome.is_decided() {
                self.progress.outcome = SessionOutcome::Victory;
                tracing::info!(tick = self.tick, chaos = self.score.chaos_score, "victory");
                events.push(self.tick, EncounterEventKind::Victory);
            }
            return;
        }

        if phase == SPECIAL_UNLOCK_PHASE && self.player.special.unlock() {
            tracing::info!(tick = self.tick, "special ability unlocked");
            events.push(self.tick, EncounterEventKind::SpecialUnlocked);
        }
        self.open_transition(events);
    }

    fn phase_progression(&mut self, events: &mut EncounterEventLog) {
        if self.progress.outcome.is_decided() {
            return;
        }

        if self.progress.phase_transitioning {
            let far_edge = self.config.arena_width - EDGE_MARGIN;
            if self.enemies.is_empty() && self.player.actor.position.x >= far_edge {
                self.complete_transition(events);
            }
            return;
        }

        match self.progress.gate(self.score.chaos_score, &self.config) {
            PhaseGate::Hold => {}
            PhaseGate::SpawnBoss => self.spawn_boss(events),
            PhaseGate::OpenTransition => self.open_transition(events),
        }
    }

    fn open_transition(&mut self, events: &mut EncounterEventLog) {
        self.progress.open_transition();
        let phase = self.progress.current_phase;
        tracing::info!(tick = self.tick, phase, "phase transition open");
        events.push(self.tick, EncounterEventKind::PhaseTransitionStarted { phase });
    }

    fn complete_transition(&mut self, events: &mut EncounterEventLog) {
        self.progress.complete_transition(self.score.chaos_score);
        self.player.actor.position.x = EDGE_MARGIN;
        self.player.actor.heal(self.config.transition_heal);
        let phase = self.progress.current_phase;
        tracing::info!(
            tick = self.tick,
            phase,
            health = self.player.actor.health(),
            "entered next phase"
        );
        events.push(self.tick, EncounterEventKind::PhaseAdvanced { phase });
    }

    fn spawn_boss(&mut self, events: &mut EncounterEventLog) {
        // Leftover grunts leave the stage for the boss entrance
        self.enemies.clear();
        let phase = self.progress.current_phase;
        let position = boss_spawn_position(&self.config, self.player.actor.position.x);
        let id = self.allocate_id();
        let boss = Enemy::boss(id, position, phase);
        tracing::info!(
            tick = self.tick,
            phase,
            health = boss.actor.max_health(),
            "boss spawned"
        );
        self.enemies.push(boss);
        self.progress.boss_active = true;
        events.push(self.tick, EncounterEventKind::BossSpawned { boss: id, phase });
    }

    /// At most one spawn per tick while below the living target
    fn phase_population(&mut self) {
        if self.progress.outcome.is_decided()
            || self.progress.phase_transitioning
            || self.progress.boss_active
        {
            return;
        }
        let alive = self.enemies.iter().filter(|e| e.actor.is_alive()).count();
        if alive >= self.config.population_target(self.progress.current_phase) {
            return;
        }
        let position = grunt_spawn_position(&self.config, &mut self.rng);
        let id = self.spawn_enemy_at(position);
        tracing::trace!(tick = self.tick, enemy = ?id, "spawned enemy");
    }

    fn refresh_theme(&mut self, events: &mut EncounterEventLog) {
        let theme = select_theme(
            self.progress.current_phase,
            self.progress.boss_active,
            self.is_victory(),
            self.is_defeated(),
            self.paused,
        );
        if theme != self.theme {
            self.theme = theme;
            events.push(self.tick, EncounterEventKind::ThemeChanged { theme });
        }
    }

    pub fn snapshot(&self) -> EncounterSnapshot {
        let special = &self.player.special;
        let player_ring = special.is_active().then_some(special.blast_radius);

        EncounterSnapshot {
            tick: self.tick,
            arena_width: self.config.arena_width,
            floor_top: self.config.floor_top,
            floor_bottom: self.config.floor_bottom,
            health: self.player.actor.health(),
            max_health: self.player.actor.max_health(),
            chaos_score: self.score.chaos_score,
            multiplier: self.score.multiplier,
            combo_streak: self.score.combo_streak,
            phase: self.progress.current_phase,
            phase_target: self.progress.effective_target(&self.config),
            special_unlocked: special.is_unlocked(),
            special_phase: special.phase,
            special_cooldown_fraction: special.cooldown_fraction(),
            boss_active: self.progress.boss_active,
            phase_transitioning: self.progress.phase_transitioning,
            hitstop_active: self.hitstop_ticks_remaining > 0,
            victory: self.is_victory(),
            defeated: self.is_defeated(),
            paused: self.paused,
            theme: self.theme,
            player: ActorView::from_actor(&self.player.actor, false, player_ring),
            enemies: self
                .enemies
                .iter()
                .map(|e| ActorView::from_actor(&e.actor, e.is_boss, e.active_blast_radius()))
                .collect(),
            projectiles: self
                .enemies
                .iter()
                .flat_map(|e| e.projectiles().iter().map(|p| p.position))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::AnimationState;
    use crate::player::Intent;

    fn director() -> Director {
        Director::new(EncounterConfig::default())
    }

    fn idle() -> IntentSet {
        IntentSet::empty()
    }

    fn kill(director: &mut Director, id: ActorId) {
        if let Some(enemy) = director.enemy_mut(id) {
            enemy.actor.apply_damage(10_000, 1.0);
        }
    }

    #[test]
    fn test_new_session_state() {
        let d = director();
        assert_eq!(d.current_phase(), 1);
        assert_eq!(d.score.chaos_score, 0);
        assert_eq!(d.score.multiplier, 1);
        assert_eq!(d.player.actor.health(), 100);
        assert!(d.enemies.is_empty());
        assert_eq!(d.theme(), MusicTheme::Brawl);
    }

    #[test]
    fn test_population_fills_one_per_tick() {
        let mut d = director();
        d.run_tick(&idle());
        assert_eq!(d.enemies.len(), 1);
        d.run_tick(&idle());
        assert_eq!(d.enemies.len(), 2);
        for _ in 0..10 {
            d.run_tick(&idle());
        }
        let alive = d.enemies.iter().filter(|e| e.actor.is_alive()).count();
        assert!(alive <= 3);
    }

    #[test]
    fn test_threshold_opens_transition_and_halts_spawning() {
        let mut d = director();
        d.score.chaos_score = 100;
        let events = d.run_tick(&idle());
        assert!(d.progress.phase_transitioning);
        assert!(d.enemies.is_empty());
        assert!(events.contains(|k| matches!(
            k,
            EncounterEventKind::PhaseTransitionStarted { phase: 1 }
        )));
        for _ in 0..20 {
            d.run_tick(&idle());
        }
        assert!(d.enemies.is_empty());
    }

    #[test]
    fn test_transition_completes_at_far_edge() {
        let mut d = director();
        d.score.chaos_score = 100;
        d.run_tick(&idle());
        d.player.actor.apply_damage(60, 1.0);
        d.player.actor.position.x = d.config.arena_width;
        let mut advanced = false;
        for _ in 0..40 {
            let events = d.run_tick(&idle());
            if events.contains(|k| matches!(k, EncounterEventKind::PhaseAdvanced { phase: 2 })) {
                advanced = true;
                break;
            }
        }
        assert!(advanced);
        assert_eq!(d.current_phase(), 2);
        assert!(!d.progress.phase_transitioning);
        assert_eq!(d.player.actor.position.x, EDGE_MARGIN);
        assert_eq!(d.player.actor.health(), 90);
    }

    #[test]
    fn test_boss_spawn_clears_roster() {
        let mut d = director();
        d.progress.current_phase = 3;
        d.spawn_enemy_at(Vec2::new(600.0, 450.0));
        d.spawn_enemy_at(Vec2::new(650.0, 450.0));
        d.score.chaos_score = 500;
        let events = d.run_tick(&idle());
        assert!(d.progress.boss_active);
        assert_eq!(d.enemies.len(), 1);
        assert!(d.enemies[0].is_boss);
        assert_eq!(d.enemies[0].actor.max_health(), 300);
        assert!(events.contains(|k| matches!(k, EncounterEventKind::BossSpawned { phase: 3, .. })));
        assert!(events.contains(|k| *k
            == EncounterEventKind::ThemeChanged {
                theme: MusicTheme::Boss
            }));
    }

    #[test]
    fn test_phase_three_boss_unlocks_special() {
        let mut d = director();
        d.progress.current_phase = 3;
        d.score.chaos_score = 500;
        d.run_tick(&idle());
        let boss_id = d.enemies[0].actor.id;
        kill(&mut d, boss_id);

        let mut unlocked = false;
        for _ in 0..30 {
            let events = d.run_tick(&idle());
            if events.contains(|k| *k == EncounterEventKind::SpecialUnlocked) {
                unlocked = true;
                assert!(events.contains(|k| matches!(
                    k,
                    EncounterEventKind::EnemyDefeated { boss: true, points: 750, .. }
                )));
                break;
            }
        }
        assert!(unlocked);
        assert!(d.player.special.is_unlocked());
        assert!(!d.progress.boss_active);
        assert!(d.progress.phase_transitioning);
    }

    #[test]
    fn test_final_boss_defeat_is_victory() {
        let mut d = director();
        d.progress.current_phase = 5;
        d.score.chaos_score = 1200;
        d.run_tick(&idle());
        assert_eq!(d.enemies[0].actor.max_health(), 500);
        let boss_id = d.enemies[0].actor.id;
        kill(&mut d, boss_id);
        for _ in 0..30 {
            d.run_tick(&idle());
        }
        assert!(d.is_victory());
        assert_eq!(d.theme(), MusicTheme::Victory);

        let tick = d.tick;
        d.run_tick(&idle());
        assert_eq!(d.tick, tick);
    }

    #[test]
    fn test_hitstop_freezes_simulation() {
        let mut d = director();
        let target = d.spawn_enemy_at(Vec2::new(0.0, 0.0));
        {
            let player = d.player.actor.position;
            let enemy = d.enemy_mut(target).unwrap();
            enemy.actor.position = Vec2::new(player.x + 30.0, player.y);
            // Keep the roll out of the picture
            enemy.dodge_cooldown = 1_000;
        }

        let jab = IntentSet::empty().with(Intent::Jab);
        let idle_set = idle();
        let mut landed_at = None;
        for i in 0..10 {
            let events = d.run_tick(if i == 0 { &jab } else { &idle_set });
            if events.contains(|k| matches!(k, EncounterEventKind::HitLanded { .. })) {
                landed_at = Some(d.tick);
                break;
            }
        }
        let landed_at = landed_at.expect("jab should land");
        assert_eq!(d.hitstop_ticks_remaining, HITSTOP_TICKS);
        assert_eq!(d.score.combo_streak, 1);

        let frozen = d.snapshot();
        for _ in 0..HITSTOP_TICKS {
            let events = d.run_tick(&IntentSet::empty().with(Intent::MoveRight));
            assert!(events.is_empty());
        }
        assert_eq!(d.tick, landed_at);
        assert_eq!(d.snapshot().player, frozen.player);
        assert_eq!(d.snapshot().enemies, frozen.enemies);

        d.run_tick(&idle());
        assert_eq!(d.tick, landed_at + 1);
    }

    #[test]
    fn test_pause_freezes_and_reports() {
        let mut d = director();
        d.drain_events();
        d.set_paused(true);
        let events = d.run_tick(&idle());
        assert!(events.contains(|k| *k == EncounterEventKind::Paused));
        assert!(events.contains(|k| *k
            == EncounterEventKind::ThemeChanged {
                theme: MusicTheme::Paused
            }));
        assert_eq!(d.tick, 0);
        assert!(d.run_tick(&idle()).is_empty());

        d.toggle_pause();
        let events = d.run_tick(&idle());
        assert!(events.contains(|k| *k == EncounterEventKind::Resumed));
        assert_eq!(d.tick, 1);
    }

    #[test]
    fn test_player_death_is_defeat() {
        let mut d = director();
        d.player.actor.apply_damage(100, 1.0);
        let events = d.run_tick(&idle());
        assert!(d.is_defeated());
        assert!(events.contains(|k| *k == EncounterEventKind::Defeat));
        assert_eq!(d.player.actor.state(), AnimationState::Dead);

        let tick = d.tick;
        assert!(d.run_tick(&idle()).is_empty());
        assert_eq!(d.tick, tick);
    }

    #[test]
    fn test_special_ring_damages_nearby_enemy() {
        let mut d = director();
        d.player.special.unlock();
        let near = {
            let p = d.player.actor.position;
            d.spawn_enemy_at(Vec2::new(p.x + 100.0, p.y))
        };
        d.run_tick(&IntentSet::empty().with(Intent::Special));

        let mut damaged = false;
        for _ in 0..120 {
            // Pin the target so AI movement cannot carry it out of the ring
            let p = d.player.actor.position;
            if let Some(enemy) = d.enemy_mut(near) {
                enemy.actor.position = Vec2::new(p.x + 100.0, p.y);
            }
            let events = d.run_tick(&idle());
            if events.contains(|k| matches!(k, EncounterEventKind::SpecialDamage { target, .. } if *target == near)) {
                damaged = true;
                break;
            }
        }
        assert!(damaged);
        assert_eq!(d.hitstop_ticks_remaining, 0);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut d = director();
        for _ in 0..50 {
            d.run_tick(&idle());
        }
        d.score.chaos_score = 400;
        d.restart();
        assert_eq!(d.tick, 0);
        assert_eq!(d.score.chaos_score, 0);
        assert!(d.enemies.is_empty());
        let events = d.drain_events();
        assert!(events.contains(|k| *k == EncounterEventKind::Restarted));
    }

    #[test]
    fn test_same_seed_same_session() {
        let mut a = director();
        let mut b = director();
        for _ in 0..300 {
            a.run_tick(&idle());
            b.run_tick(&idle());
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    fn push_boss(d: &mut Director, offset_x: f32, phase: u8) -> ActorId {
        let id = ActorId(900);
        let p = d.player.actor.position;
        d.enemies
            .push(Enemy::boss(id, Vec2::new(p.x + offset_x, p.y), phase));
        id
    }

    fn player_hits(events: &EncounterEventLog) -> Vec<(HitSource, u32)> {
        events
            .iter()
            .filter_map(|e| match e.kind {
                EncounterEventKind::PlayerHit { source, damage } => Some((source, damage)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_special_ring_hits_every_active_tick() {
        let mut d = director();
        d.player.special.unlock();
        d.player.actor.grant_invincibility(10_000);
        let boss = push_boss(&mut d, 1.0, 3);
        d.run_tick(&IntentSet::empty().with(Intent::Special));

        let mut hits = 0;
        for _ in 0..200 {
            let p = d.player.actor.position;
            let before = {
                let enemy = d.enemy_mut(boss).unwrap();
                enemy.actor.position = Vec2::new(p.x + 1.0, p.y);
                enemy.actor.health()
            };
            let events = d.run_tick(&idle());
            let after = d.enemy(boss).map(|e| e.actor.health()).unwrap_or(0);
            let landed = events.count(|k| {
                matches!(k, EncounterEventKind::SpecialDamage { target, damage: 15, .. } if *target == boss)
            });

            if d.player.special.is_active() && d.player.special.blast_radius >= 1.0 {
                assert_eq!(landed, 1);
                assert_eq!(after, before.saturating_sub(SPECIAL_DAMAGE));
                hits += 1;
            }
            if after == 0 {
                break;
            }
        }
        // 300 health at 15 per tick
        assert_eq!(hits, 20);
        assert!(d.enemy(boss).map_or(true, |e| e.actor.is_dead()));
    }

    #[test]
    fn test_enemy_melee_hits_player_and_resets_streak() {
        let mut d = director();
        let id = {
            let p = d.player.actor.position;
            d.spawn_enemy_at(Vec2::new(p.x + 30.0, p.y))
        };
        {
            let enemy = d.enemy_mut(id).unwrap();
            enemy.actor.facing = crate::core::types::Facing::Left;
            enemy.next_attack = Some(crate::actor::AttackKind::Jab);
            enemy.windup_remaining = 1;
            enemy.actor.set_animation_state(AnimationState::WindUp);
        }
        for _ in 0..7 {
            d.score.register_hit();
        }

        let mut hit = None;
        for _ in 0..30 {
            let events = d.run_tick(&idle());
            if let Some(found) = player_hits(&events).into_iter().next() {
                hit = Some(found);
                break;
            }
        }
        assert_eq!(hit, Some((HitSource::Melee(id), ENEMY_MELEE_DAMAGE)));
        assert_eq!(d.player.actor.health(), 100 - ENEMY_MELEE_DAMAGE);
        assert_eq!(d.score.combo_streak, 0);
        assert_eq!(d.score.multiplier, 1);
    }

    #[test]
    fn test_boss_blast_hits_player() {
        let mut d = director();
        let boss = push_boss(&mut d, 100.0, 3);
        {
            let blast = &mut d.enemy_mut(boss).unwrap().boss.as_mut().unwrap().blast;
            blast.phase = crate::enemy::BlastPhase::Active;
            blast.timer = 10;
        }
        let events = d.run_tick(&idle());
        assert_eq!(player_hits(&events), vec![(HitSource::Blast(boss), BLAST_DAMAGE)]);
        assert_eq!(d.player.actor.health(), 100 - BLAST_DAMAGE);
    }

    #[test]
    fn test_boss_blast_skips_dodging_player() {
        let mut d = director();
        let boss = push_boss(&mut d, 100.0, 3);
        {
            let blast = &mut d.enemy_mut(boss).unwrap().boss.as_mut().unwrap().blast;
            blast.phase = crate::enemy::BlastPhase::Active;
            blast.timer = 10;
        }
        // Dodging without the dodge's invincibility, so only the dodge check can save it
        d.player.actor.set_animation_state(AnimationState::Dodging);
        assert!(!d.player.actor.is_invincible());

        let events = d.run_tick(&idle());
        assert!(d.player.is_dodging());
        assert!(d.enemy(boss).is_some_and(|e| e.active_blast_radius().is_some()));
        assert!(player_hits(&events).is_empty());
        assert_eq!(d.player.actor.health(), 100);
    }

    fn plant_projectile(d: &mut Director, boss: ActorId) -> Vec2 {
        let anchor = player_anchor(d.player.actor.position);
        let volley = d
            .enemy_mut(boss)
            .unwrap()
            .boss
            .as_mut()
            .unwrap()
            .volley
            .as_mut()
            .unwrap();
        volley.projectiles.push(crate::enemy::Projectile {
            position: anchor,
            velocity: Vec2::ZERO,
            remaining_life: 100,
        });
        anchor
    }

    fn projectiles_near(d: &Director, point: Vec2) -> usize {
        d.enemies
            .iter()
            .flat_map(|e| e.projectiles())
            .filter(|p| p.position.distance(&point) <= 25.0)
            .count()
    }

    #[test]
    fn test_projectile_hits_player_and_is_consumed() {
        let mut d = director();
        let boss = push_boss(&mut d, 580.0, 5);
        let anchor = plant_projectile(&mut d, boss);

        let events = d.run_tick(&idle());
        assert_eq!(
            player_hits(&events),
            vec![(HitSource::Projectile(boss), PROJECTILE_DAMAGE)]
        );
        assert_eq!(d.player.actor.health(), 100 - PROJECTILE_DAMAGE);
        assert_eq!(projectiles_near(&d, anchor), 0);
    }

    #[test]
    fn test_projectile_passes_dodging_player() {
        let mut d = director();
        let boss = push_boss(&mut d, 580.0, 5);
        let anchor = plant_projectile(&mut d, boss);
        d.player.actor.set_animation_state(AnimationState::Dodging);

        let events = d.run_tick(&idle());
        assert!(player_hits(&events).is_empty());
        assert_eq!(d.player.actor.health(), 100);
        assert_eq!(projectiles_near(&d, anchor), 1);
    }

    #[test]
    fn test_enemy_dodge_roll_blocks_melee() {
        let jab = IntentSet::empty().with(Intent::Jab);
        let idle_set = idle();
        for seed in 0..200 {
            let mut d = Director::new(EncounterConfig::default().with_seed(seed));
            let id = {
                let p = d.player.actor.position;
                d.spawn_enemy_at(Vec2::new(p.x + 30.0, p.y))
            };
            for i in 0..8 {
                let events = d.run_tick(if i == 0 { &jab } else { &idle_set });
                if events.contains(|k| *k == EncounterEventKind::EnemyDodged { enemy: id }) {
                    assert!(!events.contains(|k| matches!(k, EncounterEventKind::HitLanded { .. })));
                    let enemy = d.enemy(id).unwrap();
                    assert_eq!(enemy.actor.health(), enemy.actor.max_health());
                    assert_eq!(enemy.actor.state(), AnimationState::Dodging);
                    assert_eq!(d.hitstop_ticks_remaining, 0);
                    assert_eq!(d.score.combo_streak, 0);
                    return;
                }
            }
        }
        panic!("no dodge rolled across 200 seeds");
    }
}


//! Target pool: spawning, per-frame motion, interaction and pruning

use glam::Vec2;

use super::clock::FrameClock;
use super::collision::{projectile_hits_target, target_interaction};
use super::rng::SimRng;
use super::sprite::SpriteSheet;
use super::target::{Target, TargetKind};
use crate::consts::{SPAWN_FRACTION, SUPER_BOMB_SLOTS, TARGET_TIME_SCALE};
use crate::settings::Settings;

/// How the pairwise interaction sweep visits target pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairSweep {
    /// Every ordered pair (i, j), i != j. Each overlap is resolved twice
    /// per frame, which is the gallery's tuned feel.
    #[default]
    Ordered,
    /// Every unordered pair once
    Unordered,
}

/// Rectangle targets bounce inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub min: Vec2,
    pub max: Vec2,
}

impl Arena {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Window-sized arena with a reserved band at the top
    pub fn from_settings(settings: &Settings, top_margin: f32) -> Self {
        Self {
            min: Vec2::new(0.0, top_margin),
            max: Vec2::new(settings.width as f32, settings.height as f32),
        }
    }
}

/// Owns the live targets
#[derive(Debug, Clone)]
pub struct TargetPool {
    targets: Vec<Target>,
    arena: Arena,
    sweep: PairSweep,
    clock: FrameClock,
    next_id: u32,
}

impl TargetPool {
    /// Empty pool whose frame clock starts at `now`
    pub fn new(arena: Arena, now: f32) -> Self {
        Self {
            targets: Vec::new(),
            arena,
            sweep: PairSweep::default(),
            clock: FrameClock::new(TARGET_TIME_SCALE, now),
            next_id: 1,
        }
    }

    /// Replace the pool contents with `CountTarget` freshly spawned targets.
    ///
    /// `spawn_margin` is the gun sprite size; twice its height is kept
    /// clear at the top of the arena. The first slots are SuperBombs.
    pub fn init(
        &mut self,
        settings: &Settings,
        spawn_margin: Vec2,
        sprites: &SpriteSheet,
        rng: &mut SimRng,
        now: f32,
    ) {
        let top = spawn_margin.y * 2.0;
        self.arena = Arena::from_settings(settings, top);
        self.targets.clear();

        let count = settings.count_target.max(0) as usize;
        let x_max = (settings.width as f32 * SPAWN_FRACTION) as i32;
        let y_max = (settings.height as f32 * SPAWN_FRACTION) as i32;

        for i in 0..count {
            let kind = if i >= SUPER_BOMB_SLOTS {
                TargetKind::Bomb
            } else {
                TargetKind::SuperBomb
            };
            let pos = Vec2::new(rng.real(0, x_max), rng.real(top as i32, y_max));
            let sprite = sprites.size_of(kind.profile().sprite_key);
            let id = self.next_entity_id();
            self.targets.push(Target::spawn(id, kind, pos, sprite, rng));
        }

        self.clock.reset(now);
        log::info!("Spawned {} targets in {:?}", self.targets.len(), self.arena);
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a target; its id is reassigned to keep ids unique
    pub fn push(&mut self, mut target: Target) -> u32 {
        target.id = self.next_entity_id();
        let id = target.id;
        self.targets.push(target);
        id
    }

    pub fn set_pair_sweep(&mut self, sweep: PairSweep) {
        self.sweep = sweep;
    }

    pub fn pair_sweep(&self) -> PairSweep {
        self.sweep
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn get(&self, id: u32) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    /// Sample the frame clock and advance by the scaled delta
    pub fn update(&mut self, now: f32) {
        let dt = self.clock.tick(now);
        self.advance_frame(dt);
    }

    /// Resolve interactions, then move every target and bounce off walls
    pub fn advance_frame(&mut self, dt: f32) {
        self.resolve_interactions(dt);

        let Arena { min, max } = self.arena;
        for target in &mut self.targets {
            target.advance(dt, min, max);
        }
    }

    /// Pairwise elastic interaction in stable index order
    pub fn resolve_interactions(&mut self, dt: f32) {
        let n = self.targets.len();
        for i in 0..n {
            for j in 0..n {
                let visit = match self.sweep {
                    PairSweep::Ordered => i != j,
                    PairSweep::Unordered => i < j,
                };
                if !visit {
                    continue;
                }
                let (a, b) = pair_mut(&mut self.targets, i, j);
                target_interaction(a, b, dt);
            }
        }
    }

    /// Test a projectile against targets in order; at most one is hit
    pub fn check_hit(&mut self, point: Vec2, size: f32, vel: Vec2, damage: i32) -> bool {
        for target in &mut self.targets {
            if projectile_hits_target(target, point, size, vel, damage) {
                log::debug!(
                    "Target {} ({:?}) hit, {} hp left",
                    target.id,
                    target.kind,
                    target.hit_points
                );
                return true;
            }
        }
        false
    }

    /// Remove depleted targets, returning how many were removed
    pub fn prune(&mut self) -> usize {
        let before = self.targets.len();
        self.targets.retain(|t| !t.is_depleted());
        let removed = before - self.targets.len();
        if removed > 0 {
            log::debug!("Pruned {} targets, {} remain", removed, self.targets.len());
        }
        removed
    }
}

/// Mutable references to two distinct elements
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert!(i != j);
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sprite::{SpriteSize, keys};

    const R10: SpriteSize = SpriteSize::new(12, 16);
    const R20: SpriteSize = SpriteSize::new(24, 32);

    fn open_arena() -> Arena {
        Arena::new(Vec2::new(-10_000.0, -10_000.0), Vec2::new(10_000.0, 10_000.0))
    }

    fn still(pos: Vec2, sprite: SpriteSize) -> Target {
        Target::new(0, TargetKind::Bomb, pos, Vec2::ZERO, sprite)
    }

    fn settings(count: i32) -> Settings {
        Settings {
            width: 1000,
            height: 800,
            count_target: count,
            ..Settings::default()
        }
    }

    #[test]
    fn test_init_kinds_and_bounds() {
        let mut pool = TargetPool::new(open_arena(), 0.0);
        let mut rng = SimRng::new(11);
        pool.init(&settings(14), Vec2::new(128.0, 64.0), &SpriteSheet::standard(), &mut rng, 0.0);

        assert_eq!(pool.len(), 14);
        for (i, t) in pool.targets().iter().enumerate() {
            let expected = if i < 10 { TargetKind::SuperBomb } else { TargetKind::Bomb };
            assert_eq!(t.kind, expected);
            assert!((0.0..700.0).contains(&t.pos.x));
            assert!((128.0..560.0).contains(&t.pos.y));
        }
        assert_eq!(pool.arena(), Arena::new(Vec2::new(0.0, 128.0), Vec2::new(1000.0, 800.0)));
    }

    #[test]
    fn test_init_is_seed_deterministic() {
        let sheet = SpriteSheet::standard();
        let mut a = TargetPool::new(open_arena(), 0.0);
        let mut b = TargetPool::new(open_arena(), 0.0);
        a.init(&settings(12), Vec2::new(128.0, 64.0), &sheet, &mut SimRng::new(5), 0.0);
        b.init(&settings(12), Vec2::new(128.0, 64.0), &sheet, &mut SimRng::new(5), 0.0);
        for (x, y) in a.targets().iter().zip(b.targets()) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.vel, y.vel);
        }
    }

    #[test]
    fn test_init_uses_kind_sprites() {
        let mut sheet = SpriteSheet::new();
        sheet.insert(keys::BOMB, R10);
        sheet.insert(keys::SUPER_BOMB, R20);
        let mut pool = TargetPool::new(open_arena(), 0.0);
        pool.init(&settings(11), Vec2::new(100.0, 50.0), &sheet, &mut SimRng::new(2), 0.0);
        assert_eq!(pool.targets()[0].radius, 20);
        assert_eq!(pool.targets()[10].radius, 10);
    }

    #[test]
    fn test_ordered_sweep_applies_impulse_twice() {
        let mut pool = TargetPool::new(open_arena(), 0.0);
        pool.push(still(Vec2::new(0.0, 0.0), R10));
        pool.push(still(Vec2::new(15.0, 0.0), R20));

        pool.resolve_interactions(0.1);
        let t = pool.targets();
        assert!((t[0].vel.x + 15.0).abs() < 1e-3, "{}", t[0].vel.x);
        assert!((t[1].vel.x - 7.5).abs() < 1e-3, "{}", t[1].vel.x);
    }

    #[test]
    fn test_unordered_sweep_applies_impulse_once() {
        let mut pool = TargetPool::new(open_arena(), 0.0);
        pool.set_pair_sweep(PairSweep::Unordered);
        pool.push(still(Vec2::new(0.0, 0.0), R10));
        pool.push(still(Vec2::new(15.0, 0.0), R20));

        pool.resolve_interactions(0.1);
        let t = pool.targets();
        assert!((t[0].vel.x + 7.5).abs() < 1e-3);
        assert!((t[1].vel.x - 3.75).abs() < 1e-3);
    }

    #[test]
    fn test_three_body_order_regression() {
        // Live-state updates make the outcome depend on pair order
        let mut pool = TargetPool::new(open_arena(), 0.0);
        pool.push(still(Vec2::new(0.0, 0.0), R10));
        pool.push(still(Vec2::new(10.0, 0.0), R10));
        pool.push(still(Vec2::new(20.0, 0.0), R10));

        pool.resolve_interactions(0.1);
        let t = pool.targets();
        // (0,1),(1,0): F=500 each side dv=5 -> twice
        // (0,2),(2,0): touching, none; (1,2),(2,1): twice
        assert!((t[0].vel.x + 10.0).abs() < 1e-3);
        assert!(t[1].vel.x.abs() < 1e-3);
        assert!((t[2].vel.x - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_advance_frame_interacts_then_moves() {
        let mut pool = TargetPool::new(open_arena(), 0.0);
        pool.push(still(Vec2::new(0.0, 0.0), R10));
        pool.push(still(Vec2::new(15.0, 0.0), R10));

        pool.advance_frame(0.1);
        let t = pool.targets();
        // dv = 5 each after the double sweep, then moved by v * dt
        assert!((t[0].pos.x + 0.5).abs() < 1e-3);
        assert!((t[1].pos.x - 15.5).abs() < 1e-3);
    }

    #[test]
    fn test_update_uses_scaled_clock() {
        let mut pool = TargetPool::new(open_arena(), 1.0);
        pool.push(Target::new(0, TargetKind::Bomb, Vec2::ZERO, Vec2::new(10.0, 0.0), R10));
        pool.update(1.25);
        // dt = 0.25 * 2
        assert!((pool.targets()[0].pos.x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_check_hit_short_circuits() {
        let mut pool = TargetPool::new(open_arena(), 0.0);
        let first = pool.push(still(Vec2::new(100.0, 100.0), R20));
        let second = pool.push(still(Vec2::new(100.0, 100.0), R20));

        assert!(pool.check_hit(Vec2::new(100.0, 95.0), 3.0, Vec2::new(0.0, 10.0), 15));
        assert_eq!(pool.get(first).map(|t| t.hit_points), Some(5));
        assert_eq!(pool.get(second).map(|t| t.hit_points), Some(20));
    }

    #[test]
    fn test_check_hit_miss() {
        let mut pool = TargetPool::new(open_arena(), 0.0);
        pool.push(still(Vec2::new(100.0, 100.0), R20));
        assert!(!pool.check_hit(Vec2::new(300.0, 300.0), 3.0, Vec2::new(0.0, 10.0), 15));
        assert_eq!(pool.targets()[0].hit_points, 20);
    }

    #[test]
    fn test_prune_removes_depleted() {
        let mut pool = TargetPool::new(open_arena(), 0.0);
        let keep = pool.push(still(Vec2::new(0.0, 0.0), R10));
        let gone = pool.push(still(Vec2::new(500.0, 0.0), R10));
        let vel = Vec2::new(0.0, 10.0);
        assert!(pool.check_hit(Vec2::new(500.0, -2.0), 3.0, vel, 15));
        assert!(pool.check_hit(Vec2::new(500.0, -2.0), 3.0, vel, 15));

        assert_eq!(pool.prune(), 1);
        assert!(pool.get(gone).is_none());
        assert!(pool.get(keep).is_some());
        assert_eq!(pool.prune(), 0);
    }

    #[test]
    fn test_empty_and_clear() {
        let mut pool = TargetPool::new(open_arena(), 0.0);
        assert!(pool.is_empty());
        pool.push(still(Vec2::ZERO, R10));
        assert!(!pool.is_empty());
        pool.clear();
        assert!(pool.is_empty());
    }

    #[test]
    fn test_pair_mut_both_orders() {
        let mut v = [1, 2, 3];
        let (a, b) = pair_mut(&mut v, 0, 2);
        assert_eq!((*a, *b), (1, 3));
        let (a, b) = pair_mut(&mut v, 2, 0);
        assert_eq!((*a, *b), (3, 1));
    }
}

//! Sound and visual-effect notifications
//!
//! The simulation reports what happened through the [`Feedback`] trait and
//! never waits on the answer. A sink that cannot create an effect returns
//! `None` and the simulation carries on without it.

use glam::Vec2;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Weapon fired
    Shot,
    /// Magazine reload started
    Reload,
    /// All targets cleared in time
    Victory,
    /// Match timer ran out
    Defeat,
}

impl SoundEffect {
    /// Asset name of the cue
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Shot => "ShotSound",
            SoundEffect::Reload => "RechargeSound",
            SoundEffect::Victory => "WinTheme",
            SoundEffect::Defeat => "LoseTheme",
        }
    }
}

/// Visual effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualEffect {
    /// Muzzle flash at the firing point
    Shot,
    /// Trail following a projectile in flight
    FlyBullet,
    /// Burst where a projectile was spent
    HitObject,
}

impl VisualEffect {
    /// Asset name of the effect
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualEffect::Shot => "Shot",
            VisualEffect::FlyBullet => "FlyBullet",
            VisualEffect::HitObject => "HitObject",
        }
    }
}

/// Opaque handle to a running visual effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectHandle(pub u32);

/// Fire-and-forget presentation hooks
pub trait Feedback {
    /// Play a sound cue
    fn play(&mut self, sound: SoundEffect);

    /// Start a visual effect; `None` if the effect is unavailable
    fn spawn(&mut self, effect: VisualEffect, at: Vec2) -> Option<EffectHandle>;

    /// Move a running effect
    fn update(&mut self, handle: EffectHandle, at: Vec2);

    /// Let a running effect wind down
    fn finish(&mut self, handle: EffectHandle);
}

/// Discards every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Feedback for Silent {
    fn play(&mut self, _sound: SoundEffect) {}

    fn spawn(&mut self, _effect: VisualEffect, _at: Vec2) -> Option<EffectHandle> {
        None
    }

    fn update(&mut self, _handle: EffectHandle, _at: Vec2) {}

    fn finish(&mut self, _handle: EffectHandle) {}
}

/// A recorded notification
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedbackEvent {
    Sound(SoundEffect),
    Spawned(VisualEffect, EffectHandle, Vec2),
    Updated(EffectHandle, Vec2),
    Finished(EffectHandle),
}

/// Records notifications in order
#[derive(Debug, Clone, Default)]
pub struct FeedbackLog {
    pub events: Vec<FeedbackEvent>,
    next_handle: u32,
}

impl FeedbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sounds(&self) -> impl Iterator<Item = SoundEffect> + '_ {
        self.events.iter().filter_map(|e| match e {
            FeedbackEvent::Sound(s) => Some(*s),
            _ => None,
        })
    }

    pub fn spawned(&self, effect: VisualEffect) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, FeedbackEvent::Spawned(v, _, _) if *v == effect))
            .count()
    }

    pub fn finished(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, FeedbackEvent::Finished(_)))
            .count()
    }
}

impl Feedback for FeedbackLog {
    fn play(&mut self, sound: SoundEffect) {
        self.events.push(FeedbackEvent::Sound(sound));
    }

    fn spawn(&mut self, effect: VisualEffect, at: Vec2) -> Option<EffectHandle> {
        self.next_handle += 1;
        let handle = EffectHandle(self.next_handle);
        self.events.push(FeedbackEvent::Spawned(effect, handle, at));
        Some(handle)
    }

    fn update(&mut self, handle: EffectHandle, at: Vec2) {
        self.events.push(FeedbackEvent::Updated(handle, at));
    }

    fn finish(&mut self, handle: EffectHandle) {
        self.events.push(FeedbackEvent::Finished(handle));
    }
}

/// Writes sounds and one-shot effects to the `log` facade.
///
/// Runs no effects, so continuous effects are never spawned.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingFeedback;

impl Feedback for LoggingFeedback {
    fn play(&mut self, sound: SoundEffect) {
        log::debug!("sound: {}", sound.as_str());
    }

    fn spawn(&mut self, effect: VisualEffect, at: Vec2) -> Option<EffectHandle> {
        match effect {
            VisualEffect::FlyBullet => log::trace!("effect: {}", effect.as_str()),
            _ => log::debug!("effect: {} at ({:.1}, {:.1})", effect.as_str(), at.x, at.y),
        }
        None
    }

    fn update(&mut self, _handle: EffectHandle, _at: Vec2) {}

    fn finish(&mut self, _handle: EffectHandle) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_hands_out_distinct_handles() {
        let mut log = FeedbackLog::new();
        let a = log.spawn(VisualEffect::FlyBullet, Vec2::ZERO);
        let b = log.spawn(VisualEffect::FlyBullet, Vec2::ONE);
        assert!(a.is_some() && b.is_some());
        assert_ne!(a, b);
        assert_eq!(log.spawned(VisualEffect::FlyBullet), 2);
    }

    #[test]
    fn test_log_records_in_order() {
        let mut log = FeedbackLog::new();
        log.play(SoundEffect::Shot);
        let h = log.spawn(VisualEffect::Shot, Vec2::new(1.0, 2.0));
        if let Some(h) = h {
            log.finish(h);
        }
        assert_eq!(log.sounds().collect::<Vec<_>>(), vec![SoundEffect::Shot]);
        assert_eq!(log.finished(), 1);
        assert_eq!(log.events.len(), 3);
    }

    #[test]
    fn test_silent_has_no_handles() {
        assert!(Silent.spawn(VisualEffect::HitObject, Vec2::ZERO).is_none());
    }

    #[test]
    fn test_asset_names() {
        assert_eq!(SoundEffect::Reload.as_str(), "RechargeSound");
        assert_eq!(VisualEffect::HitObject.as_str(), "HitObject");
    }
}

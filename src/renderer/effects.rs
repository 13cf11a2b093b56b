/// Count-down timer behind every full-screen effect.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EffectTimer {
    pub remaining: f32,
    pub duration: f32,
}

impl EffectTimer {
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration,
            duration,
        }
    }

    /// Remaining / total, 1 right after triggering, 0 when spent.
    #[inline]
    pub fn strength(&self) -> f32 {
        if self.duration <= 0.0 {
            0.0
        } else {
            (self.remaining / self.duration).clamp(0.0, 1.0)
        }
    }

    #[inline]
    pub fn active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }
}

/// Timers the game sets and the post-processing compositor reads.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenEffects {
    /// Red flash after taking a hit; also gates chromatic aberration.
    pub damage: EffectTimer,
    /// Brief bright flash after a kill.
    pub kill: EffectTimer,
    /// Low-health pulse, re-triggered by the game once per beat.
    pub heartbeat: EffectTimer,
    /// Death transition; `None` while alive.
    pub death: Option<EffectTimer>,
    /// Seconds of invincibility left (cyan pulse).
    pub invincibility: f32,
    /// Seconds of damage boost left (red pulse).
    pub damage_boost: f32,
    /// Shake amplitude in pixels.
    pub shake: f32,
}

impl ScreenEffects {
    pub fn tick(&mut self, dt: f32) {
        self.damage.tick(dt);
        self.kill.tick(dt);
        self.heartbeat.tick(dt);
        if let Some(d) = &mut self.death {
            d.tick(dt);
        }
        self.invincibility = (self.invincibility - dt).max(0.0);
        self.damage_boost = (self.damage_boost - dt).max(0.0);
        // exponential decay so shakes settle quickly
        self.shake *= (1.0 - 6.0 * dt).max(0.0);
        if self.shake < 0.05 {
            self.shake = 0.0;
        }
    }

    /// 0 while alive, rising to 1 as the death transition completes.
    #[inline]
    pub fn death_progress(&self) -> f32 {
        self.death.map_or(0.0, |d| 1.0 - d.strength())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_fades_linearly() {
        let mut t = EffectTimer::new(2.0);
        assert_eq!(t.strength(), 1.0);
        t.tick(0.5);
        assert_eq!(t.strength(), 0.75);
        t.tick(5.0);
        assert_eq!(t.strength(), 0.0);
        assert!(!t.active());
    }

    #[test]
    fn death_progress_rises() {
        let mut fx = ScreenEffects::default();
        assert_eq!(fx.death_progress(), 0.0);
        fx.death = Some(EffectTimer::new(1.0));
        fx.tick(0.25);
        assert!((fx.death_progress() - 0.25).abs() < 1e-6);
    }
}

//! Gravity speed curve
//!
//! Gravity is counted in driver ticks: the piece is pulled down one row every
//! `tick_cycle` ticks. The cycle shrinks as lines accumulate.

/// Ticks per gravity step at the start of a game
pub const BASE_TICK_CYCLE: u32 = 30;

/// Tick cycle for a cumulative line count.
///
/// One tick faster every 5 lines up to 100, then one tick faster every
/// 10 lines, never below 1.
pub fn tick_cycle_for(lines: u32) -> u32 {
    if lines < 100 {
        BASE_TICK_CYCLE - lines / 5
    } else {
        (BASE_TICK_CYCLE - 20).saturating_sub((lines - 100) / 10).max(1)
    }
}

/// Tick counter driving gravity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gravity {
    ticks: u32,
    tick_cycle: u32,
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new()
    }
}

impl Gravity {
    pub fn new() -> Self {
        Self {
            ticks: 0,
            tick_cycle: BASE_TICK_CYCLE,
        }
    }

    /// Count one driver tick. Returns true when a gravity step is due,
    /// restarting the count.
    pub fn tick(&mut self) -> bool {
        self.ticks += 1;
        if self.ticks >= self.tick_cycle {
            self.ticks = 0;
            true
        } else {
            false
        }
    }

    /// Recompute the cycle after lines were cleared
    pub fn update(&mut self, lines: u32) {
        self.tick_cycle = tick_cycle_for(lines);
    }

    pub fn tick_cycle(&self) -> u32 {
        self.tick_cycle
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_curve() {
        assert_eq!(tick_cycle_for(0), 30);
        assert_eq!(tick_cycle_for(4), 30);
        assert_eq!(tick_cycle_for(5), 29);
        assert_eq!(tick_cycle_for(99), 11);
        assert_eq!(tick_cycle_for(100), 10);
        assert_eq!(tick_cycle_for(110), 9);
        assert_eq!(tick_cycle_for(190), 1);
        assert_eq!(tick_cycle_for(10_000), 1);
    }

    #[test]
    fn test_curve_never_slows_down() {
        let mut previous = tick_cycle_for(0);
        for lines in 1..400 {
            let cycle = tick_cycle_for(lines);
            assert!(cycle <= previous && cycle >= 1);
            previous = cycle;
        }
    }

    #[test]
    fn test_tick_fires_every_cycle() {
        let mut gravity = Gravity::new();
        let fired: Vec<bool> = (0..60).map(|_| gravity.tick()).collect();
        assert_eq!(fired.iter().filter(|&&f| f).count(), 2);
        assert!(fired[29] && fired[59]);
    }

    #[test]
    fn test_update_and_reset() {
        let mut gravity = Gravity::new();
        gravity.update(100);
        assert_eq!(gravity.tick_cycle(), 10);
        gravity.reset();
        assert_eq!(gravity.tick_cycle(), BASE_TICK_CYCLE);
    }
}

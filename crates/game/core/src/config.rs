/// Simulation configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Euclidean distance below which an enemy counts as "near" for mood
    /// transitions (compared in squared form, never via square root).
    pub wake_proximity: u32,
    /// Mood transitions roll "1 in N" in either direction.
    pub mood_shift_chance: u32,
    /// Chaser behaviors idle with a "1 in N" roll before moving.
    pub chaser_idle_chance: u32,
    /// Awake movement sub-steps pick targeted movement with a "1 in N" roll,
    /// random movement otherwise.
    pub movement_mix_chance: u32,
    /// Base perception radius before light-source bonuses.
    pub base_perception: u32,
    /// Chebyshev radius around an observer scanned for glowing cells.
    pub glow_scan_radius: u32,
    /// Perception radius bonus granted per nearby glowing cell.
    pub glow_bonus: u32,
    /// Absolute cap on the effective perception radius.
    pub max_perception: u32,
    /// Duration applied to effects cast without an explicit duration.
    pub default_effect_duration: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of simultaneously active effects per actor.
    pub const MAX_STATUS_EFFECTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_WAKE_PROXIMITY: u32 = 6;
    pub const DEFAULT_MOOD_SHIFT_CHANCE: u32 = 3;
    pub const DEFAULT_CHASER_IDLE_CHANCE: u32 = 3;
    pub const DEFAULT_MOVEMENT_MIX_CHANCE: u32 = 2;
    pub const DEFAULT_BASE_PERCEPTION: u32 = 15;
    pub const DEFAULT_GLOW_SCAN_RADIUS: u32 = 5;
    pub const DEFAULT_GLOW_BONUS: u32 = 20;
    pub const DEFAULT_MAX_PERCEPTION: u32 = 100;
    pub const DEFAULT_EFFECT_DURATION: u32 = 8;

    pub fn new() -> Self {
        Self {
            wake_proximity: Self::DEFAULT_WAKE_PROXIMITY,
            mood_shift_chance: Self::DEFAULT_MOOD_SHIFT_CHANCE,
            chaser_idle_chance: Self::DEFAULT_CHASER_IDLE_CHANCE,
            movement_mix_chance: Self::DEFAULT_MOVEMENT_MIX_CHANCE,
            base_perception: Self::DEFAULT_BASE_PERCEPTION,
            glow_scan_radius: Self::DEFAULT_GLOW_SCAN_RADIUS,
            glow_bonus: Self::DEFAULT_GLOW_BONUS,
            max_perception: Self::DEFAULT_MAX_PERCEPTION,
            default_effect_duration: Self::DEFAULT_EFFECT_DURATION,
        }
    }

    /// Squared form of [`Self::wake_proximity`], the shape every distance
    /// comparison in the core uses.
    pub fn wake_proximity_squared(&self) -> u64 {
        u64::from(self.wake_proximity) * u64::from(self.wake_proximity)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

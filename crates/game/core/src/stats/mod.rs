//! Combat stat modifier ledger.
//!
//! Timed attack/defense buffs follow an "apply once at grant, revert once at
//! expiry" shape. The grant side (the buff-applying command) and the revert
//! side (the effect's final tick) both go through this ledger as explicit
//! commands carrying the same magnitude, so nothing reaches into shared
//! mutable stats directly and nothing can leak a modifier.

/// Which aggregate a modifier command targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    AttackDamage,
    Defense,
}

/// One apply/revert command payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub stat: StatKind,
    pub amount: i32,
}

impl StatModifier {
    pub const fn new(stat: StatKind, amount: i32) -> Self {
        Self { stat, amount }
    }
}

/// Net stat adjustments currently in force.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierLedger {
    attack_damage: i32,
    defense: i32,
}

impl ModifierLedger {
    /// Applies a modifier at buff grant time.
    pub fn apply(&mut self, modifier: StatModifier) {
        *self.slot(modifier.stat) += modifier.amount;
    }

    /// Reverts a previously applied modifier at buff expiry. The caller must
    /// pass the originally applied magnitude.
    pub fn revert(&mut self, modifier: StatModifier) {
        *self.slot(modifier.stat) -= modifier.amount;
    }

    pub fn attack_damage(&self) -> i32 {
        self.attack_damage
    }

    pub fn defense(&self) -> i32 {
        self.defense
    }

    fn slot(&mut self, stat: StatKind) -> &mut i32 {
        match stat {
            StatKind::AttackDamage => &mut self.attack_damage,
            StatKind::Defense => &mut self.defense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_then_revert_is_net_zero() {
        let mut ledger = ModifierLedger::default();
        let boost = StatModifier::new(StatKind::AttackDamage, 5);

        ledger.apply(boost);
        assert_eq!(ledger.attack_damage(), 5);

        ledger.revert(boost);
        assert_eq!(ledger.attack_damage(), 0);
    }

    #[test]
    fn stats_are_independent() {
        let mut ledger = ModifierLedger::default();
        ledger.apply(StatModifier::new(StatKind::Defense, 3));
        ledger.apply(StatModifier::new(StatKind::AttackDamage, -2));

        assert_eq!(ledger.defense(), 3);
        assert_eq!(ledger.attack_damage(), -2);
    }
}

//! Builtin level definitions.
//!
//! Each level is pure data: config overrides, a capability record, and
//! optional goal expressions. Nothing here is executable; the generic turn
//! routine in [`crate::Session`] consumes these records as-is.

use hexhop_core::{
    ConfigOverrides, LevelRules, LevelSpec, ResourceWeightOverrides, TurnEffect,
};

/// All builtin levels in play order.
#[must_use]
pub fn builtin_levels() -> Vec<LevelSpec> {
    vec![first_steps(), wider_shores(), monsters(), siegeworks()]
}

/// Looks up a builtin level by its stable identifier.
#[must_use]
pub fn builtin_level(id: u32) -> Option<LevelSpec> {
    builtin_levels().into_iter().find(|level| level.id == id)
}

/// Small board, one house to win, four turns to do it. No stone spawns.
fn first_steps() -> LevelSpec {
    LevelSpec {
        id: 1,
        name: "First Steps",
        overrides: ConfigOverrides {
            map_radius: Some(2),
            score_to_win: Some(1),
            turn_limit: Some(4),
            resource_weights: ResourceWeightOverrides {
                stone: Some(0),
                ..ResourceWeightOverrides::default()
            },
            ..ConfigOverrides::default()
        },
        rules: LevelRules::default(),
        goals: None,
    }
}

/// Full-size board, five houses, sixteen turns. No stone spawns.
fn wider_shores() -> LevelSpec {
    LevelSpec {
        id: 2,
        name: "Wider Shores",
        overrides: ConfigOverrides {
            map_radius: Some(3),
            score_to_win: Some(5),
            turn_limit: Some(16),
            resource_weights: ResourceWeightOverrides {
                stone: Some(0),
                ..ResourceWeightOverrides::default()
            },
            ..ConfigOverrides::default()
        },
        rules: LevelRules::default(),
        goals: None,
    }
}

/// Monsters roam and only weapon kills score; wood and stone are the only
/// resources, so every jump feeds the armory.
fn monsters() -> LevelSpec {
    LevelSpec {
        id: 3,
        name: "Monsters",
        overrides: ConfigOverrides {
            map_radius: Some(2),
            score_to_win: Some(3),
            turn_limit: Some(12),
            resource_weights: ResourceWeightOverrides {
                brick: Some(0),
                wheat: Some(0),
                sheep: Some(0),
                wood: Some(1),
                stone: Some(1),
            },
            ..ConfigOverrides::default()
        },
        rules: LevelRules {
            enemies_enabled: true,
            catapults_enabled: false,
            weapons_enabled: true,
            house_build_score: 0,
            catapult_build_score: 0,
            spawn_rate: 3,
            turn_effects: vec![
                TurnEffect::MoveEnemies,
                TurnEffect::SpawnEnemies,
                TurnEffect::ResolvePlayerContact,
            ],
        },
        goals: None,
    }
}

/// Everything enabled: houses, weapons, and catapults that volley each turn.
fn siegeworks() -> LevelSpec {
    LevelSpec {
        id: 4,
        name: "Siegeworks",
        overrides: ConfigOverrides {
            map_radius: Some(3),
            score_to_win: Some(10),
            ..ConfigOverrides::default()
        },
        rules: LevelRules {
            enemies_enabled: true,
            catapults_enabled: true,
            weapons_enabled: true,
            house_build_score: 1,
            catapult_build_score: 2,
            spawn_rate: 3,
            turn_effects: vec![
                TurnEffect::MoveEnemies,
                TurnEffect::SpawnEnemies,
                TurnEffect::CatapultVolley,
                TurnEffect::ResolvePlayerContact,
            ],
        },
        goals: None,
    }
}

#[cfg(test)]
mod tests {
    use hexhop_core::TurnEffect;

    use super::{builtin_level, builtin_levels};

    #[test]
    fn ids_are_unique_and_dense() {
        let levels = builtin_levels();
        let ids: Vec<u32> = levels.iter().map(|level| level.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn lookup_finds_each_builtin() {
        for level in builtin_levels() {
            let found = builtin_level(level.id).expect("builtin id resolves");
            assert_eq!(found.name, level.name);
        }
        assert!(builtin_level(99).is_none());
    }

    #[test]
    fn early_levels_spawn_no_stone() {
        for id in [1, 2] {
            let config = builtin_level(id).expect("level exists").config();
            assert_eq!(config.resource_weights.stone, 0);
        }
    }

    #[test]
    fn enemy_levels_move_before_contact() {
        for id in [3, 4] {
            let level = builtin_level(id).expect("level exists");
            assert!(level.rules.enemies_enabled);
            let effects = &level.rules.turn_effects;
            let move_at = effects
                .iter()
                .position(|e| *e == TurnEffect::MoveEnemies)
                .expect("movement scheduled");
            let contact_at = effects
                .iter()
                .position(|e| *e == TurnEffect::ResolvePlayerContact)
                .expect("contact scheduled");
            assert!(move_at < contact_at);
        }
    }

    #[test]
    fn only_the_last_level_fields_catapults() {
        let catapult_ids: Vec<u32> = builtin_levels()
            .iter()
            .filter(|level| level.rules.catapults_enabled)
            .map(|level| level.id)
            .collect();
        assert_eq!(catapult_ids, vec![4]);
    }
}

//! Damage, healing, splash, stun and shield resolution.

use kitchen_tactics_core::{
    BoardGrid, Cue, EffectKind, Event, Owner, UnitId, NEIGHBOR_SCAN_ORDER,
};

use crate::roster::Roster;

/// Health removed from a unit with `defense` by a hit of `raw_power`.
///
/// Every hit removes at least one point so defense alone never stalls a battle.
pub(crate) fn mitigated_damage(raw_power: u32, defense: u32) -> u32 {
    raw_power.saturating_sub(defense).max(1)
}

/// Applies a single hit and removes the target when its health reaches zero.
pub(crate) fn deal_damage(
    roster: &mut Roster,
    target: UnitId,
    raw_power: u32,
    out_events: &mut Vec<Event>,
) {
    let Some(unit) = roster.get_mut(target) else {
        return;
    };
    let amount = mitigated_damage(raw_power, unit.defense);
    unit.hp = unit.hp.saturating_sub(amount);
    let remaining = unit.hp;
    let owner = unit.owner;
    out_events.push(Event::UnitDamaged {
        unit: target,
        amount,
        remaining,
    });
    out_events.push(Event::CueTriggered { cue: Cue::Hit });

    if remaining == 0 && roster.remove(target).is_some() {
        out_events.push(Event::UnitDefeated {
            unit: target,
            owner,
        });
    }
}

/// Resolves `effect` against `target` with the provided power.
pub(crate) fn resolve_effect(
    roster: &mut Roster,
    grid: &BoardGrid,
    effect: EffectKind,
    target: UnitId,
    power: u32,
    out_events: &mut Vec<Event>,
) {
    match effect {
        EffectKind::Damage => deal_damage(roster, target, power, out_events),
        EffectKind::Heal => heal(roster, target, power, out_events),
        EffectKind::Aoe => {
            for victim in splash_victims(roster, grid, target) {
                deal_damage(roster, victim, power, out_events);
            }
        }
        EffectKind::Stun => {
            deal_damage(roster, target, power, out_events);
            if let Some(unit) = roster.get_mut(target) {
                unit.stunned_turns = 1;
                out_events.push(Event::UnitStunned { unit: target });
            }
        }
        EffectKind::Shield => {
            if let Some(unit) = roster.get_mut(target) {
                unit.hp = unit.hp.saturating_add(power);
                out_events.push(Event::UnitShielded {
                    unit: target,
                    amount: power,
                });
            }
        }
    }
}

fn heal(roster: &mut Roster, target: UnitId, power: u32, out_events: &mut Vec<Event>) {
    let Some(unit) = roster.get_mut(target) else {
        return;
    };
    let healed = unit.hp.saturating_add(power).min(unit.max_hp);
    let amount = healed.saturating_sub(unit.hp);
    unit.hp = healed.max(unit.hp);
    out_events.push(Event::UnitHealed {
        unit: target,
        amount,
    });
}

/// Primary target followed by its orthogonal neighbours on the same side.
///
/// Victims are collected before any damage lands so a defeated primary does
/// not change who the splash reaches.
fn splash_victims(roster: &Roster, grid: &BoardGrid, target: UnitId) -> Vec<UnitId> {
    let Some(primary) = roster.get(target) else {
        return Vec::new();
    };
    let side: Owner = primary.owner;
    let mut victims = vec![target];
    let Some(cell) = primary.placement.cell() else {
        return victims;
    };
    for direction in NEIGHBOR_SCAN_ORDER {
        let Some(neighbor_cell) = grid.neighbor(cell, direction) else {
            continue;
        };
        if let Some(neighbor) = roster.at(neighbor_cell) {
            if neighbor.owner == side && !victims.contains(&neighbor.id) {
                victims.push(neighbor.id);
            }
        }
    }
    victims
}

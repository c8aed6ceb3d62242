//! Blackboard shared by the AI policy nodes.

use tactics_core::{Battle, Position, SpellId, SpellTarget, Team, UnitActor, UnitId};

/// One command the AI wants to issue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AiDecision {
    CastSpell { spell: SpellId, target: SpellTarget },
    Attack { target: UnitId },
    Move { destination: Position },
    EndTurn,
}

/// Read-only view of the battle for one unit's decision, plus the slot the
/// policy writes its choice into.
///
/// The `'a` lifetime ties the context to the battle it borrows; evaluation
/// is synchronous, so the borrow never outlives a single decision.
pub struct AiContext<'a> {
    pub battle: &'a Battle,
    pub unit: UnitId,
    /// Whether the unit already moved this turn.
    pub moved: bool,
    decision: Option<AiDecision>,
}

impl<'a> AiContext<'a> {
    pub fn new(battle: &'a Battle, unit: UnitId, moved: bool) -> Self {
        Self {
            battle,
            unit,
            moved,
            decision: None,
        }
    }

    pub fn actor(&self) -> Option<&'a UnitActor> {
        self.battle.unit(self.unit)
    }

    pub fn position(&self) -> Option<Position> {
        self.actor().map(UnitActor::position)
    }

    pub fn team(&self) -> Option<Team> {
        self.actor().map(UnitActor::team)
    }

    /// Living units hostile to the deciding unit, in id order.
    pub fn enemies(&self) -> impl Iterator<Item = &'a UnitActor> + use<'a> {
        let team = self.team();
        self.battle
            .units()
            .filter(move |unit| unit.is_alive() && team.is_some_and(|team| unit.team().is_hostile_to(team)))
    }

    /// Among `candidates`, the unit with the lowest current HP; ties go to
    /// the one nearest the deciding unit, then to the earlier candidate.
    pub fn weakest(&self, candidates: &[UnitId]) -> Option<UnitId> {
        let origin = self.position()?;
        candidates
            .iter()
            .filter_map(|&id| self.battle.unit(id))
            .min_by_key(|unit| (unit.hp(), origin.manhattan(unit.position())))
            .map(UnitActor::id)
    }

    /// Among `candidates`, the unit with the lowest HP fraction.
    pub fn most_wounded(&self, candidates: &[UnitId]) -> Option<UnitId> {
        candidates
            .iter()
            .filter_map(|&id| self.battle.unit(id))
            .min_by(|a, b| a.hp_ratio().total_cmp(&b.hp_ratio()))
            .map(UnitActor::id)
    }

    pub fn decide(&mut self, decision: AiDecision) {
        self.decision = Some(decision);
    }

    pub fn decision(&self) -> Option<&AiDecision> {
        self.decision.as_ref()
    }

    pub fn take_decision(&mut self) -> Option<AiDecision> {
        self.decision.take()
    }
}

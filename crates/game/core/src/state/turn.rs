use super::UnitId;

/// Initiative entry used to build a [`TurnOrder`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitiativeRoll {
    pub unit: UnitId,
    /// `SPD + DEX / 2`.
    pub initiative: f32,
    /// Independent random draw; higher wins ties.
    pub tie_break: u32,
}

/// Fixed acting order for a battle.
///
/// Built once at battle start; afterwards it only shrinks as units die. The
/// order is never re-sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOrder {
    order: Vec<UnitId>,
    index: usize,
    /// The unit at `index` was removed; `index` already points at its successor.
    vacated: bool,
}

impl TurnOrder {
    /// Sorts by initiative (descending), then tie-break draw (descending), then id.
    pub fn from_rolls(mut rolls: Vec<InitiativeRoll>) -> Self {
        rolls.sort_by(|a, b| {
            b.initiative
                .total_cmp(&a.initiative)
                .then_with(|| b.tie_break.cmp(&a.tie_break))
                .then_with(|| a.unit.cmp(&b.unit))
        });

        Self {
            order: rolls.into_iter().map(|roll| roll.unit).collect(),
            index: 0,
            vacated: false,
        }
    }

    /// The unit whose turn it is, if it is still in the order.
    pub fn current(&self) -> Option<UnitId> {
        if self.vacated {
            return None;
        }
        self.order.get(self.index).copied()
    }

    /// Moves to the next unit, wrapping at the end.
    ///
    /// Returns the new current unit and whether a full cycle just completed.
    pub fn advance(&mut self) -> Option<(UnitId, bool)> {
        if self.order.is_empty() {
            return None;
        }

        if self.vacated {
            self.vacated = false;
        } else {
            self.index += 1;
        }

        let wrapped = self.index >= self.order.len();
        if wrapped {
            self.index = 0;
        }
        Some((self.order[self.index], wrapped))
    }

    /// Removes a unit, keeping the current position stable.
    pub fn remove(&mut self, unit: UnitId) -> bool {
        let Some(position) = self.order.iter().position(|id| *id == unit) else {
            return false;
        };

        self.order.remove(position);
        if position < self.index {
            self.index -= 1;
        } else if position == self.index {
            self.vacated = true;
        }
        true
    }

    pub fn contains(&self, unit: UnitId) -> bool {
        self.order.contains(&unit)
    }

    pub fn iter(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

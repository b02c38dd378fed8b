//! Authoritative unit storage for the board and the bench.

use kitchen_tactics_core::{CellCoord, IngredientKind, Owner, Placement, UnitId};

use crate::unit::Unit;

/// Registry that stores deployed and benched units and allocates identifiers.
///
/// Board units are kept in roster (insertion) order, which is the order
/// enemies act in and the order position lookups scan.
#[derive(Debug)]
pub(crate) struct Roster {
    board: Vec<Unit>,
    bench: Vec<Unit>,
    next_unit_id: UnitId,
}

impl Roster {
    pub(crate) fn new() -> Self {
        Self {
            board: Vec::new(),
            bench: Vec::new(),
            next_unit_id: UnitId::new(0),
        }
    }

    /// Creates a level-one unit and stores it according to `placement`.
    pub(crate) fn spawn(
        &mut self,
        kind: IngredientKind,
        owner: Owner,
        placement: Placement,
    ) -> &mut Unit {
        let id = self.next_unit_id;
        self.next_unit_id = UnitId::new(id.get().saturating_add(1));
        let unit = Unit::new(id, kind, owner, placement);
        let slot = match placement {
            Placement::Board(_) => &mut self.board,
            Placement::Bench => &mut self.bench,
        };
        slot.push(unit);
        let index = slot.len() - 1;
        &mut slot[index]
    }

    pub(crate) fn board(&self) -> &[Unit] {
        &self.board
    }

    pub(crate) fn bench(&self) -> &[Unit] {
        &self.bench
    }

    pub(crate) fn get(&self, id: UnitId) -> Option<&Unit> {
        self.board.iter().find(|unit| unit.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.board.iter_mut().find(|unit| unit.id == id)
    }

    pub(crate) fn bench_unit(&self, index: usize) -> Option<&Unit> {
        self.bench.get(index)
    }

    pub(crate) fn bench_position(&self, id: UnitId) -> Option<usize> {
        self.bench.iter().position(|unit| unit.id == id)
    }

    /// First board unit in roster order standing on `cell`.
    pub(crate) fn at(&self, cell: CellCoord) -> Option<&Unit> {
        self.board
            .iter()
            .find(|unit| unit.placement == Placement::Board(cell))
    }

    pub(crate) fn is_occupied(&self, cell: CellCoord) -> bool {
        self.at(cell).is_some()
    }

    pub(crate) fn count(&self, owner: Owner) -> usize {
        self.board.iter().filter(|unit| unit.owner == owner).count()
    }

    pub(crate) fn ids_owned_by(&self, owner: Owner) -> Vec<UnitId> {
        self.board
            .iter()
            .filter(|unit| unit.owner == owner)
            .map(|unit| unit.id)
            .collect()
    }

    pub(crate) fn board_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.board.iter_mut()
    }

    pub(crate) fn all_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.board.iter_mut().chain(self.bench.iter_mut())
    }

    /// Removes a unit from the board.
    pub(crate) fn remove(&mut self, id: UnitId) -> Option<Unit> {
        let index = self.board.iter().position(|unit| unit.id == id)?;
        Some(self.board.remove(index))
    }

    /// Removes a unit from the bench.
    pub(crate) fn remove_from_bench(&mut self, id: UnitId) -> Option<Unit> {
        let index = self.bench_position(id)?;
        Some(self.bench.remove(index))
    }

    /// Removes a unit from whichever collection holds it.
    pub(crate) fn discard(&mut self, id: UnitId) -> Option<Unit> {
        self.remove(id).or_else(|| self.remove_from_bench(id))
    }

    /// Moves a bench unit to the end of the roster at `cell`.
    pub(crate) fn deploy(&mut self, id: UnitId, cell: CellCoord) -> bool {
        let Some(mut unit) = self.remove_from_bench(id) else {
            return false;
        };
        unit.placement = Placement::Board(cell);
        self.board.push(unit);
        true
    }

    /// Returns a board unit to the bench at `index`, clamped to the bench length.
    pub(crate) fn return_to_bench(&mut self, id: UnitId, index: usize) -> bool {
        let Some(mut unit) = self.remove(id) else {
            return false;
        };
        unit.placement = Placement::Bench;
        let index = index.min(self.bench.len());
        self.bench.insert(index, unit);
        true
    }

    pub(crate) fn push_bench(&mut self, mut unit: Unit) {
        unit.placement = Placement::Bench;
        self.bench.push(unit);
    }

    pub(crate) fn push_board(&mut self, unit: Unit) {
        self.board.push(unit);
    }

    /// Empties the board, yielding its units in roster order.
    pub(crate) fn take_board(&mut self) -> Vec<Unit> {
        std::mem::take(&mut self.board)
    }
}

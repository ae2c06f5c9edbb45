use common::bitboard::Square;

use super::castle_rights::{CastleRights, ALL_CASTLE_RIGHTS};
use super::error::BoardError;
use super::state_stack::StateStack;

/// Stores information about state changes related to individual chess moves,
/// including en passant targets, castle rights, and position clocks.
#[derive(Clone, Debug)]
pub struct MoveInfo {
    en_passant_target_stack: StateStack<Option<Square>>,
    castle_rights_stack: StateStack<CastleRights>,
    halfmove_clock_stack: StateStack<u16>,
    fullmove_number: u16,
}

impl Default for MoveInfo {
    fn default() -> Self {
        Self {
            en_passant_target_stack: StateStack::new(None),
            castle_rights_stack: StateStack::new(ALL_CASTLE_RIGHTS),
            halfmove_clock_stack: StateStack::new(0),
            fullmove_number: 1,
        }
    }
}

impl MoveInfo {
    pub fn new() -> Self {
        Default::default()
    }

    // En passant state management

    pub fn push_en_passant_target(&mut self, target_square: Option<Square>) -> Option<Square> {
        self.en_passant_target_stack.push(target_square)
    }

    pub fn peek_en_passant_target(&self) -> Option<Square> {
        *self.en_passant_target_stack.peek()
    }

    /// Returns the discarded target together with the restored one.
    pub fn pop_en_passant_target(
        &mut self,
    ) -> Result<(Option<Square>, Option<Square>), BoardError> {
        let old_target = self
            .en_passant_target_stack
            .pop()
            .ok_or(BoardError::StateStackUnderflow {
                stack: "en passant",
            })?;
        Ok((old_target, self.peek_en_passant_target()))
    }

    pub fn set_en_passant_target(&mut self, target_square: Option<Square>) {
        self.en_passant_target_stack.replace(target_square);
    }

    // Castle rights state management

    pub fn peek_castle_rights(&self) -> CastleRights {
        *self.castle_rights_stack.peek()
    }

    /// Returns the previous set of castle rights, as well as the new set of
    /// castle rights after losing the specified rights. The new set of rights
    /// is pushed onto the stack even when nothing was lost.
    pub fn lose_castle_rights(&mut self, lost_rights: CastleRights) -> (CastleRights, CastleRights) {
        let old_rights = self.peek_castle_rights();
        let new_rights = old_rights.without(lost_rights);
        self.castle_rights_stack.push(new_rights);
        (old_rights, new_rights)
    }

    /// The inverse of `lose_castle_rights`.
    pub fn pop_castle_rights(&mut self) -> Result<(CastleRights, CastleRights), BoardError> {
        let old_rights = self
            .castle_rights_stack
            .pop()
            .ok_or(BoardError::StateStackUnderflow {
                stack: "castle rights",
            })?;
        Ok((old_rights, self.peek_castle_rights()))
    }

    pub fn set_castle_rights(&mut self, rights: CastleRights) {
        self.castle_rights_stack.replace(rights);
    }

    // Position clock state management

    pub fn increment_fullmove_number(&mut self) -> u16 {
        self.fullmove_number += 1;
        self.fullmove_number
    }

    pub fn decrement_fullmove_number(&mut self) -> u16 {
        self.fullmove_number = self.fullmove_number.saturating_sub(1).max(1);
        self.fullmove_number
    }

    pub fn set_fullmove_number(&mut self, number: u16) -> u16 {
        self.fullmove_number = number;
        number
    }

    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub fn increment_halfmove_clock(&mut self) -> u16 {
        let new_clock = self.halfmove_clock_stack.peek().saturating_add(1);
        self.halfmove_clock_stack.push(new_clock)
    }

    pub fn reset_halfmove_clock(&mut self) -> u16 {
        self.halfmove_clock_stack.push(0)
    }

    pub fn set_halfmove_clock(&mut self, clock: u16) {
        self.halfmove_clock_stack.replace(clock);
    }

    pub fn halfmove_clock(&self) -> u16 {
        *self.halfmove_clock_stack.peek()
    }

    pub fn pop_halfmove_clock(&mut self) -> Result<u16, BoardError> {
        self.halfmove_clock_stack
            .pop()
            .ok_or(BoardError::StateStackUnderflow {
                stack: "halfmove clock",
            })
    }
}

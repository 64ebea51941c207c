//! Minimal TicTacToe rules used by the unit tests.

use crate::rules::GameRules;

pub const X: u8 = 1;
pub const O: u8 = 2;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub type Board = [u8; 9];

/// Parse a board from `X`, `O` and `.` characters, ignoring whitespace.
pub fn board_from(cells: &str) -> Board {
    let mut board = [0u8; 9];
    let parsed: Vec<u8> = cells
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            'X' => X,
            'O' => O,
            _ => 0,
        })
        .collect();
    assert_eq!(parsed.len(), 9, "board needs 9 cells: {:?}", cells);
    board.copy_from_slice(&parsed);
    board
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl GameRules for TicTacToe {
    type Board = Board;
    type Player = u8;

    fn legal_next_positions(&self, board: &Board, player: u8) -> Vec<Board> {
        (0..9)
            .filter(|&i| board[i] == 0)
            .map(|i| {
                let mut next = *board;
                next[i] = player;
                next
            })
            .collect()
    }

    fn has_won(&self, board: &Board, side: u8) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&i| board[i] == side))
    }

    fn other_player(&self, player: u8) -> u8 {
        if player == X {
            O
        } else {
            X
        }
    }
}

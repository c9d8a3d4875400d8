/* =======================================================================
Slate is a chess playing engine.
Copyright (C) 2025-2026, The Slate Authors

Slate is written in the Rust programming language. It is an original
work, not derived from any engine that came before it. However, it does
use a lot of concepts which are well-known and are in use by most if not
all classical alpha/beta-based chess engines.

Slate is free software: you can redistribute it and/or modify it under
the terms of the GNU General Public License version 3 as published by
the Free Software Foundation.

Slate is distributed in the hope that it will be useful, but WITHOUT
ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License
for more details.

You should have received a copy of the GNU General Public License along
with this program.  If not, see <http://www.gnu.org/licenses/>.
======================================================================= */

use super::{defs::Castling, Board};
use crate::defs::FEN_START_POSITION;
use if_chain::if_chain;
use std::fmt;

const SHORTEST_FEN: usize = 4;
const LONGEST_FEN: usize = 6;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FenError {
    PartCount,
    Pieces,
    Side,
    Castling,
    EnPassant,
    HalfmoveClock,
    FullmoveNumber,
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let error = match self {
            Self::PartCount => "FEN must have 4 to 6 whitespace-separated parts",
            Self::Pieces => "piece placement part is malformed",
            Self::Side => "side to move must be 'w' or 'b'",
            Self::Castling => "castling part is malformed",
            Self::EnPassant => "en-passant part is malformed",
            Self::HalfmoveClock => "halfmove clock is not a number",
            Self::FullmoveNumber => "fullmove number is not a number",
        };
        write!(f, "{error}")
    }
}

impl Board {
    // Sets up the position described by the given FEN-string, or the
    // starting position when no string is provided. On error the board is
    // left unchanged.
    pub fn fen_read(&mut self, fen: Option<&str>) -> Result<(), FenError> {
        let fen = fen.unwrap_or(FEN_START_POSITION);
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < SHORTEST_FEN || parts.len() > LONGEST_FEN {
            return Err(FenError::PartCount);
        }

        let grid = parse_pieces(parts[0])?;
        let turn = parse_side(parts[1])?;
        let castling = parse_castling(parts[2])?;
        let (ep_row, ep_col) = parse_en_passant(parts[3])?;
        let halfmove = match parts.get(4) {
            Some(p) => p.parse::<u8>().map_err(|_| FenError::HalfmoveClock)?,
            None => 0,
        };
        let fullmove = match parts.get(5) {
            Some(p) => p.parse::<u16>().map_err(|_| FenError::FullmoveNumber)?,
            None => 1,
        };

        self.set_from_ui(&grid, turn, castling, ep_row, ep_col, halfmove, fullmove);
        Ok(())
    }
}

// Piece placement: 8 ranks from rank 8 down to rank 1, '/'-separated.
// Returns the UI grid encoding (row 0 = rank 8).
fn parse_pieces(part: &str) -> Result<[[i8; 8]; 8], FenError> {
    let mut grid = [[0i8; 8]; 8];
    let ranks: Vec<&str> = part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::Pieces);
    }

    for (row, rank) in ranks.iter().enumerate() {
        let mut col = 0usize;
        for c in rank.chars() {
            if let Some(skip) = c.to_digit(10) {
                col += skip as usize;
                continue;
            }
            let code = match c.to_ascii_lowercase() {
                'p' => 1,
                'n' => 2,
                'b' => 3,
                'r' => 4,
                'q' => 5,
                'k' => 6,
                _ => return Err(FenError::Pieces),
            };
            if col >= 8 {
                return Err(FenError::Pieces);
            }
            grid[row][col] = if c.is_ascii_uppercase() { code } else { -code };
            col += 1;
        }
        if col != 8 {
            return Err(FenError::Pieces);
        }
    }

    Ok(grid)
}

fn parse_side(part: &str) -> Result<i8, FenError> {
    match part {
        "w" => Ok(1),
        "b" => Ok(-1),
        _ => Err(FenError::Side),
    }
}

fn parse_castling(part: &str) -> Result<u8, FenError> {
    if part == "-" {
        return Ok(Castling::NONE);
    }
    let mut castling = Castling::NONE;
    for c in part.chars() {
        castling |= match c {
            'K' => Castling::WK,
            'Q' => Castling::WQ,
            'k' => Castling::BK,
            'q' => Castling::BQ,
            _ => return Err(FenError::Castling),
        };
    }
    Ok(castling)
}

// The ep part is either "-" or a square like "e3". The UI encoding wants
// a row/col pair with 0xFF/0xFF for "none".
fn parse_en_passant(part: &str) -> Result<(u8, u8), FenError> {
    if part == "-" {
        return Ok((0xFF, 0xFF));
    }

    let mut chars = part.chars();
    if_chain! {
        if let Some(file) = chars.next();
        if let Some(rank) = chars.next();
        if chars.next().is_none();
        if ('a'..='h').contains(&file);
        if ('1'..='8').contains(&rank);
        then {
            let col = file as u8 - b'a';
            let row = b'8' - rank as u8;
            Ok((row, col))
        } else {
            Err(FenError::EnPassant)
        }
    }
}

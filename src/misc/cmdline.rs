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

use crate::defs::{About, FEN_START_POSITION};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

// Consts for command line options, flags and arguments

struct CmdLineArgs;
impl CmdLineArgs {
    // FEN
    const FEN_LONG: &'static str = "fen";
    const FEN_SHORT: char = 'f';
    const FEN_HELP: &'static str = "Set up the given position";

    // Perft
    const PERFT_LONG: &'static str = "perft";
    const PERFT_SHORT: char = 'p';
    const PERFT_HELP: &'static str = "Run perft to the given depth";
    const PERFT_DEFAULT: u8 = 0;

    // Divide
    const DIVIDE_LONG: &'static str = "divide";
    const DIVIDE_HELP: &'static str = "Print per-move perft subtotals";

    // Search depth
    const DEPTH_LONG: &'static str = "depth";
    const DEPTH_SHORT: char = 'd';
    const DEPTH_HELP: &'static str = "Search to the given depth";
    const DEPTH_DEFAULT: u8 = 0;

    // Search time
    const TIME_LONG: &'static str = "time";
    const TIME_SHORT: char = 't';
    const TIME_HELP: &'static str = "Search time budget in milliseconds";
    const TIME_DEFAULT: u32 = 0;

    // Node cap
    const NODES_LONG: &'static str = "nodes";
    const NODES_SHORT: char = 'n';
    const NODES_HELP: &'static str = "Limit the search to this many nodes";
    const NODES_DEFAULT: u64 = 0;

    // Kiwipete
    const KIWI_LONG: &'static str = "kiwipete";
    const KIWI_SHORT: char = 'k';
    const KIWI_HELP: &'static str = "Set up KiwiPete position (ignore --fen)";

    // Evaluation breakdown
    const EVAL_LONG: &'static str = "eval";
    const EVAL_SHORT: char = 'e';
    const EVAL_HELP: &'static str = "Print the static evaluation term by term";
}

pub struct CmdLine {
    arguments: ArgMatches,
}

impl CmdLine {
    pub fn new() -> Self {
        Self {
            arguments: Self::get(),
        }
    }

    pub fn fen(&self) -> String {
        self.arguments
            .get_one::<String>(CmdLineArgs::FEN_LONG)
            .unwrap_or(&FEN_START_POSITION.to_string())
            .clone()
    }

    pub fn perft(&self) -> u8 {
        *self
            .arguments
            .get_one::<u8>(CmdLineArgs::PERFT_LONG)
            .unwrap_or(&CmdLineArgs::PERFT_DEFAULT)
    }

    pub fn has_divide(&self) -> bool {
        self.arguments.get_flag(CmdLineArgs::DIVIDE_LONG)
    }

    pub fn depth(&self) -> u8 {
        *self
            .arguments
            .get_one::<u8>(CmdLineArgs::DEPTH_LONG)
            .unwrap_or(&CmdLineArgs::DEPTH_DEFAULT)
    }

    pub fn time(&self) -> u32 {
        *self
            .arguments
            .get_one::<u32>(CmdLineArgs::TIME_LONG)
            .unwrap_or(&CmdLineArgs::TIME_DEFAULT)
    }

    pub fn nodes(&self) -> u64 {
        *self
            .arguments
            .get_one::<u64>(CmdLineArgs::NODES_LONG)
            .unwrap_or(&CmdLineArgs::NODES_DEFAULT)
    }

    pub fn has_kiwipete(&self) -> bool {
        self.arguments.get_flag(CmdLineArgs::KIWI_LONG)
    }

    pub fn has_eval(&self) -> bool {
        self.arguments.get_flag(CmdLineArgs::EVAL_LONG)
    }

    fn get() -> ArgMatches {
        Command::new(About::ENGINE)
            .version(About::VERSION)
            .author(About::AUTHOR)
            .arg(
                Arg::new(CmdLineArgs::FEN_LONG)
                    .short(CmdLineArgs::FEN_SHORT)
                    .long(CmdLineArgs::FEN_LONG)
                    .help(CmdLineArgs::FEN_HELP)
                    .num_args(1),
            )
            .arg(
                Arg::new(CmdLineArgs::PERFT_LONG)
                    .short(CmdLineArgs::PERFT_SHORT)
                    .long(CmdLineArgs::PERFT_LONG)
                    .help(CmdLineArgs::PERFT_HELP)
                    .value_parser(value_parser!(u8))
                    .num_args(1),
            )
            .arg(
                Arg::new(CmdLineArgs::DIVIDE_LONG)
                    .long(CmdLineArgs::DIVIDE_LONG)
                    .help(CmdLineArgs::DIVIDE_HELP)
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new(CmdLineArgs::DEPTH_LONG)
                    .short(CmdLineArgs::DEPTH_SHORT)
                    .long(CmdLineArgs::DEPTH_LONG)
                    .help(CmdLineArgs::DEPTH_HELP)
                    .value_parser(value_parser!(u8))
                    .num_args(1),
            )
            .arg(
                Arg::new(CmdLineArgs::TIME_LONG)
                    .short(CmdLineArgs::TIME_SHORT)
                    .long(CmdLineArgs::TIME_LONG)
                    .help(CmdLineArgs::TIME_HELP)
                    .value_parser(value_parser!(u32))
                    .num_args(1),
            )
            .arg(
                Arg::new(CmdLineArgs::NODES_LONG)
                    .short(CmdLineArgs::NODES_SHORT)
                    .long(CmdLineArgs::NODES_LONG)
                    .help(CmdLineArgs::NODES_HELP)
                    .value_parser(value_parser!(u64))
                    .num_args(1),
            )
            .arg(
                Arg::new(CmdLineArgs::KIWI_LONG)
                    .short(CmdLineArgs::KIWI_SHORT)
                    .long(CmdLineArgs::KIWI_LONG)
                    .help(CmdLineArgs::KIWI_HELP)
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new(CmdLineArgs::EVAL_LONG)
                    .short(CmdLineArgs::EVAL_SHORT)
                    .long(CmdLineArgs::EVAL_LONG)
                    .help(CmdLineArgs::EVAL_HELP)
                    .action(ArgAction::SetTrue),
            )
            .get_matches()
    }
}

impl Default for CmdLine {
    fn default() -> Self {
        Self::new()
    }
}

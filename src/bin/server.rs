//! Dungeon narrator server binary.
//! Run with: cargo run --bin dungeon-narrator

use std::process::ExitCode;

use dungeon_narrator::start_dungeon_narrator;

fn main() -> ExitCode {
    start_dungeon_narrator::run()
}

//! Instruction execution handlers

mod arithmetic;
mod control;
mod io;
mod stack;
mod variables;

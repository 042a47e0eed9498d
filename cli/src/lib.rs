// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal front end for the Goban rules engine

pub mod render;
pub mod repl;

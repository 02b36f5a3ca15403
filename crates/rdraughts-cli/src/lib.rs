//! rdraughts-cli
//!
//! 対話型コンソールで 1 局を進める。入出力は `BufRead` / `Write` で抽象化しており、
//! `main.rs` は標準入出力を渡すだけ。

pub mod console;

pub use console::{Console, SessionEnd};

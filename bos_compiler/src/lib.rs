//! # BOS Compiler
//!
//! Compiler core for the BOS object-behavior scripting language,
//! targeting the COB bytecode format.
//!
//! This crate carries the identity layer of the target instruction set:
//! the opcode catalog and the reserved-word resolver consumed by the code
//! generator and by instruction-stream tooling.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

pub mod bytecode;

pub use bytecode::{Family, InvalidOpcode, Opcode};

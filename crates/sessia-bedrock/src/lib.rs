//! sessia-bedrock
//!
//! The AI agent boundary: prompt assembly, Bedrock Converse invocation,
//! and parsing of the structured response into typed report content.
//!
//! The model itself is an opaque collaborator — prompt in, JSON out. All
//! known response fields are optional, and unknown fields survive in each
//! content variant's side map, so a partially populated answer is legal.

pub mod context;
pub mod error;
pub mod generate;
pub mod parse;
pub mod prompt;

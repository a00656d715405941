//! One extractor per language in the supported roster. C# gets a full
//! tree-sitter parse; VB gets a hand-rolled structural parser sharing
//! the same container-stack FQN synthesis; everything else is a
//! pattern-directed line scan per spec.

pub mod autolisp;
pub mod csharp;
pub mod json;
pub mod powershell;
pub mod sql;
pub mod vb;
pub mod xml;

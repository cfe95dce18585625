//! Sonnet Engine — template-driven sonnet generation.
//!
//! Produces fourteen-line sonnets from sentence templates and themed word
//! banks, steering each line toward iambic pentameter and a Shakespearean or
//! Petrarchan rhyme scheme with suffix heuristics, then scores the result for
//! coherence, grammar, repetition and flow.

pub mod core;
pub mod schema;

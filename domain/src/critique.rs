//! Critique verdict parsing.
//!
//! The Marker agent replies with free text: either a list of problems or
//! the single acceptance word. This function extracts the accept/refine
//! decision from that free-form response. It is pure domain logic — no
//! I/O, no session management, just text pattern matching.
//!
//! Matching against free-form model output is inherently brittle, so the
//! comparison is normalized (whitespace trimmed, case folded) rather than
//! byte-exact. Anything that is not exactly the acceptance word — extra
//! sentences, partial matches, an empty reply — counts as a rejection and
//! sends the draft to the Refiner. Conservative: when ambiguous, refine.

/// The word the Marker must reply with, alone, to accept a draft as-is.
pub const ACCEPT_SENTINEL: &str = "PERFECT";

/// Decide whether a critique accepts the draft verbatim.
///
/// Returns `true` only when the critique, after trimming whitespace and
/// normalizing case, equals [`ACCEPT_SENTINEL`] exactly.
pub fn critique_accepts(critique: &str) -> bool {
    critique.trim().to_uppercase() == ACCEPT_SENTINEL
}

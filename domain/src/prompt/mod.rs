//! System prompt builders, one per stage.
//!
//! Pure, deterministic string rendering from typed input plus an injected
//! `today` date (never read from the system clock here, so rendered prompts
//! are reproducible in tests). Each builder embeds, verbatim, the output
//! JSON schema its stage parses: the prompt text and the parser are a
//! matched pair and must be changed together.

mod deep_dive;
mod discovery;
mod report;

pub use deep_dive::deep_dive_system_prompt;
pub use discovery::discovery_system_prompt;
pub use report::report_system_prompt;

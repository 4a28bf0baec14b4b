//! Domain models for AskYourStack.
//!
//! # Core Concepts
//!
//! ## Static Entities
//!
//! Built once at process start and never mutated:
//!
//! - [`DocumentationCategory`]: A named group of [`DocumentationSource`]s (Frameworks, Platforms, ...).
//! - [`DocumentationSource`]: One documentation site; its id doubles as the provider search filter key.
//! - [`Directive`]: A toggleable answer setting. Personalities are directives sharing an
//!   exclusive group, so at most one of them can be active per question.
//! - [`Database`]: A provider database holding the indexed documentation.
//!
//! ## Per-request Entities
//!
//! - [`AskBody`]: The question plus UI selections, validated on arrival.
//! - [`ProviderOptions`]: Rules and search configuration derived from an [`AskBody`].
//! - [`AnswerMessage`]: One element of the provider's answer stream.
//! - [`ProviderMessage`]: An [`AnswerMessage`] paired with the exact JSON it arrived as.

mod answer;
mod ask;
mod catalog;
mod docs;

pub use answer::*;
pub use ask::*;
pub use catalog::*;
pub use docs::*;

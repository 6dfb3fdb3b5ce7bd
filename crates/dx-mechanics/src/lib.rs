//! Exploding-dice check engine.
//!
//! A DX check rolls a pool of dice. Every face at or above the critical
//! threshold adds one die to a follow-up batch, and the cascade repeats until
//! a batch has no criticals or the round policy stops it. Each batch
//! contributes its highest face (or the die's maximum, if it held a critical);
//! the sum plus a modifier is the achieved value, unless the opening batch
//! was all ones, which is a fumble.
//!
//! ```
//! use dx_mechanics::{CheckRequest, EngineConfig, Renderer, ScriptedDice, perform_check};
//!
//! let request = CheckRequest::new(3, 8).with_modifier(2).with_target(15);
//! let mut dice = ScriptedDice::new([8, 3, 5, 4]);
//! let outcome = perform_check(&request, &EngineConfig::default(), &mut dice);
//!
//! assert_eq!(outcome.achieved_value(), Some(16));
//! assert_eq!(
//!     Renderer::default().render(&request, &outcome),
//!     "(3DX8+2>=15) > 10[3,5,8]+4[4]+2 > 16 > Success"
//! );
//! ```

pub mod cascade;
pub mod check;
pub mod config;
pub mod dice;
pub mod error;
pub mod outcome;
pub mod render;

pub use cascade::{Cascade, RerollPolicy, RoundCap};
pub use check::{CheckOutcome, CheckRequest, perform_check, perform_check_with};
pub use config::EngineConfig;
pub use dice::{DiceSource, Die, ScriptedDice, ValueBatch};
pub use error::{DxError, DxResult};
pub use outcome::{CheckResult, Comparison};
pub use render::Renderer;

//! `brain-behavior`: the behavior scheduling core.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                      |
//! |------------------|---------------------------------------------------------------|
//! | [`control`]      | `Status`, `BehaviorControl` trait (the node contract)         |
//! | [`context`]      | `BehaviorContext<'a, W>`: world, entity, tick, memory, rng   |
//! | [`timed`]        | `Behavior` hooks, `Timed<B>` node, `DurationRange`            |
//! | [`one_shot`]     | `Trigger`, `OneShot<T>`, `trigger_fn` / `sequence` / `sometimes` |
//! | [`gate`]         | `GateBehavior`, `OrderPolicy`, `RunningPolicy`                |
//! | [`trigger_gate`] | `TriggerGate`: stateless weighted trigger choice             |
//! | [`shuffling`]    | `ShufflingList`: weighted reorder without replacement        |
//! | [`retry`]        | `RetryPolicy`, `JitteredRetry`, `RetryMap`                    |
//! | [`ticker`]       | `IntervalTicker`, `UniformInterval`                           |
//! | [`noop`]         | `DoNothing`                                                   |
//! | [`error`]        | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Execution model
//!
//! Single-threaded and tick-driven.  The owning scheduler calls
//! `try_start` on stopped nodes and `tick_or_stop` on running ones, one
//! entity at a time; every call runs to completion.  A running node's state
//! lives in its own fields between ticks.  Composites forward to children
//! in their current order, which only changes when the composite restarts.
//!
//! Nothing here is an error at runtime: a node that cannot start answers
//! `false`, a node that cannot continue stops.

pub mod context;
pub mod control;
pub mod error;
pub mod gate;
pub mod noop;
pub mod one_shot;
pub mod retry;
pub mod shuffling;
pub mod ticker;
pub mod timed;
pub mod trigger_gate;


pub use context::BehaviorContext;
pub use control::{BehaviorControl, BoxedBehavior, Status};
pub use error::{BehaviorError, BehaviorResult};
pub use gate::{GateBehavior, OrderPolicy, RunningPolicy};
pub use noop::DoNothing;
pub use one_shot::{
    sequence, sometimes, trigger_fn, BoxedTrigger, FnTrigger, OneShot, Sequence, Sometimes, Trigger,
};
pub use retry::{JitteredRetry, RetryMap, RetryPolicy};
pub use shuffling::ShufflingList;
pub use ticker::{IntervalTicker, UniformInterval};
pub use timed::{Behavior, DurationRange, Timed};
pub use trigger_gate::TriggerGate;

//! Shared test utilities for tollgate-explorer integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Nothing here touches the network: relay traffic is
//! simulated with [`FakeRelay`].

#![allow(dead_code, unused_imports)]

pub mod assertions;
pub mod builders;
pub mod fake_relay;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fake_relay::*;
pub use fixtures::*;

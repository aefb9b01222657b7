// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - outbound collaborators.

pub mod tokeninfo;

pub use tokeninfo::{TokenInfo, TokenInfoClient, TokenInfoError};

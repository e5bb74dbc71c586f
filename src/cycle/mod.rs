//! Work cycles
//!
//! This module handles the cycle lifecycle, countdown derivation, form
//! validation and the periodic ticker.

pub mod countdown;
pub mod form;
pub mod ticker;
pub mod tracker;

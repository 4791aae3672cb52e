//! # Equipment Interface
//!
//! This module defines the interface structures read from equipment.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod seat;

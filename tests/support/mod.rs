#![allow(dead_code)]

pub mod builders;
pub mod factory;
pub mod harness;

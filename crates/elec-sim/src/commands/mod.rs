pub mod distribution;
pub mod leaders;
pub mod project;
pub mod simulate;

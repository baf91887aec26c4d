pub mod escape;
pub mod number;
pub mod split;

//! Pointer queries and the hover behaviour built on them.

pub mod hit_test;
pub mod mouseover;


pub use mouseover::MouseoverController;

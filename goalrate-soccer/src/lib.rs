pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod print;
pub mod table;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}

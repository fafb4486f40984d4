#![cfg_attr(not(feature = "std"), no_std)]

pub mod assets;
pub mod policy;

pub use assets::*;
pub use policy::*;

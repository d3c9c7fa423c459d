#![allow(dead_code)]

mod assertions;
mod workspace;

pub use assertions::*;
pub use workspace::TestWorkspace;

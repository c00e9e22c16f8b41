pub mod bindings;
pub mod node;
pub mod prop;
pub mod tree;

pub mod iters;
pub mod parse;
pub mod path;
pub mod subtree;

pub(crate) mod dir;

pub use bindings::*;
pub use node::*;
pub use prop::*;
pub use tree::*;

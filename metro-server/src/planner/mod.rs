//! Network queries.
//!
//! Every query reads an immutable [`Network`](crate::network::Network) and
//! allocates its own working state, so any number of queries can run
//! against the same network at once.

mod connectivity;
mod error;
mod narrate;
mod shortest_path;
mod spanning_tree;


pub use connectivity::{connected_components, is_connected};
pub use error::SolverError;
pub use narrate::{
    Instruction, Narration, NarrationError, NarrationWarning, narrate, narrate_with,
};
pub use shortest_path::{PathOutcome, Route, shortest_path, shortest_path_between};
pub use spanning_tree::{
    SpanningForest, SpanningTree, TreeEdge, minimum_spanning_forest, minimum_spanning_tree,
    minimum_spanning_tree_from,
};

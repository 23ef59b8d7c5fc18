/// Fixed-capacity possibility sets backed by bit vectors
pub mod bitset;
/// Turbo and timer-paced loops for driving a solver
pub mod driver;
/// Neighbor constraint propagation and consistency checks
pub mod propagation;
/// Entropy-ordered queue of cells awaiting propagation
pub mod queue;
/// Precomputed edge compatibility between possibilities
pub mod rules;
/// Cell selection and weighted collapse sampling
pub mod selection;
/// Run state machine and step loop
pub mod solver;

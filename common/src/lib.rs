pub mod shapes;

pub use shapes::{Boundary, Point};

pub mod partition;
pub mod path;
pub mod side;

pub mod middleware;

pub use middleware::{OWNER_HEADER, Owner};

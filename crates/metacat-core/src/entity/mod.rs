mod change_set;
mod header;
mod proxy;

pub use change_set::{PropertyChangeSet, TagChangeSet};
pub use header::EntityHeader;
pub use proxy::EndpointProxy;

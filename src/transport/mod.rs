pub mod connection;
pub mod connector;

pub use connection::Connection;
pub use connector::{Connector, FnConnector, connector_fn};

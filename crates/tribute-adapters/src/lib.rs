pub mod accounts;
pub mod config;
pub mod http;
pub mod memory;
pub mod runtime;
pub mod session_store;
pub mod tickets;

pub use accounts::AccountAdapter;
pub use config::{AdapterConfig, RuntimeProfile};
pub use http::ApiClient;
pub use memory::MemoryBackend;
pub use runtime::ServiceMode;
pub use session_store::SessionStoreAdapter;
pub use tickets::TicketServiceAdapter;

pub mod metoffice;
pub mod rtdb;
pub mod store;

pub use metoffice::MetOfficeClient;
pub use rtdb::RtdbClient;
pub use store::RingStore;

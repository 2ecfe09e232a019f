pub mod session;

pub use session::SessionStats;

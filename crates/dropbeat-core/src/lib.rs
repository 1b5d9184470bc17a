pub mod app;
pub mod clock;
pub mod ipc;

pub use app::*;
pub use clock::*;
pub use ipc::*;

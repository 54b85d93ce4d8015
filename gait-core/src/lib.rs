pub mod math;
pub mod spline;
pub mod part;
pub mod figure;
pub mod gait;
pub mod loader;
pub mod render;
pub mod scene;
pub mod clock;
pub mod config;
pub mod error;

pub use figure::Figure;
pub use part::Part;
pub use scene::Scene;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;

pub use app::index;

// Virgule reference server
// Adapts the router onto axum and renders views with {variable} interpolation

pub mod controllers;
pub mod host;
pub mod renderer;

pub use host::AxumHost;
pub use renderer::FileRenderer;

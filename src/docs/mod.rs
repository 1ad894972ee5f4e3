//! Documentation tree access: path resolution and document discovery

pub mod resolver;
pub mod scanner;

pub use scanner::DocResource;

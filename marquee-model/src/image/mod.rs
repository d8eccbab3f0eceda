pub mod data;
pub mod sizes;
pub mod url;

pub use data::*;
pub use sizes::*;
pub use url::*;

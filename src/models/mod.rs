pub mod user;
pub mod page;
pub mod language;
pub mod contribution;
pub mod stats;

pub use user::*;
pub use page::*;
pub use language::*;
pub use contribution::*;
pub use stats::*;

pub mod health;
pub use self::health::health;

pub mod passthrough;
pub use self::passthrough::passthrough;

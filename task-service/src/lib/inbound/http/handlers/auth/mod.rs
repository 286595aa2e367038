pub mod login;
pub mod refresh;
pub mod register;

pub use login::login;
pub use refresh::refresh;
pub use register::register;

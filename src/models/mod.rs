pub mod appointment;
pub mod booking;
pub mod contact;
pub mod doctor;
pub mod review;
pub mod user;

pub use appointment::*;
pub use booking::*;
pub use contact::*;
pub use doctor::*;
pub use review::*;
pub use user::*;

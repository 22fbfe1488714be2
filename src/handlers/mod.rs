pub mod appointments;
pub mod contact;
pub mod dev;
pub mod health;

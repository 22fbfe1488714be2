pub mod appointment;
pub mod contact;
pub mod user;

pub use appointment::{is_valid_time_slot, Appointment, AppointmentStatus, Category, TIME_SLOTS};
pub use contact::ContactMessage;
pub use user::{Role, User};

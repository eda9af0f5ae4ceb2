pub mod appointments;
pub mod availability;
pub mod slots;

pub use appointments::AppointmentStore;
pub use availability::AvailabilityStore;
pub use slots::SlotService;

mod activity;
mod inventory;
mod messages;
mod notifications;
mod office;
mod schedule;

pub use activity::ActivityRepository;
pub use inventory::InventoryRepository;
pub use messages::MessageRepository;
pub use notifications::NotificationDispatcher;
pub use office::OfficeRepository;
pub use schedule::ScheduleRepository;

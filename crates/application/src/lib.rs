//! Application services and ports.

#![forbid(unsafe_code)]

mod analytics_service;
mod assignment_service;
mod config;
mod inventory_service;
mod join_codes;
mod message_service;
mod office_locks;
mod office_ports;
mod office_service;

#[cfg(test)]
mod test_support;

pub use analytics_service::AnalyticsService;
pub use assignment_service::AssignmentService;
pub use config::{CoordinatorConfig, DEFAULT_JOIN_CODE_MAX_ATTEMPTS};
pub use inventory_service::{InventoryService, StockUpdate};
pub use join_codes::{JoinCodeGenerator, RandomJoinCodeGenerator};
pub use message_service::MessageService;
pub use office_locks::OfficeLocks;
pub use office_ports::{
    ActivityRepository, InventoryRepository, MessageRepository, NotificationDispatcher,
    OfficeRepository, ScheduleRepository,
};
pub use office_service::OfficeService;

//! Officeline console walkthrough.
//!
//! Creates a demo office in memory, exercises every service once and
//! prints the resulting analytics snapshot as JSON.

#![forbid(unsafe_code)]

use std::env;
use std::sync::Arc;

use chrono::{Duration, NaiveTime, Utc};
use officeline_application::{
    AnalyticsService, AssignmentService, CoordinatorConfig, DEFAULT_JOIN_CODE_MAX_ATTEMPTS,
    InventoryService, MessageService, OfficeLocks, OfficeService, RandomJoinCodeGenerator,
};
use officeline_core::{AppError, AppResult};
use officeline_domain::{
    Assignment, MessageFilter, MessageKind, NewInventoryItem, NewMessage, NewShift, NewTask,
    OverstockRatio, Permission, Priority, RoleName, TaskStatus,
};
use officeline_infrastructure::{InMemoryOfficeStore, TracingNotificationDispatcher};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct ConsoleConfig {
    coordinator: CoordinatorConfig,
    demo_office_name: String,
    demo_creator_name: String,
}

struct Services {
    offices: OfficeService,
    assignments: AssignmentService,
    inventory: InventoryService,
    messages: MessageService,
    analytics: AnalyticsService,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ConsoleConfig::load()?;
    info!(
        join_code_max_attempts = config.coordinator.join_code_max_attempts,
        overstock_ratio_percent = config.coordinator.overstock_ratio.percent(),
        "officeline-console started"
    );

    let services = build_services(config.coordinator);
    run_walkthrough(&services, &config).await
}

fn build_services(config: CoordinatorConfig) -> Services {
    let store = Arc::new(InMemoryOfficeStore::new());
    let notifications = Arc::new(TracingNotificationDispatcher::new());
    let locks = OfficeLocks::new();

    Services {
        offices: OfficeService::new(
            store.clone(),
            store.clone(),
            Arc::new(RandomJoinCodeGenerator::new()),
            locks.clone(),
            config,
        ),
        assignments: AssignmentService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            locks.clone(),
        ),
        inventory: InventoryService::new(
            store.clone(),
            store.clone(),
            notifications.clone(),
            locks.clone(),
            config,
        ),
        messages: MessageService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            notifications,
            locks,
        ),
        analytics: AnalyticsService::new(store.clone(), store.clone(), store, config),
    }
}

async fn run_walkthrough(services: &Services, config: &ConsoleConfig) -> AppResult<()> {
    let (office, creator) = services
        .offices
        .create_office(
            config.demo_office_name.as_str(),
            config.demo_creator_name.as_str(),
            Some("Demo office created by the console walkthrough".to_owned()),
        )
        .await?;
    let founder = creator.identity();

    let sam = services
        .offices
        .join_office(office.join_code().as_str(), "Sam")
        .await?;
    let ana = services
        .offices
        .join_office(office.join_code().as_str(), "Ana")
        .await?;
    services
        .offices
        .define_role(
            &founder,
            "Inventory Specialist",
            [Permission::ViewTasks, Permission::ManageInventory],
            Some("#F59E0B".to_owned()),
        )
        .await?;
    let ana = services
        .offices
        .change_member_role(&founder, ana.id(), "Inventory Specialist")
        .await?;

    let today = Utc::now().date_naive();
    let opening = time_of_day(8, 0)?;
    let closing = time_of_day(16, 0)?;
    services
        .assignments
        .create_shift(
            &founder,
            NewShift {
                title: "Morning Shift".to_owned(),
                date: today,
                start_time: opening,
                end_time: closing,
                location: None,
                notes: Some("Open the front desk".to_owned()),
                assignment: Some(Assignment::to_role(RoleName::all_staff())),
            },
        )
        .await?;

    let count_task = services
        .assignments
        .create_task(
            &founder,
            NewTask {
                title: "Monthly inventory count".to_owned(),
                description: "Count every shelf in the supply room".to_owned(),
                deadline: today + Duration::days(3),
                priority: Priority::High,
                category: Some("Inventory".to_owned()),
                assignment: Some(Assignment::to_members([ana.id()])?),
            },
        )
        .await?;
    services
        .assignments
        .create_task(
            &founder,
            NewTask {
                title: "Tidy the break room".to_owned(),
                description: String::new(),
                deadline: today - Duration::days(1),
                priority: Priority::Low,
                category: None,
                assignment: Some(Assignment::to_role(RoleName::employee())),
            },
        )
        .await?;
    services
        .assignments
        .update_task_status(&ana.identity(), count_task.id(), TaskStatus::InProgress)
        .await?;

    let paper = services
        .inventory
        .add_item(
            &founder,
            NewInventoryItem {
                name: "Printer Paper".to_owned(),
                category: "Office Supplies".to_owned(),
                current_stock: 12,
                min_stock: 5,
                max_stock: 20,
                unit: "reams".to_owned(),
                supplier: Some("Paper Co".to_owned()),
                location: Some("Supply Room".to_owned()),
                sku: Some("PP-001".to_owned()),
                cost_cents: 450,
            },
        )
        .await?;
    let update = services
        .inventory
        .adjust_stock(&ana.identity(), paper.id(), -9)
        .await?;
    info!(
        item = %update.item.name(),
        status = update.adjustment.status.as_str(),
        alerted = update.alert.is_some(),
        "walkthrough stock adjusted"
    );

    services
        .messages
        .post_message(
            &founder,
            NewMessage {
                title: "Inventory Count Reminder".to_owned(),
                body: "Monthly count starts Friday.".to_owned(),
                priority: Priority::Medium,
                kind: MessageKind::Announcement,
                target_role: Some(RoleName::employee().as_str().to_owned()),
            },
        )
        .await?;
    let inbox = services
        .messages
        .list_visible(&sam.identity(), &MessageFilter::default())
        .await?;
    info!(
        member = %sam.name(),
        visible = inbox.len(),
        unread = services.messages.unread_count(&sam.identity()).await?,
        "walkthrough inbox"
    );

    let snapshot = services.analytics.summarize(office.id()).await?;
    let rendered = serde_json::to_string_pretty(&snapshot)
        .map_err(|error| AppError::Internal(format!("failed to render snapshot: {error}")))?;

    println!("office {} (join code {})", office.name(), office.join_code());
    for member in services.offices.list_members(office.id()).await? {
        println!(
            "  {} {} [{}]",
            member.employee_number(),
            member.name(),
            member.role()
        );
    }
    println!("{rendered}");

    for event in services.offices.recent_activity(office.id(), 5).await? {
        info!(
            action = event.action.as_str(),
            resource_type = %event.resource_type,
            detail = event.detail.as_deref().unwrap_or_default(),
            "recent activity"
        );
    }

    Ok(())
}

fn time_of_day(hour: u32, minute: u32) -> AppResult<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| AppError::Validation(format!("invalid time of day {hour:02}:{minute:02}")))
}

impl ConsoleConfig {
    fn load() -> AppResult<Self> {
        let join_code_max_attempts = parse_env_u8(
            "OFFICELINE_JOIN_CODE_MAX_ATTEMPTS",
            DEFAULT_JOIN_CODE_MAX_ATTEMPTS,
        )?;
        let overstock_ratio_percent = parse_env_u8(
            "OFFICELINE_OVERSTOCK_RATIO_PERCENT",
            OverstockRatio::default().percent(),
        )?;

        let coordinator = CoordinatorConfig::new(join_code_max_attempts, overstock_ratio_percent)
            .map_err(|error| {
                AppError::Validation(format!(
                    "invalid OFFICELINE_JOIN_CODE_MAX_ATTEMPTS or OFFICELINE_OVERSTOCK_RATIO_PERCENT: {error}"
                ))
            })?;

        Ok(Self {
            coordinator,
            demo_office_name: optional_env("OFFICELINE_DEMO_OFFICE_NAME", "Acme"),
            demo_creator_name: optional_env("OFFICELINE_DEMO_CREATOR_NAME", "Jo"),
        })
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn optional_env(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

fn parse_env_u8(name: &str, default: u8) -> AppResult<u8> {
    match env::var(name) {
        Ok(value) => value.trim().parse::<u8>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}

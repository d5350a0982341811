use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use officeline_application::{
    AnalyticsService, AssignmentService, CoordinatorConfig, InventoryService, MessageService,
    OfficeLocks, OfficeRepository, OfficeService, RandomJoinCodeGenerator,
};
use officeline_core::AppError;
use officeline_domain::{
    Assignment, EmployeeNumber, JOIN_CODE_ALPHABET, JoinCode, Member, MessageFilter, MessageKind,
    NewInventoryItem, NewMessage, NewTask, Office, Permission, Priority, RoleDefinition, RoleName,
    StockStatus,
};

use super::InMemoryOfficeStore;
use crate::TracingNotificationDispatcher;

fn office(code: &str) -> (Office, Member) {
    let office = Office::new(
        "Acme",
        None,
        JoinCode::parse(code).unwrap_or_else(|_| unreachable!()),
        Utc::now(),
    )
    .unwrap_or_else(|_| unreachable!());
    let creator =
        Member::creator(office.id(), "Jo", Utc::now()).unwrap_or_else(|_| unreachable!());
    (office, creator)
}

fn joiner(office: &Office, name: &str, existing: usize) -> Member {
    Member::joiner(
        office.id(),
        name,
        EmployeeNumber::after_member_count(existing).unwrap_or_else(|_| unreachable!()),
        Utc::now(),
    )
    .unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn duplicate_join_code_is_a_conflict_and_stores_nothing() {
    let store = InMemoryOfficeStore::new();
    let (first, first_creator) = office("ABC123");
    let (second, second_creator) = office("ABC123");

    let created = store
        .create_office(first, first_creator, RoleDefinition::defaults())
        .await;
    assert!(created.is_ok());

    let duplicate = store
        .create_office(second.clone(), second_creator, RoleDefinition::defaults())
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    assert!(store.find_office(second.id()).await.ok().flatten().is_none());
    assert_eq!(store.count_members(second.id()).await.ok(), Some(0));
    assert!(store.list_roles(second.id()).await.ok().is_some_and(|roles| roles.is_empty()));
}

#[tokio::test]
async fn employee_numbers_and_creators_are_unique_per_office() {
    let store = InMemoryOfficeStore::new();
    let (office, creator) = office("ABC123");
    store
        .create_office(office.clone(), creator, RoleDefinition::defaults())
        .await
        .unwrap_or_else(|_| unreachable!());

    let sam = joiner(&office, "Sam", 1);
    assert!(store.insert_member(sam).await.is_ok());

    let clash = joiner(&office, "Ana", 1);
    assert!(matches!(
        store.insert_member(clash).await,
        Err(AppError::Conflict(_))
    ));

    let second_creator =
        Member::creator(office.id(), "Lee", Utc::now()).unwrap_or_else(|_| unreachable!());
    assert!(matches!(
        store.insert_member(second_creator).await,
        Err(AppError::Conflict(_))
    ));
}

#[tokio::test]
async fn members_are_isolated_by_office() {
    let store = InMemoryOfficeStore::new();
    let (north, north_creator) = office("NORTH1");
    let (south, south_creator) = office("SOUTH1");
    store
        .create_office(north.clone(), north_creator.clone(), RoleDefinition::defaults())
        .await
        .unwrap_or_else(|_| unreachable!());
    store
        .create_office(south.clone(), south_creator, RoleDefinition::defaults())
        .await
        .unwrap_or_else(|_| unreachable!());

    let north_members = store
        .list_members(north.id())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(north_members, vec![north_creator.clone()]);

    let cross_office = store
        .find_member(south.id(), north_creator.id())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(cross_office.is_none());

    let (unregistered, _) = office("GHOST1");
    let orphan = joiner(&unregistered, "Sam", 1);
    assert!(matches!(
        store.insert_member(orphan).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn roles_are_listed_by_name_and_unique() {
    let store = InMemoryOfficeStore::new();
    let (office, creator) = office("ABC123");
    store
        .create_office(office.clone(), creator, RoleDefinition::defaults())
        .await
        .unwrap_or_else(|_| unreachable!());

    let names: Vec<String> = store
        .list_roles(office.id())
        .await
        .unwrap_or_else(|_| unreachable!())
        .iter()
        .map(|role| role.name().as_str().to_owned())
        .collect();
    assert_eq!(names, vec!["Creator", "Employee", "Head Manager"]);

    let duplicate = RoleDefinition::custom("Employee", [Permission::ViewTasks], None)
        .unwrap_or_else(|_| unreachable!());
    assert!(matches!(
        store.insert_role(office.id(), duplicate).await,
        Err(AppError::Conflict(_))
    ));
}

struct Services {
    offices: OfficeService,
    assignments: AssignmentService,
    inventory: InventoryService,
    messages: MessageService,
    analytics: AnalyticsService,
}

fn services() -> Services {
    let store = Arc::new(InMemoryOfficeStore::new());
    let notifications = Arc::new(TracingNotificationDispatcher::new());
    let locks = OfficeLocks::new();
    let config = CoordinatorConfig::default();

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

#[tokio::test]
async fn office_walkthrough_end_to_end() {
    let services = services();

    let (office, jo) = services
        .offices
        .create_office("Acme", "Jo", None)
        .await
        .unwrap_or_else(|_| unreachable!());
    let code = office.join_code().as_str().to_owned();
    assert_eq!(code.len(), 6);
    assert!(code.bytes().all(|byte| JOIN_CODE_ALPHABET.contains(&byte)));
    assert_eq!(jo.employee_number().to_string(), "#00001");

    let sam = services
        .offices
        .join_office(&code.to_lowercase(), "Sam")
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(sam.employee_number().to_string(), "#00002");
    assert_eq!(sam.role(), &RoleName::employee());

    let task = services
        .assignments
        .create_task(
            &jo.identity(),
            NewTask {
                title: "Restock printer paper".to_owned(),
                description: String::new(),
                deadline: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap_or_else(|| unreachable!()),
                priority: Priority::Medium,
                category: None,
                assignment: Some(Assignment::to_role(RoleName::employee())),
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    let assignees = services
        .assignments
        .task_assignees(office.id(), task.id())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(assignees, vec![sam.clone()]);

    let paper = services
        .inventory
        .add_item(
            &jo.identity(),
            NewInventoryItem {
                name: "Printer Paper".to_owned(),
                category: "Office Supplies".to_owned(),
                current_stock: 2,
                min_stock: 5,
                max_stock: 20,
                unit: "reams".to_owned(),
                supplier: None,
                location: None,
                sku: None,
                cost_cents: 450,
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(services.inventory.classify(&paper), StockStatus::Low);

    services
        .offices
        .define_role(&jo.identity(), "Manager", [Permission::ManageTasks], None)
        .await
        .unwrap_or_else(|_| unreachable!());
    let ana = services
        .offices
        .join_office(&code, "Ana")
        .await
        .unwrap_or_else(|_| unreachable!());
    let ana = services
        .offices
        .change_member_role(&jo.identity(), ana.id(), "Manager")
        .await
        .unwrap_or_else(|_| unreachable!());

    let message = services
        .messages
        .post_message(
            &jo.identity(),
            NewMessage {
                title: "Inventory Count Reminder".to_owned(),
                body: "Monthly count starts Friday.".to_owned(),
                priority: Priority::Medium,
                kind: MessageKind::Announcement,
                target_role: Some("Employee".to_owned()),
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(services.messages.is_visible_to(&message, &sam));
    assert!(!services.messages.is_visible_to(&message, &ana));
    assert!(services.messages.is_visible_to(&message, &jo));

    let for_ana = services
        .messages
        .list_visible(&ana.identity(), &MessageFilter::default())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(for_ana.is_empty());

    let snapshot = services
        .analytics
        .summarize_as_of(
            office.id(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap_or_else(|| unreachable!()),
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(snapshot.total_staff, 3);
    assert_eq!(snapshot.total_tasks, 1);
    assert_eq!(snapshot.overdue_tasks, 0);
    assert_eq!(snapshot.low_stock_count, 1);
    assert_eq!(snapshot.inventory_value_cents, 900);
}

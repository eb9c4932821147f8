//! Reservation pipeline integration tests against a throwaway RocksDB store.

use chrono::NaiveDateTime;
use tavern_server::core::{Config, ServerState};
use tavern_server::db::models::{DiningTableCreate, ReservationCreate, UserCreate};
use tavern_server::db::repository::{DiningTableRepository, UserRepository};
use tavern_server::{AppError, ErrorCode};
use tempfile::TempDir;

async fn test_state() -> (ServerState, TempDir) {
    let tmp = TempDir::new().expect("temp dir");
    let config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
    let state = ServerState::initialize(&config).await.expect("state init");
    (state, tmp)
}

async fn seed_table(state: &ServerState, name: &str) -> String {
    let repo = DiningTableRepository::new(state.get_db());
    let table = repo
        .create(DiningTableCreate {
            name: name.to_string(),
            capacity: Some(4),
        })
        .await
        .expect("create table");
    table.id.expect("table id").to_string()
}

async fn seed_user(state: &ServerState, email: &str) -> String {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .create(UserCreate {
            email: email.to_string(),
            password: "longenough".to_string(),
            role: None,
        })
        .await
        .expect("create user");
    user.id.expect("user id").to_string()
}

/// Tomorrow at the given hour/minute — always passes the advance-notice rule
fn tomorrow_at(hour: u32, minute: u32) -> NaiveDateTime {
    chrono::Local::now()
        .date_naive()
        .succ_opt()
        .expect("tomorrow")
        .and_hms_opt(hour, minute, 0)
        .expect("valid time")
}

fn guest_booking(table_id: &str, email: &str, at: NaiveDateTime) -> ReservationCreate {
    ReservationCreate {
        table_id: table_id.to_string(),
        reservation_time: at,
        number_of_guests: 2,
        user_id: None,
        guest_name: "Ada Lovelace".to_string(),
        guest_email: Some(email.to_string()),
        guest_phone: Some("+34600123456".to_string()),
    }
}

fn code_of(err: AppError) -> ErrorCode {
    err.code
}

#[tokio::test]
async fn create_accepts_valid_booking() {
    let (state, _tmp) = test_state().await;
    let table = seed_table(&state, "T1").await;

    let created = state
        .reservation_service
        .create(guest_booking(&table, "ada@example.com", tomorrow_at(19, 0)))
        .await
        .expect("booking accepted");

    assert!(!created.deleted);
    assert_eq!(created.number_of_guests, 2);
    assert!(created.id.is_some());
}

#[tokio::test]
async fn create_rejects_same_day_booking() {
    let (state, _tmp) = test_state().await;
    let table = seed_table(&state, "T1").await;

    let today_noon = chrono::Local::now()
        .date_naive()
        .and_hms_opt(12, 0, 0)
        .expect("valid time");

    let err = state
        .reservation_service
        .create(guest_booking(&table, "ada@example.com", today_noon))
        .await
        .expect_err("same-day booking must be rejected");
    assert_eq!(code_of(err), ErrorCode::ReservationTooSoon);
}

#[tokio::test]
async fn create_rejects_window_past_closing() {
    let (state, _tmp) = test_state().await;
    let table = seed_table(&state, "T1").await;

    // 20:00 + 2h service + 30m buffer = 22:30, past the 22:00 closing
    let err = state
        .reservation_service
        .create(guest_booking(&table, "ada@example.com", tomorrow_at(20, 0)))
        .await
        .expect_err("booking past closing must be rejected");
    assert_eq!(code_of(err), ErrorCode::OutsideBusinessHours);

    // 19:00 + 2h30m = 21:30 fits
    state
        .reservation_service
        .create(guest_booking(&table, "ada@example.com", tomorrow_at(19, 0)))
        .await
        .expect("19:00 booking fits the service window");
}

#[tokio::test]
async fn table_window_overlap_is_conflict() {
    let (state, _tmp) = test_state().await;
    let table = seed_table(&state, "T1").await;

    state
        .reservation_service
        .create(guest_booking(&table, "first@example.com", tomorrow_at(12, 0)))
        .await
        .expect("first booking");

    // 13:00 is inside the ±2h30m window around 12:00
    let err = state
        .reservation_service
        .create(guest_booking(&table, "second@example.com", tomorrow_at(13, 0)))
        .await
        .expect_err("overlapping table booking must be rejected");
    assert_eq!(code_of(err), ErrorCode::TableAlreadyReserved);

    // 15:00 is past the window (12:00 + 2h30m = 14:30)
    state
        .reservation_service
        .create(guest_booking(&table, "third@example.com", tomorrow_at(15, 0)))
        .await
        .expect("non-overlapping booking accepted");
}

#[tokio::test]
async fn other_table_same_time_is_free() {
    let (state, _tmp) = test_state().await;
    let table_a = seed_table(&state, "A").await;
    let table_b = seed_table(&state, "B").await;

    state
        .reservation_service
        .create(guest_booking(&table_a, "ada@example.com", tomorrow_at(12, 0)))
        .await
        .expect("first booking");

    state
        .reservation_service
        .create(guest_booking(&table_b, "bob@example.com", tomorrow_at(12, 0)))
        .await
        .expect("same slot on another table is free");
}

#[tokio::test]
async fn user_cannot_double_book_same_instant() {
    let (state, _tmp) = test_state().await;
    let table_a = seed_table(&state, "A").await;
    let table_b = seed_table(&state, "B").await;
    let user = seed_user(&state, "ada@example.com").await;

    let mut booking = guest_booking(&table_a, "ada@example.com", tomorrow_at(12, 0));
    booking.user_id = Some(user.clone());
    state
        .reservation_service
        .create(booking)
        .await
        .expect("first booking");

    let mut second = guest_booking(&table_b, "ada@example.com", tomorrow_at(12, 0));
    second.user_id = Some(user.clone());
    let err = state
        .reservation_service
        .create(second)
        .await
        .expect_err("user double booking must be rejected");
    assert_eq!(code_of(err), ErrorCode::UserDoubleBooked);

    // A different instant is fine
    let mut third = guest_booking(&table_b, "ada@example.com", tomorrow_at(16, 0));
    third.user_id = Some(user);
    state
        .reservation_service
        .create(third)
        .await
        .expect("same user, different time");
}

#[tokio::test]
async fn guest_email_cannot_double_book_same_instant() {
    let (state, _tmp) = test_state().await;
    let table_a = seed_table(&state, "A").await;
    let table_b = seed_table(&state, "B").await;

    state
        .reservation_service
        .create(guest_booking(&table_a, "ada@example.com", tomorrow_at(12, 0)))
        .await
        .expect("first booking");

    let err = state
        .reservation_service
        .create(guest_booking(&table_b, "ada@example.com", tomorrow_at(12, 0)))
        .await
        .expect_err("guest double booking must be rejected");
    assert_eq!(code_of(err), ErrorCode::GuestDoubleBooked);
}

#[tokio::test]
async fn update_excludes_own_reservation_from_conflicts() {
    let (state, _tmp) = test_state().await;
    let table = seed_table(&state, "T1").await;

    let created = state
        .reservation_service
        .create(guest_booking(&table, "ada@example.com", tomorrow_at(12, 0)))
        .await
        .expect("booking");
    let id = created.id.expect("id").to_string();

    // Re-submitting the same slot must not conflict with itself
    let mut dto = guest_booking(&table, "ada@example.com", tomorrow_at(12, 0));
    dto.number_of_guests = 4;
    let updated = state
        .reservation_service
        .update(&id, dto)
        .await
        .expect("self-overlapping update accepted");
    assert_eq!(updated.number_of_guests, 4);
}

#[tokio::test]
async fn update_still_checks_conflicts_with_others() {
    let (state, _tmp) = test_state().await;
    let table = seed_table(&state, "T1").await;

    state
        .reservation_service
        .create(guest_booking(&table, "first@example.com", tomorrow_at(12, 0)))
        .await
        .expect("first booking");
    let second = state
        .reservation_service
        .create(guest_booking(&table, "second@example.com", tomorrow_at(16, 0)))
        .await
        .expect("second booking");
    let second_id = second.id.expect("id").to_string();

    // Moving the 16:00 booking onto the 12:00 window must fail
    let err = state
        .reservation_service
        .update(
            &second_id,
            guest_booking(&table, "second@example.com", tomorrow_at(13, 0)),
        )
        .await
        .expect_err("update into another booking's window must be rejected");
    assert_eq!(code_of(err), ErrorCode::TableAlreadyReserved);
}

#[tokio::test]
async fn cancelled_reservation_frees_the_slot() {
    let (state, _tmp) = test_state().await;
    let table = seed_table(&state, "T1").await;

    let created = state
        .reservation_service
        .create(guest_booking(&table, "ada@example.com", tomorrow_at(12, 0)))
        .await
        .expect("booking");
    let id = created.id.expect("id").to_string();

    let cancelled = state
        .reservation_service
        .cancel(&id)
        .await
        .expect("cancel succeeds");
    assert!(cancelled.deleted);

    // The audit record survives but the slot is bookable again
    state
        .reservation_service
        .create(guest_booking(&table, "bob@example.com", tomorrow_at(12, 0)))
        .await
        .expect("slot freed after cancellation");

    let all = state
        .reservation_service
        .list_including_deleted()
        .await
        .expect("list all");
    assert_eq!(all.len(), 2);
    let active = state.reservation_service.list().await.expect("list active");
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn booking_requires_user_or_guest_email() {
    let (state, _tmp) = test_state().await;
    let table = seed_table(&state, "T1").await;

    let mut dto = guest_booking(&table, "ada@example.com", tomorrow_at(12, 0));
    dto.guest_email = None;
    dto.user_id = None;

    let err = state
        .reservation_service
        .create(dto)
        .await
        .expect_err("anonymous booking must be rejected");
    assert_eq!(code_of(err), ErrorCode::GuestContactRequired);
}

#[tokio::test]
async fn booking_unknown_table_is_not_found() {
    let (state, _tmp) = test_state().await;

    let err = state
        .reservation_service
        .create(guest_booking(
            "dining_table:missing",
            "ada@example.com",
            tomorrow_at(12, 0),
        ))
        .await
        .expect_err("unknown table must be rejected");
    assert_eq!(code_of(err), ErrorCode::TableNotFound);
}

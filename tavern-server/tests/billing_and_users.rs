//! Billing bookkeeping and user-deletion cascade, against a throwaway store.

use chrono::NaiveDateTime;
use rust_decimal::dec;
use tavern_server::core::{Config, ServerState};
use tavern_server::db::models::{
    BillCreate, BillUpdate, DiningTableCreate, ReservationCreate, UserCreate,
};
use tavern_server::db::repository::{
    BillRepository, DiningTableRepository, RepoError, TransactionRepository, UserRepository,
};
use tempfile::TempDir;

async fn test_state() -> (ServerState, TempDir) {
    let tmp = TempDir::new().expect("temp dir");
    let config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
    let state = ServerState::initialize(&config).await.expect("state init");
    (state, tmp)
}

fn tomorrow_at(hour: u32) -> NaiveDateTime {
    chrono::Local::now()
        .date_naive()
        .succ_opt()
        .expect("tomorrow")
        .and_hms_opt(hour, 0, 0)
        .expect("valid time")
}

async fn seed_reservation(state: &ServerState, email: &str, user_id: Option<String>) -> String {
    let table = DiningTableRepository::new(state.get_db())
        .create(DiningTableCreate {
            name: format!("table-for-{email}"),
            capacity: Some(4),
        })
        .await
        .expect("create table");

    let reservation = state
        .reservation_service
        .create(ReservationCreate {
            table_id: table.id.expect("table id").to_string(),
            reservation_time: tomorrow_at(12),
            number_of_guests: 2,
            user_id,
            guest_name: "Ada Lovelace".to_string(),
            guest_email: Some(email.to_string()),
            guest_phone: None,
        })
        .await
        .expect("create reservation");
    reservation.id.expect("reservation id").to_string()
}

#[tokio::test]
async fn bill_final_amount_is_derived() {
    let (state, _tmp) = test_state().await;
    let reservation_id = seed_reservation(&state, "ada@example.com", None).await;

    let bills = BillRepository::new(state.get_db());
    let reservation_thing = reservation_id.parse().expect("record id");

    let bill = bills
        .create(
            BillCreate {
                reservation_id: reservation_id.clone(),
                total_amount: dec!(100.00),
                tax: dec!(21.00),
                discount: dec!(10.00),
            },
            reservation_thing,
        )
        .await
        .expect("create bill");

    assert_eq!(bill.final_amount, dec!(111.00));

    // Amounts update recomputes the payable amount
    let updated = bills
        .update(
            &bill.id.expect("bill id").to_string(),
            BillUpdate {
                total_amount: Some(dec!(50.00)),
                tax: None,
                discount: None,
            },
        )
        .await
        .expect("update bill");
    assert_eq!(updated.final_amount, dec!(61.00));
}

#[tokio::test]
async fn second_bill_for_reservation_is_rejected() {
    let (state, _tmp) = test_state().await;
    let reservation_id = seed_reservation(&state, "ada@example.com", None).await;

    let bills = BillRepository::new(state.get_db());
    let reservation_thing: surrealdb::RecordId = reservation_id.parse().expect("record id");

    let payload = BillCreate {
        reservation_id: reservation_id.clone(),
        total_amount: dec!(40.00),
        tax: dec!(4.00),
        discount: dec!(0.00),
    };

    bills
        .create(payload.clone(), reservation_thing.clone())
        .await
        .expect("first bill");

    let err = bills
        .create(payload, reservation_thing)
        .await
        .expect_err("second bill must be rejected");
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn bill_with_payments_cannot_be_deleted() {
    let (state, _tmp) = test_state().await;
    let reservation_id = seed_reservation(&state, "ada@example.com", None).await;

    let bills = BillRepository::new(state.get_db());
    let transactions = TransactionRepository::new(state.get_db());
    let reservation_thing = reservation_id.parse().expect("record id");

    let bill = bills
        .create(
            BillCreate {
                reservation_id,
                total_amount: dec!(40.00),
                tax: dec!(0.00),
                discount: dec!(0.00),
            },
            reservation_thing,
        )
        .await
        .expect("create bill");
    let bill_thing = bill.id.expect("bill id");

    transactions
        .create(
            bill_thing.clone(),
            dec!(40.00),
            tavern_server::db::models::PaymentMethod::Card,
        )
        .await
        .expect("record payment");

    assert!(
        transactions
            .exists_for_bill(&bill_thing)
            .await
            .expect("guard query")
    );
}

#[tokio::test]
async fn deleting_user_soft_deletes_and_detaches_reservations() {
    let (state, _tmp) = test_state().await;

    let users = UserRepository::new(state.get_db());
    let user = users
        .create(UserCreate {
            email: "ada@example.com".to_string(),
            password: "longenough".to_string(),
            role: None,
        })
        .await
        .expect("create user");
    let user_id = user.id.expect("user id").to_string();

    let reservation_id =
        seed_reservation(&state, "ada@example.com", Some(user_id.clone())).await;

    // Cascade: detach + soft-delete reservations, then drop the user record
    let user_thing = UserRepository::record_id(&user_id).expect("record id");
    let detached = state
        .reservation_service
        .detach_for_user(&user_thing)
        .await
        .expect("cascade");
    assert_eq!(detached, 1);
    users.delete(&user_id).await.expect("delete user");

    let reservation = state
        .reservation_service
        .get(&reservation_id)
        .await
        .expect("reservation still addressable");
    assert!(reservation.deleted);
    assert!(reservation.user.is_none());

    // Gone from the active listing, present in the audit listing
    assert!(
        state
            .reservation_service
            .list()
            .await
            .expect("active list")
            .is_empty()
    );
    assert_eq!(
        state
            .reservation_service
            .list_including_deleted()
            .await
            .expect("audit list")
            .len(),
        1
    );
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let (state, _tmp) = test_state().await;
    let users = UserRepository::new(state.get_db());

    users
        .create(UserCreate {
            email: "ada@example.com".to_string(),
            password: "longenough".to_string(),
            role: None,
        })
        .await
        .expect("first user");

    let err = users
        .create(UserCreate {
            email: "ada@example.com".to_string(),
            password: "otherpassword".to_string(),
            role: None,
        })
        .await
        .expect_err("duplicate email must be rejected");
    assert!(matches!(err, RepoError::Duplicate(_)));
}

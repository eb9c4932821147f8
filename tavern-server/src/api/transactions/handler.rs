//! Transaction API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;

use crate::AppError;
use crate::core::ServerState;
use crate::db::models::{BillUpdate, Transaction, TransactionCreate};
use crate::db::repository::{BillRepository, TransactionRepository};
use crate::utils::AppResult;
use crate::utils::validation::validate_dto;
use shared::ErrorCode;

/// GET /api/transactions - 获取所有交易
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Transaction>>> {
    let repo = TransactionRepository::new(state.get_db());
    let transactions = repo.find_all().await?;
    Ok(Json(transactions))
}

/// GET /api/transactions/:id - 获取单笔交易
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Transaction>> {
    let repo = TransactionRepository::new(state.get_db());
    let transaction = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TransactionNotFound).with_detail("id", id))?;
    Ok(Json(transaction))
}

/// GET /api/transactions/by-bill/:bill_id - 账单下的全部交易
pub async fn list_by_bill(
    State(state): State<ServerState>,
    Path(bill_id): Path<String>,
) -> AppResult<Json<Vec<Transaction>>> {
    let bill_thing = BillRepository::record_id(&bill_id)?;
    let repo = TransactionRepository::new(state.get_db());
    let transactions = repo.find_by_bill(&bill_thing).await?;
    Ok(Json(transactions))
}

/// POST /api/transactions - 记录一笔支付
///
/// 支付金额必须为正且不超过账单当前应付金额；
/// 创建成功后账单余额按 total + tax - discount 重新计算入库。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TransactionCreate>,
) -> AppResult<Json<Transaction>> {
    validate_dto(&payload)?;

    if payload.amount <= Decimal::ZERO {
        return Err(AppError::with_message(
            ErrorCode::InvalidAmount,
            "Amount must be positive",
        ));
    }

    let bills = BillRepository::new(state.get_db());
    let bill = bills.find_by_id(&payload.bill_id).await?.ok_or_else(|| {
        AppError::new(ErrorCode::BillNotFound).with_detail("id", payload.bill_id.clone())
    })?;

    tracing::debug!(
        bill = %payload.bill_id,
        available = %bill.final_amount,
        required = %payload.amount,
        "Checking bill funds"
    );

    if bill.final_amount < payload.amount {
        tracing::warn!(
            bill = %payload.bill_id,
            available = %bill.final_amount,
            required = %payload.amount,
            "Insufficient funds"
        );
        return Err(AppError::new(ErrorCode::InsufficientFunds)
            .with_detail("available", bill.final_amount.to_string())
            .with_detail("required", payload.amount.to_string()));
    }

    // Re-derive and persist the bill's final amount alongside the payment
    bills
        .update(
            &payload.bill_id,
            BillUpdate {
                total_amount: None,
                tax: None,
                discount: None,
            },
        )
        .await?;

    let bill_thing = BillRepository::record_id(&payload.bill_id)?;
    let repo = TransactionRepository::new(state.get_db());
    let transaction = repo
        .create(bill_thing, payload.amount, payload.payment_method)
        .await?;

    let id = transaction
        .id
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_default();
    tracing::info!(transaction = %id, bill = %payload.bill_id, amount = %payload.amount, "Transaction created");
    Ok(Json(transaction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::db::models::{BillCreate, DiningTableCreate, PaymentMethod, ReservationCreate};
    use crate::db::repository::{BillRepository, DiningTableRepository};
    use rust_decimal::dec;
    use tempfile::TempDir;

    async fn test_state() -> (ServerState, TempDir) {
        let tmp = TempDir::new().expect("temp dir");
        let config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
        let state = ServerState::initialize(&config).await.expect("state init");
        (state, tmp)
    }

    /// Seed a reservation + bill and return the bill id
    async fn seed_bill(state: &ServerState) -> String {
        let table = DiningTableRepository::new(state.get_db())
            .create(DiningTableCreate {
                name: "T1".into(),
                capacity: Some(4),
            })
            .await
            .expect("create table");

        let reservation = state
            .reservation_service
            .create(ReservationCreate {
                table_id: table.id.expect("table id").to_string(),
                reservation_time: chrono::Local::now()
                    .date_naive()
                    .succ_opt()
                    .expect("tomorrow")
                    .and_hms_opt(12, 0, 0)
                    .expect("valid time"),
                number_of_guests: 2,
                user_id: None,
                guest_name: "Ada Lovelace".into(),
                guest_email: Some("ada@example.com".into()),
                guest_phone: None,
            })
            .await
            .expect("create reservation");
        let reservation_thing = reservation.id.expect("reservation id");

        let bill = BillRepository::new(state.get_db())
            .create(
                BillCreate {
                    reservation_id: reservation_thing.to_string(),
                    total_amount: dec!(100.00),
                    tax: dec!(21.00),
                    discount: dec!(10.00),
                },
                reservation_thing,
            )
            .await
            .expect("create bill");
        bill.id.expect("bill id").to_string()
    }

    #[tokio::test]
    async fn payment_over_final_amount_is_rejected() {
        let (state, _tmp) = test_state().await;
        let bill_id = seed_bill(&state).await;

        // final = 100 + 21 - 10 = 111
        let err = create(
            State(state.clone()),
            Json(TransactionCreate {
                bill_id,
                amount: dec!(150.00),
                payment_method: PaymentMethod::Card,
            }),
        )
        .await
        .map(|_| ())
        .expect_err("overdraft must be rejected");
        assert_eq!(err.code, ErrorCode::InsufficientFunds);
    }

    #[tokio::test]
    async fn payment_within_bounds_recomputes_bill() {
        let (state, _tmp) = test_state().await;
        let bill_id = seed_bill(&state).await;

        let Json(transaction) = create(
            State(state.clone()),
            Json(TransactionCreate {
                bill_id: bill_id.clone(),
                amount: dec!(50.00),
                payment_method: PaymentMethod::Cash,
            }),
        )
        .await
        .expect("payment accepted");
        assert_eq!(transaction.amount, dec!(50.00));

        let bill = BillRepository::new(state.get_db())
            .find_by_id(&bill_id)
            .await
            .expect("bill query")
            .expect("bill exists");
        assert_eq!(bill.final_amount, dec!(111.00));
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected() {
        let (state, _tmp) = test_state().await;
        let bill_id = seed_bill(&state).await;

        let err = create(
            State(state),
            Json(TransactionCreate {
                bill_id,
                amount: dec!(0.00),
                payment_method: PaymentMethod::Online,
            }),
        )
        .await
        .map(|_| ())
        .expect_err("zero payment must be rejected");
        assert_eq!(err.code, ErrorCode::InvalidAmount);
    }
}

//! Bill API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;

use crate::AppError;
use crate::core::ServerState;
use crate::db::models::{Bill, BillCreate, BillUpdate};
use crate::db::repository::{
    BillRepository, RepoError, ReservationRepository, TransactionRepository,
};
use crate::utils::AppResult;
use crate::utils::validation::validate_dto;
use shared::ErrorCode;

/// 金额字段不允许为负，抵扣后的应付金额也不允许为负
fn check_amounts(total: Decimal, tax: Decimal, discount: Decimal) -> AppResult<()> {
    if total < Decimal::ZERO || tax < Decimal::ZERO || discount < Decimal::ZERO {
        return Err(AppError::with_message(
            ErrorCode::InvalidAmount,
            "Amounts must not be negative",
        ));
    }
    if Bill::compute_final_amount(total, tax, discount) < Decimal::ZERO {
        return Err(AppError::with_message(
            ErrorCode::InvalidAmount,
            "Discount exceeds total plus tax",
        ));
    }
    Ok(())
}

/// GET /api/bills - 获取所有账单
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Bill>>> {
    let repo = BillRepository::new(state.get_db());
    let bills = repo.find_all().await?;
    Ok(Json(bills))
}

/// GET /api/bills/:id - 获取单个账单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Bill>> {
    let repo = BillRepository::new(state.get_db());
    let bill = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BillNotFound).with_detail("id", id))?;
    Ok(Json(bill))
}

/// GET /api/bills/by-reservation/:reservation_id - 预订对应的账单
pub async fn get_by_reservation(
    State(state): State<ServerState>,
    Path(reservation_id): Path<String>,
) -> AppResult<Json<Bill>> {
    let reservation_thing = ReservationRepository::record_id(&reservation_id)?;
    let repo = BillRepository::new(state.get_db());
    let bill = repo
        .find_by_reservation(&reservation_thing)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::BillNotFound).with_detail("reservation", reservation_id)
        })?;
    Ok(Json(bill))
}

/// POST /api/bills - 创建账单
///
/// 应付金额 (final) 由服务端计算；预订必须存在且尚无账单。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BillCreate>,
) -> AppResult<Json<Bill>> {
    validate_dto(&payload)?;
    check_amounts(payload.total_amount, payload.tax, payload.discount)?;

    let reservations = ReservationRepository::new(state.get_db());
    reservations
        .find_by_id(&payload.reservation_id)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::ReservationNotFound)
                .with_detail("id", payload.reservation_id.clone())
        })?;
    let reservation_thing = ReservationRepository::record_id(&payload.reservation_id)?;

    let repo = BillRepository::new(state.get_db());
    let bill = repo
        .create(payload, reservation_thing)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::BillExists),
            other => other.into(),
        })?;

    let id = bill.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    tracing::info!(bill = %id, final_amount = %bill.final_amount, "Bill created");
    Ok(Json(bill))
}

/// PUT /api/bills/:id - 更新账单金额 (final 重新计算)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BillUpdate>,
) -> AppResult<Json<Bill>> {
    let repo = BillRepository::new(state.get_db());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BillNotFound).with_detail("id", id.clone()))?;

    let total = payload.total_amount.unwrap_or(existing.total_amount);
    let tax = payload.tax.unwrap_or(existing.tax);
    let discount = payload.discount.unwrap_or(existing.discount);
    check_amounts(total, tax, discount)?;

    let bill = repo.update(&id, payload).await?;
    tracing::info!(bill = %id, final_amount = %bill.final_amount, "Bill updated");
    Ok(Json(bill))
}

/// DELETE /api/bills/:id - 删除账单
///
/// 已有交易记录的账单拒绝删除。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = BillRepository::new(state.get_db());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BillNotFound).with_detail("id", id.clone()))?;

    let bill_thing = BillRepository::record_id(&id)?;
    let transactions = TransactionRepository::new(state.get_db());
    if transactions.exists_for_bill(&bill_thing).await? {
        return Err(AppError::new(ErrorCode::BillHasTransactions).with_detail("id", id));
    }

    repo.delete(&id).await?;
    tracing::info!(bill = %id, "Bill deleted");
    Ok(Json(true))
}

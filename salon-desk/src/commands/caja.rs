use anyhow::Result;
use rust_decimal::Decimal;
use salon_client::CajaStore;
use shared::models::{MovementKind, PaymentMethod};

use super::Context;
use crate::render;

async fn store_for(ctx: &Context) -> Result<CajaStore> {
    let mut store = CajaStore::new(ctx.api.clone(), ctx.notifier.clone());
    store.load().await?;
    Ok(store)
}

pub async fn status(ctx: &Context) -> Result<()> {
    let store = store_for(ctx).await?;
    if store.is_open() {
        println!("{}", render::blind_sheet(&store.blind_sheet()?));
    } else {
        println!("No cash drawer is open");
    }
    Ok(())
}

pub async fn open(
    ctx: &Context,
    operator_id: i64,
    operator_name: String,
    opening_float: Decimal,
    note: Option<String>,
) -> Result<()> {
    let mut store = store_for(ctx).await?;
    let session = store.open(operator_id, operator_name, opening_float, note).await?;
    println!("Caja #{} opened with {}", session.id, session.opening_float);
    Ok(())
}

pub async fn movement(
    ctx: &Context,
    kind: MovementKind,
    amount: Decimal,
    concept: String,
    method: PaymentMethod,
) -> Result<()> {
    let mut store = store_for(ctx).await?;
    let movement = store.register_movement(kind, amount, concept, method).await?;
    println!("Movement #{} registered", movement.id);
    Ok(())
}

pub async fn close(ctx: &Context, counted: Decimal, note: Option<String>) -> Result<()> {
    let mut store = store_for(ctx).await?;
    let report = store.close_blind(counted, note).await?;
    println!("{}", render::close_report(&report));
    Ok(())
}

use anyhow::Result;
use chrono::NaiveDate;
use salon_client::{BookingRequest, CalendarStore};
use shared::SlotTime;
use shared::models::AppointmentState;

use super::Context;
use crate::render;

async fn store_for(ctx: &Context, date: NaiveDate) -> Result<CalendarStore> {
    let mut store = CalendarStore::new(ctx.api.clone(), ctx.notifier.clone(), date);
    store.load().await?;
    Ok(store)
}

pub async fn reassign(
    ctx: &Context,
    date: NaiveDate,
    appointment_id: i64,
    staff_id: i64,
    time: SlotTime,
) -> Result<()> {
    let mut store = store_for(ctx, date).await?;
    if store.drop_appointment(appointment_id, staff_id, time).await? {
        if let Some(appointment) = store.appointment(appointment_id) {
            println!("{}", render::appointment_line(appointment));
        }
    } else {
        println!("Appointment #{} is already there", appointment_id);
    }
    Ok(())
}

pub async fn book(ctx: &Context, date: NaiveDate, request: BookingRequest) -> Result<()> {
    let mut store = store_for(ctx, date).await?;
    let created = store.book(request).await?;
    println!("{}", render::appointment_line(&created));
    Ok(())
}

pub async fn change_state(
    ctx: &Context,
    date: NaiveDate,
    appointment_id: i64,
    state: AppointmentState,
    reason: Option<String>,
) -> Result<()> {
    let mut store = store_for(ctx, date).await?;
    let updated = store.change_state(appointment_id, state, reason).await?;
    println!("{}", render::appointment_line(&updated));
    Ok(())
}

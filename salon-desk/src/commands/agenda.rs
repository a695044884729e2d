use anyhow::Result;
use chrono::NaiveDate;
use salon_client::CalendarStore;
use shared::grid::GridConfig;

use super::Context;
use crate::render;

pub async fn run(ctx: &Context, date: NaiveDate, slot_height: u32) -> Result<()> {
    let mut store = CalendarStore::new(ctx.api.clone(), ctx.notifier.clone(), date)
        .with_grid_config(GridConfig::new(slot_height));
    store.load().await?;

    print!("{}", render::grid(&store.grid()));
    println!();

    let mut appointments = store.state().appointments.clone();
    appointments.sort_by_key(|a| (a.start_time, a.staff_id));
    for appointment in &appointments {
        println!("{}", render::appointment_line(appointment));
    }
    Ok(())
}

/// Bookable start times for one staff member
pub async fn slots(ctx: &Context, date: NaiveDate, staff_id: i64, duration: u32) -> Result<()> {
    let mut store = CalendarStore::new(ctx.api.clone(), ctx.notifier.clone(), date);
    store.load().await?;

    let Some(day) = store.availability(staff_id) else {
        anyhow::bail!("staff member {} is not on the calendar", staff_id);
    };
    let free: Vec<String> = day
        .bookable_slots()
        .filter(|&slot| {
            shared::grid::validate_booking(day, slot, duration, &store.state().appointments).is_ok()
        })
        .map(|slot| slot.to_string())
        .collect();

    if free.is_empty() {
        println!("No free {}-minute slots on {}", duration, date);
    } else {
        println!("{}", free.join(" "));
    }
    Ok(())
}

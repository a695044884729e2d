use std::path::Path;

use anyhow::{Context as _, Result};
use rust_decimal::Decimal;
use shared::commission::{self, CommissionRule, CommissionType};
use shared::models::InvoiceLine;

use super::Context;

pub fn calculate(base: Decimal, kind: CommissionType, rate: Decimal) -> Result<()> {
    let rule = CommissionRule { kind, rate };
    rule.validate()?;
    println!("{}", commission::calculate(base, kind, rate));
    Ok(())
}

/// Projected earnings of a staff member over invoice lines read from a JSON file
pub async fn project(ctx: &Context, staff_id: i64, lines_path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(lines_path)
        .with_context(|| format!("reading {}", lines_path.display()))?;
    let lines: Vec<InvoiceLine> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", lines_path.display()))?;

    let staff = ctx
        .api
        .list_staff()
        .await
        .map_err(|e| ctx.fail("Loading staff", e))?;
    let member = staff
        .iter()
        .find(|s| s.id == staff_id)
        .with_context(|| format!("staff member {} not found", staff_id))?;
    let Some(rule) = member.commission else {
        anyhow::bail!("{} has no commission rule", member.name);
    };

    let total = commission::project_earnings(staff_id, &rule, &lines);
    tracing::info!(staff_id, lines = lines.len(), %total, "Projected commission");
    println!("{}: {}", member.name, total);
    Ok(())
}

use anyhow::Result;

use super::Context;
use crate::render;

pub async fn run(ctx: &Context, check: Option<String>) -> Result<()> {
    let roles = ctx
        .api
        .list_roles()
        .await
        .map_err(|e| ctx.fail("Loading roles", e))?;
    match check {
        Some(permission) => {
            for role in roles.iter().filter(|r| r.allows(&permission)) {
                println!("{}", role.name);
            }
        }
        None => {
            for role in &roles {
                println!("{}", render::role_line(role));
            }
        }
    }
    Ok(())
}

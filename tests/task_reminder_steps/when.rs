//! When steps for task reminder BDD scenarios.

use super::world::{TaskReminderWorld, run_async};
use rstest_bdd_macros::when;
use taskbot::task::domain::OwnerId;

#[when(r#"user {owner:i64} sends "{text}""#)]
fn user_sends(world: &mut TaskReminderWorld, owner: i64, text: String) -> Result<(), eyre::Report> {
    let reply = run_async(world.router()?.handle(OwnerId::new(owner), &text));
    world.last_reply = Some(reply);
    Ok(())
}

pub mod leave;

#[poise::command(prefix_command)]
pub async fn register(ctx: crate::discord::Context<'_>) -> Result<(), anyhow::Error> {
    poise::builtins::register_application_commands_buttons(ctx).await?;
    Ok(())
}

pub fn commands() -> Vec<poise::Command<super::Data, anyhow::Error>> {
    vec![register(), leave::leave()]
}

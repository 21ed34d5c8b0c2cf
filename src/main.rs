// Modules
mod commands;
mod constants;
mod dispatch;
mod platform;
mod util;

// Uses
use std::{env, sync::Arc};

use anyhow::Context;
use dotenv::dotenv;
use poise::serenity_prelude as serenity;

use crate::{
	constants::{ERROR_STYLE, HEADER_STYLE, OKAY_STYLE, PROGRAM_VERSION, TOKEN_NAME},
	dispatch::{invocation::RandomSource, registry::CommandRegistry},
};

// Types
pub type Error = anyhow::Error;
pub type PoiseContext<'a> = poise::Context<'a, Data, Error>;

/// Data shared by every command invocation.
pub struct Data {
	pub registry: Arc<CommandRegistry>,
	pub random: RandomSource,
}

// Entry Point
#[tokio::main]
async fn main() -> Result<(), Error> {
	dotenv().ok();

	let token = env::var(TOKEN_NAME).with_context(|| {
		format!(
			"expected the discord token in the environment variable {}",
			TOKEN_NAME
		)
	})?;

	let registry = Arc::new(
		commands::build_registry().with_context(|| "failed to build the command registry")?,
	);
	let random = RandomSource::from_entropy();

	let framework = poise::Framework::builder()
		.options(poise::FrameworkOptions {
			commands: commands::commands(),
			..Default::default()
		})
		.setup(move |ctx, ready, framework| {
			Box::pin(async move {
				poise::builtins::register_globally(ctx, &framework.options().commands).await?;
				on_ready(ctx, ready).await;
				Ok(Data { registry, random })
			})
		})
		.build();

	let mut client =
		serenity::ClientBuilder::new(&token, serenity::GatewayIntents::non_privileged())
			.framework(framework)
			.await
			.with_context(|| "error creating the client")?;

	client.start().await.with_context(|| "client error")
}

/// Startup report.
async fn on_ready(ctx: &serenity::Context, ready: &serenity::Ready) {
	println!(
		"{}",
		OKAY_STYLE.paint(format!(
			"{} v{} is connected!",
			ready.user.name, PROGRAM_VERSION
		))
	);
	if ready.guilds.is_empty() {
		println!("{}", ERROR_STYLE.paint("No connected guilds."));
		return;
	}
	println!("{}", HEADER_STYLE.paint("Connected guilds:"));
	for guild in &ready.guilds {
		match guild.id.to_partial_guild(&ctx.http).await {
			Ok(guild_data) => println!("{} - {}", guild.id.get(), guild_data.name),
			Err(_) => println!("{}", guild.id.get()),
		}
	}
}

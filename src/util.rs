// Uses
use anyhow::Context;
use poise::{serenity_prelude as serenity, CreateReply};

use crate::{
	constants::{ERROR_COLOUR, OKAY_COLOUR, WARN_COLOUR},
	dispatch::{
		dispatch,
		invocation::Invocation,
		outcome::{ResponseEnvelope, Severity},
	},
	platform::serenity::SerenityPlatform,
	Error, PoiseContext,
};

/// Dispatch an invocation against the live platform and deliver the rendered
/// envelope as the reply.
pub async fn dispatch_and_reply(ctx: PoiseContext<'_>, invocation: Invocation) -> Result<(), Error> {
	let platform = SerenityPlatform::new(ctx.http());
	let envelope = dispatch(&ctx.data().registry, &platform, invocation).await;
	send_envelope(ctx, &envelope).await
}

/// Render an envelope as an embed and deliver it. This also covers the
/// deferred-then-edit mode: after `ctx.defer()`, the reply edits the
/// acknowledged response in place.
pub async fn send_envelope(
	ctx: PoiseContext<'_>,
	envelope: &ResponseEnvelope,
) -> Result<(), Error> {
	let mut embed = serenity::CreateEmbed::new()
		.colour(envelope_colour(envelope))
		.description(envelope.body.clone());
	if let Some(title) = &envelope.title {
		embed = embed.title(title.clone());
	}
	if let Some(footer) = &envelope.footer {
		embed = embed.footer(serenity::CreateEmbedFooter::new(footer.clone()));
	}

	ctx.send(CreateReply::default().embed(embed))
		.await
		.with_context(|| "failed to send the response")?;
	Ok(())
}

fn envelope_colour(envelope: &ResponseEnvelope) -> serenity::Colour {
	match envelope.severity {
		Severity::Ok => envelope.accent.map_or(OKAY_COLOUR, serenity::Colour),
		Severity::Warn => WARN_COLOUR,
		Severity::Error => ERROR_COLOUR,
	}
}

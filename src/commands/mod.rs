// Modules
mod chance;
mod roles;

// Uses
use std::sync::Arc;

use poise::Command;

use self::{chance::*, roles::*};
use crate::{
	dispatch::{
		invocation::{CallerContext, ParamKind},
		registry::{CommandRegistry, CommandSpec, ParameterSpec, RegistryError},
	},
	platform::GuildScope,
	Data, Error, PoiseContext,
};

/// The list of commands supported by the bot.
pub fn commands() -> Vec<Command<Data, Error>> {
	vec![coin(), random(), role_add(), role_remove(), role_info()]
}

/// Build the dispatch registry backing the command list. Runs once at
/// startup; the registry is read-only afterwards.
pub fn build_registry() -> Result<CommandRegistry, RegistryError> {
	let mut registry = CommandRegistry::new();
	registry.register(CommandSpec::new("coin", Vec::new(), Arc::new(CoinFlip)))?;
	registry.register(CommandSpec::new(
		"random",
		vec![
			ParameterSpec::required("from", ParamKind::Integer),
			ParameterSpec::required("to", ParamKind::Integer),
		],
		Arc::new(RandomInRange),
	))?;
	registry.register(CommandSpec::new(
		"role_add",
		vec![
			ParameterSpec::required("user", ParamKind::UserRef),
			ParameterSpec::required("role", ParamKind::RoleRef),
		],
		Arc::new(RoleGrant),
	))?;
	registry.register(CommandSpec::new(
		"role_remove",
		vec![
			ParameterSpec::required("user", ParamKind::UserRef),
			ParameterSpec::required("role", ParamKind::RoleRef),
		],
		Arc::new(RoleRevoke),
	))?;
	registry.register(CommandSpec::new(
		"role_info",
		vec![ParameterSpec::required("role", ParamKind::RoleRef)],
		Arc::new(RoleInfo),
	))?;
	Ok(registry)
}

/// Resolve the caller context for an invocation. The admin flag comes from
/// the interaction member's resolved permissions.
pub(crate) async fn caller_context(ctx: &PoiseContext<'_>) -> CallerContext {
	let is_admin = match ctx.author_member().await {
		Some(member) => member
			.permissions
			.map_or(false, |permissions| permissions.administrator()),
		None => false,
	};

	CallerContext {
		invoker_id: ctx.author().id.get(),
		invoker_name: ctx.author().name.clone(),
		guild: ctx.guild_id().map(|guild_id| GuildScope { id: guild_id.get() }),
		is_admin,
		random: ctx.data().random.clone(),
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn every_exposed_command_is_registered() {
		let registry = build_registry().unwrap();

		for name in ["coin", "random", "role_add", "role_remove", "role_info"] {
			assert_eq!(registry.lookup(name).unwrap().name(), name);
		}
	}
}

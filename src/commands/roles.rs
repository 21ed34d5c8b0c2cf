// Uses
use async_trait::async_trait;
use chrono::Utc;
use poise::{command, serenity_prelude as serenity};

use super::caller_context;
use crate::{
	dispatch::{
		invocation::{ArgValue, Invocation},
		outcome::Outcome,
		registry::CommandHandler,
	},
	platform::{
		serenity::{role_ref, user_ref},
		Member, PlatformClient, PlatformFailure,
	},
	util::dispatch_and_reply,
	Error, PoiseContext,
};

// Commands

/// Add a role to a user.
#[command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn role_add(
	ctx: PoiseContext<'_>,
	#[description = "User to be assigned the role."] user: serenity::User,
	#[description = "The role you wish to grant."] role: serenity::Role,
) -> Result<(), Error> {
	ctx.defer().await?;
	let invocation = Invocation::new("role_add", caller_context(&ctx).await)
		.with_arg("user", ArgValue::User(user_ref(&user)))
		.with_arg("role", ArgValue::Role(role_ref(&role)));
	dispatch_and_reply(ctx, invocation).await
}

/// Remove a role from a user.
#[command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn role_remove(
	ctx: PoiseContext<'_>,
	#[description = "User to remove the role from."] user: serenity::User,
	#[description = "The role you want to remove."] role: serenity::Role,
) -> Result<(), Error> {
	ctx.defer().await?;
	let invocation = Invocation::new("role_remove", caller_context(&ctx).await)
		.with_arg("user", ArgValue::User(user_ref(&user)))
		.with_arg("role", ArgValue::Role(role_ref(&role)));
	dispatch_and_reply(ctx, invocation).await
}

/// Check info for a role.
#[command(slash_command, guild_only)]
pub async fn role_info(
	ctx: PoiseContext<'_>,
	#[description = "The role you want to know about."] role: serenity::Role,
) -> Result<(), Error> {
	ctx.defer().await?;
	let invocation = Invocation::new("role_info", caller_context(&ctx).await)
		.with_arg("role", ArgValue::Role(role_ref(&role)));
	dispatch_and_reply(ctx, invocation).await
}

// Handlers

pub struct RoleGrant;

#[async_trait]
impl CommandHandler for RoleGrant {
	async fn run(&self, invocation: &Invocation, platform: &dyn PlatformClient) -> Outcome {
		let Some(role) = invocation.role("role") else {
			return argument_fault(&invocation.command);
		};
		let member = match resolve_target(invocation, platform).await {
			Ok(member) => member,
			Err(outcome) => return outcome,
		};

		if member.has_role(role) {
			return Outcome::rejection("The user already has this role!");
		}

		match platform.grant_role(&member, role).await {
			Ok(()) => Outcome::success(format!(
				"Added **{}** to **{}**.",
				role.name, member.display_name
			)),
			Err(failure) => failure.into(),
		}
	}
}

pub struct RoleRevoke;

#[async_trait]
impl CommandHandler for RoleRevoke {
	async fn run(&self, invocation: &Invocation, platform: &dyn PlatformClient) -> Outcome {
		let Some(role) = invocation.role("role") else {
			return argument_fault(&invocation.command);
		};
		let member = match resolve_target(invocation, platform).await {
			Ok(member) => member,
			Err(outcome) => return outcome,
		};

		if !member.has_role(role) {
			return Outcome::rejection("The user does not have this role!");
		}

		match platform.revoke_role(&member, role).await {
			Ok(()) => Outcome::success(format!(
				"Removed **{}** from **{}**.",
				role.name, member.display_name
			)),
			Err(failure) => failure.into(),
		}
	}
}

pub struct RoleInfo;

#[async_trait]
impl CommandHandler for RoleInfo {
	async fn run(&self, invocation: &Invocation, platform: &dyn PlatformClient) -> Outcome {
		let Some(role) = invocation.role("role") else {
			return argument_fault(&invocation.command);
		};
		let Some(guild) = invocation.caller.guild else {
			return Outcome::rejection("This command only works in a server.");
		};

		let members = match platform.list_members(guild).await {
			Ok(members) => members,
			Err(failure) => return failure.into(),
		};

		let holder_count = members
			.iter()
			.filter(|member| member.roles.iter().any(|held| held.name == role.name))
			.count();
		let age_days = (Utc::now() - role.created_at).num_days();

		Outcome::Success {
			title: Some("Role info".to_owned()),
			summary: format!(
				"Name: {}\nMembers: {}\nColour: #{:06x}\nCreated: {} days ago",
				role.name, holder_count, role.colour, age_days
			),
			footer: Some(format!("Id: {}", role.id)),
			accent: Some(role.colour),
		}
	}
}

// Functions

/// The shared preamble of the two mutating role commands: permission check,
/// guild scope, and member resolution, each miss mapped to its outcome.
async fn resolve_target(
	invocation: &Invocation,
	platform: &dyn PlatformClient,
) -> Result<Member, Outcome> {
	if !invocation.caller.is_admin {
		return Err(Outcome::rejection(
			"This command requires administrator permission.",
		));
	}
	let Some(guild) = invocation.caller.guild else {
		return Err(Outcome::rejection("This command only works in a server."));
	};
	let Some(user) = invocation.user("user") else {
		return Err(argument_fault(&invocation.command));
	};

	match platform.resolve_member(guild, user).await {
		Ok(member) => Ok(member),
		Err(PlatformFailure::NotFound) => {
			Err(Outcome::rejection("User not found in this server."))
		}
		Err(failure) => Err(failure.into()),
	}
}

fn argument_fault(command: &str) -> Outcome {
	Outcome::fault(
		"The command failed unexpectedly.",
		format!("`{}` was invoked without validated arguments", command),
	)
}

// Uses
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serenity::{
	http::{Http, HttpError},
	model::{
		guild::{Member as DiscordMember, Role as DiscordRole},
		id::{GuildId, RoleId, UserId},
		timestamp::Timestamp,
		user::User as DiscordUser,
	},
	Error as SerenityError,
};

use super::{GuildScope, Member, MemberRole, PlatformClient, PlatformFailure, RoleRef, UserRef};

// Constants
const MEMBER_PAGE_SIZE: u64 = 1000;

/// The live platform client, backed by the Discord HTTP API.
pub struct SerenityPlatform<'a> {
	http: &'a Http,
}

impl<'a> SerenityPlatform<'a> {
	#[must_use]
	pub fn new(http: &'a Http) -> Self {
		Self { http }
	}

	/// Role id → name lookup for a guild, so member role lists carry names.
	async fn role_names(
		&self,
		guild_id: GuildId,
	) -> Result<HashMap<RoleId, String>, PlatformFailure> {
		let roles = guild_id.roles(self.http).await.map_err(classify)?;
		Ok(roles
			.into_iter()
			.map(|(role_id, role)| (role_id, role.name))
			.collect())
	}
}

#[async_trait]
impl PlatformClient for SerenityPlatform<'_> {
	async fn resolve_member(
		&self,
		guild: GuildScope,
		user: &UserRef,
	) -> Result<Member, PlatformFailure> {
		let guild_id = GuildId::new(guild.id);
		let member = guild_id
			.member(self.http, UserId::new(user.id))
			.await
			.map_err(classify)?;
		let role_names = self.role_names(guild_id).await?;
		Ok(convert_member(guild, &role_names, &member))
	}

	async fn grant_role(&self, member: &Member, role: &RoleRef) -> Result<(), PlatformFailure> {
		self.http
			.add_member_role(
				GuildId::new(member.guild.id),
				UserId::new(member.id),
				RoleId::new(role.id),
				None,
			)
			.await
			.map_err(classify)
	}

	async fn revoke_role(&self, member: &Member, role: &RoleRef) -> Result<(), PlatformFailure> {
		self.http
			.remove_member_role(
				GuildId::new(member.guild.id),
				UserId::new(member.id),
				RoleId::new(role.id),
				None,
			)
			.await
			.map_err(classify)
	}

	async fn list_members(&self, guild: GuildScope) -> Result<Vec<Member>, PlatformFailure> {
		let guild_id = GuildId::new(guild.id);
		let role_names = self.role_names(guild_id).await?;

		let mut members = Vec::new();
		let mut after: Option<UserId> = None;
		loop {
			let page = guild_id
				.members(self.http, Some(MEMBER_PAGE_SIZE), after)
				.await
				.map_err(classify)?;
			let full_page = page.len() as u64 == MEMBER_PAGE_SIZE;
			after = page.last().map(|member| member.user.id);
			members.extend(
				page.iter()
					.map(|member| convert_member(guild, &role_names, member)),
			);
			if !full_page {
				break;
			}
		}

		Ok(members)
	}
}

// Functions

/// Classify a platform error by the HTTP status Discord returned.
fn classify(error: SerenityError) -> PlatformFailure {
	match &error {
		SerenityError::Http(HttpError::UnsuccessfulRequest(response))
			if response.status_code.as_u16() == 404 =>
		{
			PlatformFailure::NotFound
		}
		SerenityError::Http(HttpError::UnsuccessfulRequest(response))
			if response.status_code.as_u16() == 403 =>
		{
			PlatformFailure::Unauthorized {
				debug_trace: format!("{:?}", error),
			}
		}
		_ => PlatformFailure::Other {
			message: error.to_string(),
			debug_trace: format!("{:?}", error),
		},
	}
}

fn convert_member(
	guild: GuildScope,
	role_names: &HashMap<RoleId, String>,
	member: &DiscordMember,
) -> Member {
	Member {
		guild,
		id: member.user.id.get(),
		display_name: member.display_name().to_owned(),
		roles: member
			.roles
			.iter()
			.map(|role_id| MemberRole {
				id: role_id.get(),
				name: role_names.get(role_id).cloned().unwrap_or_default(),
			})
			.collect(),
	}
}

#[must_use]
pub fn user_ref(user: &DiscordUser) -> UserRef {
	UserRef {
		id: user.id.get(),
		name: user.name.clone(),
	}
}

#[must_use]
pub fn role_ref(role: &DiscordRole) -> RoleRef {
	RoleRef {
		id: role.id.get(),
		name: role.name.clone(),
		colour: role.colour.0,
		created_at: timestamp_to_utc(role.id.created_at()),
	}
}

fn timestamp_to_utc(timestamp: Timestamp) -> DateTime<Utc> {
	DateTime::from_timestamp(timestamp.unix_timestamp(), 0).unwrap_or_default()
}

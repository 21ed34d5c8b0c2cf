// Modules
pub mod serenity;
#[cfg(test)]
pub mod testing;

// Uses
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

// Types

/// The server within which members and roles are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuildScope {
	pub id: u64,
}

/// A reference to a platform user, independent of any guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
	pub id: u64,
	pub name: String,
}

/// A reference to a guild role, resolved by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRef {
	pub id: u64,
	pub name: String,
	pub colour: u32,
	pub created_at: DateTime<Utc>,
}

/// One role a member currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRole {
	pub id: u64,
	pub name: String,
}

/// A user as a member of a specific guild, with the roles they hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
	pub guild: GuildScope,
	pub id: u64,
	pub display_name: String,
	pub roles: Vec<MemberRole>,
}

impl Member {
	#[must_use]
	pub fn has_role(&self, role: &RoleRef) -> bool {
		self.roles.iter().any(|held| held.id == role.id)
	}
}

/// A failure reported by the platform on a read or mutating call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformFailure {
	#[error("the requested entity was not found")]
	NotFound,
	#[error("permission or role-hierarchy violation")]
	Unauthorized { debug_trace: String },
	#[error("{message}")]
	Other {
		message: String,
		debug_trace: String,
	},
}

/// The external collaborator providing chat-platform connectivity.
///
/// Gateway management, authentication, and rate limiting are entirely its
/// responsibility; handlers only see the operations below.
#[async_trait]
pub trait PlatformClient: Send + Sync {
	async fn resolve_member(
		&self,
		guild: GuildScope,
		user: &UserRef,
	) -> Result<Member, PlatformFailure>;
	async fn grant_role(&self, member: &Member, role: &RoleRef) -> Result<(), PlatformFailure>;
	async fn revoke_role(&self, member: &Member, role: &RoleRef) -> Result<(), PlatformFailure>;
	async fn list_members(&self, guild: GuildScope) -> Result<Vec<Member>, PlatformFailure>;
}

// Uses
use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use super::{GuildScope, Member, MemberRole, PlatformClient, PlatformFailure, RoleRef, UserRef};

/// In-memory stand-in for the live platform, for exercising handlers without
/// a gateway connection.
#[derive(Default)]
pub struct FakePlatform {
	members: Mutex<HashMap<u64, Member>>,
	deny_mutations: bool,
	fail_listing: bool,
}

impl FakePlatform {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_member(self, member: Member) -> Self {
		self.members.lock().unwrap().insert(member.id, member);
		self
	}

	/// Make every mutating call fail as an authorization error.
	#[must_use]
	pub fn deny_mutations(mut self) -> Self {
		self.deny_mutations = true;
		self
	}

	/// Make member enumeration fail with a generic platform error.
	#[must_use]
	pub fn fail_listing(mut self) -> Self {
		self.fail_listing = true;
		self
	}

	/// The role ids a member currently holds, as observed by the platform.
	pub fn member_role_ids(&self, member_id: u64) -> Vec<u64> {
		self.members
			.lock()
			.unwrap()
			.get(&member_id)
			.map(|member| member.roles.iter().map(|role| role.id).collect())
			.unwrap_or_default()
	}
}

#[async_trait]
impl PlatformClient for FakePlatform {
	async fn resolve_member(
		&self,
		_guild: GuildScope,
		user: &UserRef,
	) -> Result<Member, PlatformFailure> {
		self.members
			.lock()
			.unwrap()
			.get(&user.id)
			.cloned()
			.ok_or(PlatformFailure::NotFound)
	}

	async fn grant_role(&self, member: &Member, role: &RoleRef) -> Result<(), PlatformFailure> {
		if self.deny_mutations {
			return Err(PlatformFailure::Unauthorized {
				debug_trace: "missing MANAGE_ROLES".to_owned(),
			});
		}
		let mut members = self.members.lock().unwrap();
		let entry = members.get_mut(&member.id).ok_or(PlatformFailure::NotFound)?;
		entry.roles.push(MemberRole {
			id: role.id,
			name: role.name.clone(),
		});
		Ok(())
	}

	async fn revoke_role(&self, member: &Member, role: &RoleRef) -> Result<(), PlatformFailure> {
		if self.deny_mutations {
			return Err(PlatformFailure::Unauthorized {
				debug_trace: "missing MANAGE_ROLES".to_owned(),
			});
		}
		let mut members = self.members.lock().unwrap();
		let entry = members.get_mut(&member.id).ok_or(PlatformFailure::NotFound)?;
		entry.roles.retain(|held| held.id != role.id);
		Ok(())
	}

	async fn list_members(&self, _guild: GuildScope) -> Result<Vec<Member>, PlatformFailure> {
		if self.fail_listing {
			return Err(PlatformFailure::Other {
				message: "member enumeration failed".to_owned(),
				debug_trace: "synthetic listing failure".to_owned(),
			});
		}
		Ok(self.members.lock().unwrap().values().cloned().collect())
	}
}

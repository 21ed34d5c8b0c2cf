// Uses
use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;

use super::{
	invocation::{Invocation, ParamKind},
	outcome::Outcome,
};
use crate::platform::PlatformClient;

// Types

/// A stateless command implementation. Handlers report every failure as an
/// [`Outcome`] variant; only genuinely unexpected faults may escape, and the
/// dispatcher contains those.
#[async_trait]
pub trait CommandHandler: Send + Sync {
	async fn run(&self, invocation: &Invocation, platform: &dyn PlatformClient) -> Outcome;
}

/// One declared parameter of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
	pub name: String,
	pub kind: ParamKind,
	pub required: bool,
}

impl ParameterSpec {
	#[must_use]
	pub fn required(name: &str, kind: ParamKind) -> Self {
		Self {
			name: name.to_owned(),
			kind,
			required: true,
		}
	}

	#[must_use]
	pub fn optional(name: &str, kind: ParamKind) -> Self {
		Self {
			name: name.to_owned(),
			kind,
			required: false,
		}
	}
}

/// A registered command: its name, parameter schema, and handler. Immutable
/// after registration.
#[derive(Clone)]
pub struct CommandSpec {
	name: String,
	params: Vec<ParameterSpec>,
	handler: Arc<dyn CommandHandler>,
}

impl std::fmt::Debug for CommandSpec {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CommandSpec")
			.field("name", &self.name)
			.field("params", &self.params)
			.finish_non_exhaustive()
	}
}

impl CommandSpec {
	#[must_use]
	pub fn new(name: &str, params: Vec<ParameterSpec>, handler: Arc<dyn CommandHandler>) -> Self {
		Self {
			name: name.to_owned(),
			params,
			handler,
		}
	}

	#[must_use]
	pub fn name(&self) -> &str {
		&self.name
	}

	#[must_use]
	pub fn params(&self) -> &[ParameterSpec] {
		&self.params
	}

	#[must_use]
	pub fn handler(&self) -> &dyn CommandHandler {
		self.handler.as_ref()
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
	#[error("a command named `{0}` is already registered")]
	DuplicateCommand(String),
	#[error("no command named `{0}` is registered")]
	UnknownCommand(String),
}

/// Maps command names to their specs. Built once at startup, read-only
/// afterwards, so it may be shared freely across concurrent dispatches.
#[derive(Default)]
pub struct CommandRegistry {
	commands: HashMap<String, CommandSpec>,
}

impl CommandRegistry {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, spec: CommandSpec) -> Result<(), RegistryError> {
		if self.commands.contains_key(spec.name()) {
			return Err(RegistryError::DuplicateCommand(spec.name().to_owned()));
		}
		self.commands.insert(spec.name().to_owned(), spec);
		Ok(())
	}

	pub fn lookup(&self, name: &str) -> Result<&CommandSpec, RegistryError> {
		self.commands
			.get(name)
			.ok_or_else(|| RegistryError::UnknownCommand(name.to_owned()))
	}
}

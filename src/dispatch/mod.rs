// Modules
pub mod invocation;
pub mod outcome;
pub mod registry;

// Uses
use std::{any::Any, panic::AssertUnwindSafe};

use futures::FutureExt;

use self::{
	invocation::Invocation,
	outcome::{format, Outcome, ResponseEnvelope},
	registry::{CommandRegistry, CommandSpec},
};
use crate::platform::PlatformClient;

// Functions

/// Resolve, validate, and execute an invocation, then render the outcome.
///
/// No handler failure may terminate the dispatch path: unknown commands,
/// argument mismatches, and even handler panics all come back as a rendered
/// envelope for the invoker.
pub async fn dispatch(
	registry: &CommandRegistry,
	platform: &dyn PlatformClient,
	invocation: Invocation,
) -> ResponseEnvelope {
	let spec = match registry.lookup(&invocation.command) {
		Ok(spec) => spec,
		Err(error) => {
			return format(Outcome::fault(
				"This command is not recognized.",
				format!(
					"{} (invoker: {} `{}`)",
					error, invocation.caller.invoker_id, invocation.caller.invoker_name
				),
			));
		}
	};

	if let Err(detail) = validate_args(spec, &invocation) {
		return format(Outcome::rejection(format!("Invalid arguments: {}", detail)));
	}

	let outcome = match AssertUnwindSafe(spec.handler().run(&invocation, platform))
		.catch_unwind()
		.await
	{
		Ok(outcome) => outcome,
		Err(panic) => Outcome::fault(
			"The command failed unexpectedly.",
			format!(
				"command `{}` panicked: {}",
				invocation.command,
				panic_message(&*panic)
			),
		),
	};

	format(outcome)
}

/// Presence and type validation of the supplied arguments against the
/// declared parameter schema. Reference resolution is the platform layer's
/// job; only the shape is checked here.
fn validate_args(spec: &CommandSpec, invocation: &Invocation) -> Result<(), String> {
	for param in spec.params() {
		match invocation.args.get(&param.name) {
			Some(value) if value.kind() == param.kind => {}
			Some(_) => return Err(format!("parameter `{}` has the wrong type", param.name)),
			None if param.required => {
				return Err(format!("required parameter `{}` is missing", param.name));
			}
			None => {}
		}
	}
	for name in invocation.args.keys() {
		if !spec.params().iter().any(|param| &param.name == name) {
			return Err(format!("unexpected parameter `{}`", name));
		}
	}
	Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(text) = payload.downcast_ref::<&str>() {
		(*text).to_owned()
	} else if let Some(text) = payload.downcast_ref::<String>() {
		text.clone()
	} else {
		"non-string panic payload".to_owned()
	}
}

// Uses
use crate::{constants::MAINTAINER_CONTACT, platform::PlatformFailure};

// Types

/// The classified result of executing a command handler. Exactly one variant
/// is produced per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	Success {
		title: Option<String>,
		summary: String,
		footer: Option<String>,
		accent: Option<u32>,
	},
	/// An expected business-rule violation, e.g. a duplicate role assignment.
	DomainRejection { reason: String },
	/// The platform rejected an operation.
	PlatformError {
		message: String,
		debug_trace: String,
	},
	/// An unexpected, unclassified failure.
	Fault {
		message: String,
		debug_trace: String,
	},
}

impl Outcome {
	#[must_use]
	pub fn success<S: ToString>(summary: S) -> Self {
		Self::Success {
			title: None,
			summary: summary.to_string(),
			footer: None,
			accent: None,
		}
	}

	#[must_use]
	pub fn rejection<S: ToString>(reason: S) -> Self {
		Self::DomainRejection {
			reason: reason.to_string(),
		}
	}

	#[must_use]
	pub fn platform_error<S: ToString, T: ToString>(message: S, debug_trace: T) -> Self {
		Self::PlatformError {
			message: message.to_string(),
			debug_trace: debug_trace.to_string(),
		}
	}

	#[must_use]
	pub fn fault<S: ToString, T: ToString>(message: S, debug_trace: T) -> Self {
		Self::Fault {
			message: message.to_string(),
			debug_trace: debug_trace.to_string(),
		}
	}
}

impl From<PlatformFailure> for Outcome {
	fn from(failure: PlatformFailure) -> Self {
		match failure {
			PlatformFailure::NotFound => Self::platform_error(
				"The platform reported the requested entity as missing.",
				"entity lookup returned not-found",
			),
			PlatformFailure::Unauthorized { debug_trace } => Self::platform_error(
				"Permission or role-hierarchy violation. Please check the role hierarchy and \
				 permissions.",
				debug_trace,
			),
			PlatformFailure::Other {
				message,
				debug_trace,
			} => Self::platform_error(
				format!("This was the platform's response:\n> {}", message),
				debug_trace,
			),
		}
	}
}

/// How a rendered response should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
	Ok,
	Warn,
	Error,
}

/// The platform-agnostic render target handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
	pub title: Option<String>,
	pub body: String,
	pub severity: Severity,
	pub footer: Option<String>,
	pub accent: Option<u32>,
}

// Functions

/// Render an outcome into a response envelope. Total: every variant maps to a
/// readable message.
#[must_use]
pub fn format(outcome: Outcome) -> ResponseEnvelope {
	match outcome {
		Outcome::Success {
			title,
			summary,
			footer,
			accent,
		} => ResponseEnvelope {
			title,
			body: summary,
			severity: Severity::Ok,
			footer,
			accent,
		},
		Outcome::DomainRejection { reason } => ResponseEnvelope {
			title: None,
			body: reason,
			severity: Severity::Warn,
			footer: None,
			accent: None,
		},
		Outcome::PlatformError {
			message,
			debug_trace,
		} => ResponseEnvelope {
			title: None,
			body: format!(
				"{}\n\n{}",
				message,
				contact_instruction(&debug_trace)
			),
			severity: Severity::Error,
			footer: None,
			accent: None,
		},
		Outcome::Fault {
			message,
			debug_trace,
		} => ResponseEnvelope {
			title: None,
			body: format!(
				"Something went wrong while handling this command!\n\n{}",
				contact_instruction(&format!("{}\n{}", message, debug_trace))
			),
			severity: Severity::Error,
			footer: None,
			accent: None,
		},
	}
}

fn contact_instruction(debug_trace: &str) -> String {
	format!(
		"If you would like to contact the bot owner about this, please go to \
		 {} and include the following debugging information in the message:\n```\n{}\n```",
		MAINTAINER_CONTACT,
		debug_trace
	)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn success_maps_to_ok_and_passes_title_and_footer_through() {
		let envelope = format(Outcome::Success {
			title: Some("Role info".to_owned()),
			summary: "Name: Blue".to_owned(),
			footer: Some("Id: 42".to_owned()),
			accent: Some(0x0000ff),
		});

		assert_eq!(envelope.severity, Severity::Ok);
		assert_eq!(envelope.title.as_deref(), Some("Role info"));
		assert_eq!(envelope.body, "Name: Blue");
		assert_eq!(envelope.footer.as_deref(), Some("Id: 42"));
		assert_eq!(envelope.accent, Some(0x0000ff));
	}

	#[test]
	fn rejection_maps_to_warn() {
		let envelope = format(Outcome::rejection("The user already has this role!"));

		assert_eq!(envelope.severity, Severity::Warn);
		assert_eq!(envelope.body, "The user already has this role!");
		assert_eq!(envelope.title, None);
	}

	#[test]
	fn platform_error_carries_the_contact_instruction_and_trace() {
		let envelope = format(Outcome::platform_error("Denied.", "status 403"));

		assert_eq!(envelope.severity, Severity::Error);
		assert!(envelope.body.starts_with("Denied."));
		assert!(envelope.body.contains(crate::constants::MAINTAINER_CONTACT));
		assert!(envelope.body.contains("status 403"));
	}

	#[test]
	fn fault_is_rendered_as_a_generic_error_with_the_trace() {
		let envelope = format(Outcome::fault("boom", "at line 3"));

		assert_eq!(envelope.severity, Severity::Error);
		assert!(envelope.body.contains("Something went wrong"));
		assert!(envelope.body.contains("boom"));
		assert!(envelope.body.contains("at line 3"));
	}

	#[test]
	fn unauthorized_failures_become_hierarchy_platform_errors() {
		let outcome = Outcome::from(crate::platform::PlatformFailure::Unauthorized {
			debug_trace: "status 403".to_owned(),
		});

		let Outcome::PlatformError { message, .. } = outcome else {
			panic!("expected a platform error");
		};
		assert!(message.contains("role hierarchy"));
	}
}

// Uses
use async_trait::async_trait;
use poise::command;

use super::caller_context;
use crate::{
	dispatch::{
		invocation::{ArgValue, Invocation},
		outcome::Outcome,
		registry::CommandHandler,
	},
	platform::PlatformClient,
	util::dispatch_and_reply,
	Error, PoiseContext,
};

// Constants
const COIN_SIDES: [&str; 2] = ["Heads", "Tails"];

// Commands

/// Flip a coin.
#[command(slash_command)]
pub async fn coin(ctx: PoiseContext<'_>) -> Result<(), Error> {
	let invocation = Invocation::new("coin", caller_context(&ctx).await);
	dispatch_and_reply(ctx, invocation).await
}

/// Pick a random number, `from` inclusive to `to` exclusive.
#[command(slash_command)]
pub async fn random(
	ctx: PoiseContext<'_>,
	#[description = "The lowest number that can be drawn."] from: i64,
	#[description = "One above the highest number that can be drawn."] to: i64,
) -> Result<(), Error> {
	let invocation = Invocation::new("random", caller_context(&ctx).await)
		.with_arg("from", ArgValue::Integer(from))
		.with_arg("to", ArgValue::Integer(to));
	dispatch_and_reply(ctx, invocation).await
}

// Handlers

pub struct CoinFlip;

#[async_trait]
impl CommandHandler for CoinFlip {
	async fn run(&self, invocation: &Invocation, _platform: &dyn PlatformClient) -> Outcome {
		let side = COIN_SIDES[invocation.caller.random.index(COIN_SIDES.len())];
		Outcome::success(format!("You got: **{}**", side))
	}
}

pub struct RandomInRange;

#[async_trait]
impl CommandHandler for RandomInRange {
	async fn run(&self, invocation: &Invocation, _platform: &dyn PlatformClient) -> Outcome {
		let (Some(from), Some(to)) = (invocation.integer("from"), invocation.integer("to"))
		else {
			return Outcome::fault(
				"The command failed unexpectedly.",
				"random invoked without validated integer arguments",
			);
		};

		if from >= to {
			return Outcome::rejection("Invalid arguments: `from` must be less than `to`.");
		}

		Outcome::success(format!(
			"Random number: {}",
			invocation.caller.random.int_in(from, to)
		))
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use pretty_assertions::assert_eq;

	use super::*;
	use crate::{
		commands::build_registry,
		dispatch::{dispatch, invocation::CallerContext, outcome::Severity},
		platform::testing::FakePlatform,
	};

	fn summary_of(outcome: Outcome) -> String {
		let Outcome::Success { summary, .. } = outcome else {
			panic!("expected a success, got {:?}", outcome);
		};
		summary
	}

	#[tokio::test]
	async fn the_coin_lands_on_both_sides_over_repeated_flips() {
		let platform = FakePlatform::new();
		let invocation = Invocation::new("coin", CallerContext::for_tests(3));

		let mut seen = HashSet::new();
		for _ in 0..200 {
			let summary = summary_of(CoinFlip.run(&invocation, &platform).await);
			let side = COIN_SIDES
				.iter()
				.find(|side| summary.contains(*side))
				.copied()
				.expect("summary names neither coin side");
			seen.insert(side);
		}

		assert_eq!(seen.len(), COIN_SIDES.len());
	}

	#[tokio::test]
	async fn random_draws_stay_in_the_requested_range() {
		let platform = FakePlatform::new();
		let invocation = Invocation::new("random", CallerContext::for_tests(11))
			.with_arg("from", ArgValue::Integer(1))
			.with_arg("to", ArgValue::Integer(10));

		for _ in 0..1000 {
			let summary = summary_of(RandomInRange.run(&invocation, &platform).await);
			let value = summary
				.rsplit(' ')
				.next()
				.unwrap()
				.parse::<i64>()
				.expect("summary does not end with the drawn number");
			assert!((1..10).contains(&value));
		}
	}

	#[tokio::test]
	async fn random_draws_repeat_under_the_same_seed() {
		let platform = FakePlatform::new();

		let mut summaries = Vec::new();
		for _ in 0..2 {
			let invocation = Invocation::new("random", CallerContext::for_tests(29))
				.with_arg("from", ArgValue::Integer(-50))
				.with_arg("to", ArgValue::Integer(50));
			summaries.push(summary_of(RandomInRange.run(&invocation, &platform).await));
		}

		assert_eq!(summaries[0], summaries[1]);
	}

	#[tokio::test]
	async fn an_empty_range_is_rejected_not_faulted() {
		let registry = build_registry().unwrap();
		let platform = FakePlatform::new();

		let envelope = dispatch(
			&registry,
			&platform,
			Invocation::new("random", CallerContext::for_tests(5))
				.with_arg("from", ArgValue::Integer(1))
				.with_arg("to", ArgValue::Integer(1)),
		)
		.await;

		assert_eq!(envelope.severity, Severity::Warn);
		assert!(envelope.body.starts_with("Invalid arguments"));
	}

	#[tokio::test]
	async fn a_reversed_range_is_rejected_not_faulted() {
		let registry = build_registry().unwrap();
		let platform = FakePlatform::new();

		let envelope = dispatch(
			&registry,
			&platform,
			Invocation::new("random", CallerContext::for_tests(5))
				.with_arg("from", ArgValue::Integer(10))
				.with_arg("to", ArgValue::Integer(1)),
		)
		.await;

		assert_eq!(envelope.severity, Severity::Warn);
	}
}

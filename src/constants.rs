// Uses
use lazy_static::lazy_static;
use poise::serenity_prelude::Colour;
use yansi::{Color, Style};

// Constants
pub const PROGRAM_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const TOKEN_NAME: &str = "DISCORD_TOKEN";
pub const MAINTAINER_CONTACT: &str = "https://t.me/cerium_maintainer";

// Embed Colours
pub const OKAY_COLOUR: Colour = Colour(0x57f287);
pub const WARN_COLOUR: Colour = Colour(0xfee75c);
pub const ERROR_COLOUR: Colour = Colour(0xed4245);

// Style Constants
lazy_static! {
	pub static ref HEADER_STYLE: Style = Style::new(Color::Cyan).bold().wrap();
	pub static ref OKAY_STYLE: Style = Style::new(Color::Green).bold();
	pub static ref ERROR_STYLE: Style = Style::new(Color::Red).bold();
}

//! Secret command - the obfuscation used for remembered passwords.

use anyhow::{Context as _, Result};
use blogdeck_session::obfuscate;
use clap::{Args, Subcommand};

use super::Context;
use crate::output::print_json;

/// Arguments for the secret command.
#[derive(Args, Debug)]
pub struct SecretArgs {
    #[command(subcommand)]
    pub command: SecretCommand,
}

#[derive(Subcommand, Debug)]
pub enum SecretCommand {
    /// Obfuscate plain text
    Encode {
        /// Text to obfuscate
        text: String,
    },

    /// Reveal an obfuscated token
    Decode {
        /// Token to reveal
        token: String,
    },
}

/// Run the secret command.
pub fn run(args: SecretArgs, ctx: &Context) -> Result<()> {
    let output = match args.command {
        SecretCommand::Encode { text } => obfuscate::encode(&text),
        SecretCommand::Decode { token } => {
            obfuscate::decode(&token).context("token could not be decoded")?
        }
    };

    if ctx.json_output {
        print_json(&serde_json::json!({ "value": output }))
    } else {
        println!("{}", output);
        Ok(())
    }
}

//! Login, logout, and whoami.

use anyhow::{Result, bail};
use blogdeck_client::LoginRequest;
use blogdeck_session::{RememberedLogin, Session};
use clap::Args;
use console::{Style, style};
use serde::Serialize;
use tracing::debug;

use super::Context;
use crate::output::{header, print_json};

/// Arguments for the login command.
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username (defaults to the remembered one)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password (prompted for when omitted)
    #[arg(short, long, env = "BLOGDECK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Sign in with an email address and emailed code instead
    #[arg(long, conflicts_with_all = ["username", "password"], requires = "code")]
    pub email: Option<String>,

    /// Code sent to --email
    #[arg(long)]
    pub code: Option<String>,

    /// Remember these credentials for next time
    #[arg(long, conflicts_with = "forget")]
    pub remember: bool,

    /// Drop remembered credentials
    #[arg(long)]
    pub forget: bool,
}

/// Arguments for the whoami command.
#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Re-fetch the profile from the server
    #[arg(long)]
    pub refresh: bool,
}

/// Run the login command.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.storage()?;
    let remembered = RememberedLogin::new(ctx.flavor(), storage.clone());
    remembered.cleanup_legacy()?;
    if args.forget {
        remembered.forget()?;
    }

    let session = ctx.session(storage);
    let client = ctx.client(&session)?;

    let (request, credentials) = match (args.email, args.code) {
        (Some(email), Some(code)) => (LoginRequest::email_code(email, code), None),
        _ => {
            let recalled = if args.forget { None } else { remembered.recall() };
            let username = match args.username.or_else(|| recalled.as_ref().map(|r| r.username.clone())) {
                Some(username) if !username.is_empty() => username,
                _ => bail!("a username is required (use --username)"),
            };
            let password = match args.password {
                Some(password) => password,
                None => match recalled.filter(|r| r.username == username && !r.password.is_empty()) {
                    Some(r) => {
                        debug!("Using remembered password");
                        r.password
                    }
                    None => rpassword::prompt_password(format!("Password for {}: ", username))?,
                },
            };
            (
                LoginRequest::password(username.clone(), password.clone()),
                Some((username, password)),
            )
        }
    };

    let signed_in = session.login(&client, &request).await?;

    if args.remember
        && let Some((username, password)) = credentials
    {
        remembered.remember(&username, &password)?;
    }

    if ctx.json_output {
        print_json(&signed_in)?;
    } else {
        let green = Style::new().green();
        let name = signed_in
            .user_info
            .as_ref()
            .map(|u| u.display_name().to_string())
            .unwrap_or_default();
        println!("{} Signed in as {}", green.apply_to("✓"), style(name).bold());
    }
    Ok(())
}

/// Run the logout command.
pub async fn logout(ctx: &Context) -> Result<()> {
    let (session, client) = ctx.connect()?;

    if session.session().has_token() {
        // Best effort: the local session goes regardless.
        if let Err(e) = client.users().logout().await {
            debug!(error = %e, "Server-side logout failed");
        }
    }
    session.logout();

    if ctx.json_output {
        print_json(&serde_json::json!({ "signedOut": true }))?;
    } else {
        println!("Signed out");
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WhoamiView<'a> {
    flavor: String,
    signed_in: bool,
    admin: bool,
    #[serde(flatten)]
    session: &'a Session,
}

/// Run the whoami command.
pub async fn whoami(args: WhoamiArgs, ctx: &Context) -> Result<()> {
    let (session, client) = ctx.connect()?;
    if args.refresh {
        session.refresh_profile(&client).await?;
    }

    let snapshot = session.session();
    if ctx.json_output {
        return print_json(&WhoamiView {
            flavor: ctx.flavor().to_string(),
            signed_in: snapshot.is_login(),
            admin: snapshot.is_admin(),
            session: &snapshot,
        });
    }

    let dim = Style::new().dim();
    let Some(user) = snapshot.user_info.as_ref().filter(|_| snapshot.has_token()) else {
        println!("{}", dim.apply_to("Not signed in"));
        return Ok(());
    };

    header(&format!("{} ({})", user.display_name(), ctx.flavor()));
    println!("Username:  {}", user.username);
    if let Some(email) = &user.email {
        println!("Email:     {}", email);
    }
    if let Some(id) = user.id {
        println!("ID:        {}", id);
    }
    println!(
        "Role:      {}",
        if snapshot.is_admin() {
            "administrator"
        } else {
            "user"
        }
    );
    if ctx.verbose {
        println!("{}", dim.apply_to(format!("Server:    {}", ctx.settings.base_url)));
        println!(
            "{}",
            dim.apply_to(format!("Storage:   {}", ctx.settings.storage_path.display()))
        );
    }
    Ok(())
}

//! Navigate command - run the route guard against the stored session.

use std::sync::Arc;

use anyhow::Result;
use blogdeck_router::{Decision, DecisionKind, ResolvedRoute, Router};
use clap::Args;
use console::{Style, style};
use serde::Serialize;

use super::Context;
use crate::output::{ConsoleNavigator, ConsoleNotifier, print_json};

/// Arguments for the navigate command.
#[derive(Args, Debug)]
pub struct NavigateArgs {
    /// Page path, e.g. /settings or /article/3
    pub path: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NavigationView {
    route: ResolvedRoute,
    decision: DecisionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<String>,
    landed: Option<String>,
    title: String,
}

/// Run the navigate command.
pub fn run(args: NavigateArgs, ctx: &Context) -> Result<()> {
    let session = ctx.session(ctx.storage()?);
    let router = Router::new(ctx.flavor());
    // JSON output stays machine-readable; notices ride along in the payload.
    let router = if ctx.json_output {
        router
    } else {
        router
            .with_notifier(Arc::new(ConsoleNotifier))
            .with_navigator(Arc::new(ConsoleNavigator))
    };

    let route = router.resolve(&args.path);
    let decision = router.navigate(&args.path, &session.session());

    if ctx.json_output {
        return print_json(&NavigationView {
            route,
            decision: DecisionKind::from(&decision),
            redirect: decision.redirect_target().map(str::to_string),
            notice: decision.notice().map(|n| n.message.clone()),
            landed: router.current_path(),
            title: router.document_title(),
        });
    }

    let dim = Style::new().dim();
    match &decision {
        Decision::Allow => println!(
            "{} {} {}",
            Style::new().green().apply_to("allow"),
            style(&route.path).bold(),
            dim.apply_to(route.name.as_deref().unwrap_or("unmatched"))
        ),
        Decision::RedirectTo { path, .. } => println!(
            "{} {} → {}",
            Style::new().yellow().apply_to("redirect"),
            route.path,
            path
        ),
        Decision::Deny { redirect, .. } => println!(
            "{} {} → {}",
            Style::new().red().apply_to("deny"),
            route.path,
            redirect
        ),
    }
    if ctx.verbose {
        println!("{}", dim.apply_to(format!("title: {}", router.document_title())));
    }
    Ok(())
}

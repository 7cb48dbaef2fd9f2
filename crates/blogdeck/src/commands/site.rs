//! Categories, tags, comments, and settings listings.

use anyhow::{Result, bail};
use blogdeck_client::{Comment, Flavor, PageQuery};
use clap::Args;
use console::Style;

use super::Context;
use crate::output::{header, print_json, truncate};

/// Arguments for the comments command.
#[derive(Args, Debug)]
pub struct CommentsArgs {
    /// Article ID
    pub article_id: i64,

    #[arg(long, default_value = "1")]
    pub page: u32,

    #[arg(long, default_value = "20")]
    pub size: u32,
}

pub async fn categories(ctx: &Context) -> Result<()> {
    let (_session, client) = ctx.connect()?;
    let categories = client.categories().list().await?;
    if ctx.json_output {
        return print_json(&categories);
    }

    let dim = Style::new().dim();
    header("Categories");
    if categories.is_empty() {
        println!("{}", dim.apply_to("No categories"));
    }
    for category in &categories {
        let count = category
            .count
            .map(|c| format!(" ({})", c))
            .unwrap_or_default();
        println!(
            "{} {}{}",
            dim.apply_to(format!("[{:>3}]", category.id.unwrap_or_default())),
            category.name,
            dim.apply_to(count)
        );
    }
    Ok(())
}

pub async fn tags(ctx: &Context) -> Result<()> {
    let (_session, client) = ctx.connect()?;
    let tags = client.tags().list().await?;
    if ctx.json_output {
        return print_json(&tags);
    }

    let dim = Style::new().dim();
    header("Tags");
    if tags.is_empty() {
        println!("{}", dim.apply_to("No tags"));
    }
    for tag in &tags {
        println!(
            "{} {}",
            dim.apply_to(format!("[{:>3}]", tag.id.unwrap_or_default())),
            tag.name
        );
    }
    Ok(())
}

pub async fn comments(args: CommentsArgs, ctx: &Context) -> Result<()> {
    let (_session, client) = ctx.connect()?;
    let page = client
        .comments()
        .for_article(args.article_id, PageQuery::new(args.page, args.size))
        .await?;
    if ctx.json_output {
        return print_json(&page);
    }

    header(&format!("Comments on article {}", args.article_id));
    if page.list.is_empty() {
        println!("{}", Style::new().dim().apply_to("No comments yet"));
        return Ok(());
    }
    for comment in &page.list {
        print_comment(comment, 0);
    }
    Ok(())
}

fn print_comment(comment: &Comment, depth: usize) {
    let dim = Style::new().dim();
    let author = comment
        .user
        .as_ref()
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "anonymous".to_string());
    let indent = "  ".repeat(depth);
    println!(
        "{}{} {}",
        indent,
        Style::new().bold().apply_to(author),
        dim.apply_to(comment.create_time.as_deref().unwrap_or(""))
    );
    println!("{}  {}", indent, truncate(&comment.content, 100));
    for reply in &comment.replies {
        print_comment(reply, depth + 1);
    }
}

pub async fn settings(ctx: &Context) -> Result<()> {
    if ctx.flavor() != Flavor::Console {
        bail!("settings are only available to the console (use --console)");
    }

    let (_session, client) = ctx.connect()?;
    let settings = client.settings().list().await?;
    if ctx.json_output {
        return print_json(&settings);
    }

    let dim = Style::new().dim();
    header("Settings");
    for setting in &settings {
        println!("{:<24} {}", setting.key, setting.value);
        if ctx.verbose
            && let Some(description) = &setting.description
        {
            println!("{:<24} {}", "", dim.apply_to(description));
        }
    }
    Ok(())
}

//! Articles command - list, show, and search articles.

use anyhow::Result;
use blogdeck_client::{Article, ArticleQuery, PageQuery, PageResult};
use blogdeck_session::ArticleCache;
use clap::{Args, Subcommand};
use console::{Style, style};

use super::Context;
use crate::output::{header, print_json, truncate};

/// Arguments for the articles command.
#[derive(Args, Debug)]
pub struct ArticlesArgs {
    #[command(subcommand)]
    pub command: ArticlesCommand,
}

#[derive(Subcommand, Debug)]
pub enum ArticlesCommand {
    /// List published articles
    List {
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: u32,

        /// Articles per page
        #[arg(long, default_value = "10")]
        size: u32,

        /// Only titles containing this text
        #[arg(long)]
        title: Option<String>,

        /// Only articles in this category
        #[arg(long)]
        category: Option<i64>,
    },

    /// Show a single article
    Show {
        /// Article ID
        id: i64,
    },

    /// Full-text search
    Search {
        /// Search keyword
        keyword: String,

        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long, default_value = "10")]
        size: u32,
    },
}

/// Run the articles command.
pub async fn run(args: ArticlesArgs, ctx: &Context) -> Result<()> {
    let (_session, client) = ctx.connect()?;
    let cache = ArticleCache::new();

    match args.command {
        ArticlesCommand::List {
            page,
            size,
            title,
            category,
        } => {
            let query = ArticleQuery {
                page_num: Some(page),
                page_size: Some(size),
                title,
                category_id: category,
                ..Default::default()
            };
            let result = cache.fetch_list(&client, &query).await?;
            print_page("Articles", &result, page, ctx)
        }
        ArticlesCommand::Search {
            keyword,
            page,
            size,
        } => {
            let result = cache
                .search(&client, &keyword, PageQuery::new(page, size))
                .await?;
            print_page(&format!("Search: \"{}\"", keyword), &result, page, ctx)
        }
        ArticlesCommand::Show { id } => {
            let article = cache.fetch_detail(&client, id).await?;
            if ctx.json_output {
                return print_json(&article);
            }
            print_article(&article);
            Ok(())
        }
    }
}

fn print_page(title: &str, page: &PageResult<Article>, page_num: u32, ctx: &Context) -> Result<()> {
    if ctx.json_output {
        return print_json(page);
    }

    let dim = Style::new().dim();
    header(title);
    if page.list.is_empty() {
        println!("{}", dim.apply_to("No articles found"));
        return Ok(());
    }

    for article in &page.list {
        let id = article.id.map(|id| id.to_string()).unwrap_or_default();
        println!(
            "{} {}",
            dim.apply_to(format!("[{:>4}]", id)),
            truncate(&article.title, 60)
        );
        if ctx.verbose
            && let Some(summary) = &article.summary
        {
            println!("       {}", dim.apply_to(truncate(summary, 70)));
        }
    }
    println!();
    println!(
        "{}",
        dim.apply_to(format!(
            "page {} · {} of {} total",
            page_num,
            page.list.len(),
            page.total
        ))
    );
    Ok(())
}

fn print_article(article: &Article) {
    let dim = Style::new().dim();
    header(&article.title);

    let mut facts = Vec::new();
    if let Some(author) = &article.author_name {
        facts.push(format!("by {}", author));
    }
    if let Some(category) = &article.category_name {
        facts.push(format!("in {}", category));
    }
    if let Some(time) = article.publish_time.as_ref().or(article.create_time.as_ref()) {
        facts.push(time.clone());
    }
    if let Some(views) = article.view_count {
        facts.push(format!("{} views", views));
    }
    if !facts.is_empty() {
        println!("{}", dim.apply_to(facts.join(" · ")));
    }

    let tags: Vec<&str> = article.tag_list.iter().map(|t| t.name.as_str()).collect();
    if !tags.is_empty() {
        println!("{}", style(format!("#{}", tags.join(" #"))).cyan());
    }

    println!();
    match (&article.content, &article.summary) {
        (Some(content), _) => println!("{}", content),
        (None, Some(summary)) => println!("{}", summary),
        (None, None) => println!("{}", dim.apply_to("(no content)")),
    }
}

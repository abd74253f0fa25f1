//
//  campus-client
//  cli/forum.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Forum commands: list threads, read a thread, reply.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::api::services::{ForumPost, NewReply, PostFilter, Reply};
use crate::api::PaginatedResult;
use crate::output::{print_field, print_header, truncate, TableBuilder, TableOutput};

use super::{page_footer, GlobalOptions, PageArgs};

#[derive(Args, Debug)]
pub struct ForumCommand {
    #[command(subcommand)]
    pub command: ForumSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ForumSubcommand {
    /// List threads
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Read a thread and its replies
    View(ViewArgs),

    /// Reply to a thread
    Reply(ReplyArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by category
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Filter by author username
    #[arg(long, short = 'a')]
    pub author: Option<String>,

    /// Search in titles and bodies
    #[arg(long, short = 'S')]
    pub search: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Post ID
    pub id: String,
}

#[derive(Args, Debug)]
pub struct ReplyArgs {
    /// Post ID
    pub id: String,

    /// Reply text
    #[arg(long, short = 'b')]
    pub body: String,

    /// Reply to another reply instead of the thread
    #[arg(long)]
    pub parent: Option<String>,
}

impl ForumCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ForumSubcommand::List(args) => list(args, global).await,
            ForumSubcommand::View(args) => view(args, global).await,
            ForumSubcommand::Reply(args) => reply(args, global).await,
        }
    }
}

async fn list(args: &ListArgs, global: &GlobalOptions) -> Result<()> {
    let client = global.client()?;
    let filter = PostFilter {
        page: args.page.query(),
        category: args.category.clone(),
        author: args.author.clone(),
        search: args.search.clone(),
    };

    let page = client.forum().list_posts(&filter).await.into_result()?;
    global.writer().write(&page)
}

async fn view(args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
    let client = global.client()?;
    let forum = client.forum();

    let post = forum.get_post(&args.id).await.into_result()?;
    let replies = forum.replies(&args.id).await.into_result()?;

    global.writer().write(&Thread { post, replies })
}

async fn reply(args: &ReplyArgs, global: &GlobalOptions) -> Result<()> {
    if args.body.trim().is_empty() {
        bail!("Reply body cannot be empty");
    }

    let client = global.client()?;
    if !client.is_authenticated() {
        bail!("Not logged in. Run 'campus auth login' first.");
    }

    let mut new_reply = NewReply::new(&args.id, &args.body);
    if let Some(parent) = &args.parent {
        new_reply = new_reply.in_reply_to(parent);
    }

    let created = client.forum().submit_reply(&new_reply).await.into_result()?;

    let writer = global.writer();
    writer.write_success(&format!("Replied to post {}", args.id));
    writer.write_raw(&created, &format!("Reply ID: {}", created.id))
}

impl TableOutput for PaginatedResult<ForumPost> {
    fn print_table(&self, color: bool) {
        if self.items.is_empty() {
            println!("No posts found");
            return;
        }

        TableBuilder::new()
            .color(color)
            .headers(["ID", "TITLE", "AUTHOR", "REPLIES", "LIKES"])
            .rows(self.items.iter().map(|p| {
                [
                    p.id.clone(),
                    truncate(&p.title, 52),
                    p.author.username.clone(),
                    p.reply_count.to_string(),
                    p.likes.to_string(),
                ]
            }))
            .print();
        println!("{}", page_footer(self));
    }
}

#[derive(Debug, Serialize)]
struct Thread {
    post: ForumPost,
    replies: Vec<Reply>,
}

impl TableOutput for Thread {
    fn print_table(&self, color: bool) {
        let post = &self.post;
        print_header(&post.title);
        print_field("Author", &post.author.username, color);
        if let Some(created) = post.created_at {
            print_field("Posted", &created.format("%Y-%m-%d %H:%M").to_string(), color);
        }
        if let Some(category) = &post.category {
            print_field("Category", category, color);
        }
        print_field("Likes", &post.likes.to_string(), color);
        println!();
        println!("{}", post.content);
        println!();

        print_header(&format!("{} replies", self.replies.len()));
        for reply in &self.replies {
            reply.print_table(color);
        }
    }
}

impl TableOutput for Reply {
    fn print_table(&self, color: bool) {
        let author = if color {
            style(&self.author.username).cyan().bold().to_string()
        } else {
            self.author.username.clone()
        };
        let indent = if self.parent_id.is_some() { "    " } else { "" };
        let when = self
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();

        println!("{}{} {}", indent, author, style(when).dim());
        for line in self.content.lines() {
            println!("{}  {}", indent, line);
        }
        println!();
    }
}

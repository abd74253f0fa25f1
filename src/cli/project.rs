//
//  campus-client
//  cli/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Project commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::services::Project;
use crate::api::PaginatedResult;
use crate::output::{format_status, print_field, print_header, truncate, TableBuilder, TableOutput};

use super::{page_footer, GlobalOptions, PageArgs};

#[derive(Args, Debug)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    /// List projects
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View a project
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Project ID
    pub id: String,
}

impl ProjectCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let projects = client.projects();
        let writer = global.writer();

        match &self.command {
            ProjectSubcommand::List(args) => {
                let page = projects.list(&args.page.query()).await.into_result()?;
                writer.write(&page)
            }
            ProjectSubcommand::View(args) => {
                let project = projects.get(&args.id).await.into_result()?;
                writer.write(&project)
            }
        }
    }
}

impl TableOutput for PaginatedResult<Project> {
    fn print_table(&self, color: bool) {
        if self.items.is_empty() {
            println!("No projects found");
            return;
        }

        TableBuilder::new()
            .color(color)
            .headers(["ID", "TITLE", "OWNER", "STATUS", "LIKES"])
            .rows(self.items.iter().map(|p| {
                [
                    p.id.clone(),
                    truncate(&p.title, 48),
                    p.owner.username.clone(),
                    format_status(&p.status.to_string(), color),
                    p.likes.to_string(),
                ]
            }))
            .print();
        println!("{}", page_footer(self));
    }
}

impl TableOutput for Project {
    fn print_table(&self, color: bool) {
        print_header(&self.title);
        print_field("ID", &self.id, color);
        print_field("Owner", &self.owner.username, color);
        print_field("Status", &format_status(&self.status.to_string(), color), color);
        if !self.tags.is_empty() {
            print_field("Tags", &self.tags.join(", "), color);
        }
        if let Some(repo) = &self.repository_url {
            print_field("Repository", repo, color);
        }
        if let Some(demo) = &self.demo_url {
            print_field("Demo", demo, color);
        }
        if let Some(updated) = self.updated_at.or(self.created_at) {
            print_field("Updated", &updated.format("%Y-%m-%d").to_string(), color);
        }

        if !self.description.is_empty() {
            println!();
            println!("{}", self.description);
        }

        if !self.files.is_empty() {
            println!();
            TableBuilder::new()
                .color(color)
                .headers(["FILE", "SIZE", "URL"])
                .rows(
                    self.files
                        .iter()
                        .map(|f| [f.name.clone(), human_size(f.size), f.url.clone()]),
                )
                .print();
        }
    }
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MB");
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use miniblog_store::SearchScope;
use miniblog_types::{BlogId, BlogPatch, CommentId, NewBlog};

#[derive(Parser, Debug)]
#[command(name = "miniblog", about = "Mini Blog: write, browse, and discuss posts", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the blog data (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List posts, newest last
    List(ListArgs),
    /// Show one post with its comments
    Show(ShowArgs),
    /// Publish a new post
    Create(CreateArgs),
    /// Change fields of an existing post
    Edit(EditArgs),
    /// Delete a post and its comments
    Delete(DeleteArgs),
    /// Find posts containing a term
    Search(SearchArgs),
    /// Show post counts per category
    Categories,
    /// Add or remove comments
    Comment(CommentArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only posts in this category ("All" for every post)
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    pub id: BlogId,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub content: String,
    #[arg(long)]
    pub author: String,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub cover_image: String,
    /// Read-time label; derived from the content length when omitted
    #[arg(long)]
    pub read_time: Option<String>,
}

impl CreateArgs {
    pub fn into_new_blog(self) -> NewBlog {
        let new = NewBlog::new(
            self.title,
            self.content,
            self.author,
            self.category,
            self.cover_image,
        );
        match self.read_time {
            Some(label) => new.with_read_time(label),
            None => new,
        }
    }
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: BlogId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub cover_image: Option<String>,
    #[arg(long)]
    pub read_time: Option<String>,
}

impl EditArgs {
    pub fn to_patch(&self) -> BlogPatch {
        BlogPatch {
            title: self.title.clone(),
            content: self.content.clone(),
            author: self.author.clone(),
            category: self.category.clone(),
            cover_image: self.cover_image.clone(),
            read_time: self.read_time.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub id: BlogId,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    pub term: String,
    #[arg(long, default_value = "all")]
    pub scope: SearchScope,
    /// Restrict matches to one category
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args, Debug)]
pub struct CommentArgs {
    #[command(subcommand)]
    pub action: CommentAction,
}

#[derive(Subcommand, Debug)]
pub enum CommentAction {
    /// Comment on a post
    Add {
        blog_id: BlogId,
        #[arg(long)]
        author: String,
        #[arg(long)]
        content: String,
    },
    /// Remove a comment from a post
    Delete {
        blog_id: BlogId,
        comment_id: CommentId,
    },
}

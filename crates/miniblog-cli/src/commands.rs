use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{bail, Context};
use colored::Colorize;
use miniblog_store::{group_by_category, snippet, BlogQuery, BlogStore, SlotStorage, SNIPPET_LEN};
use miniblog_types::{Blog, BlogId, CommentId, NewComment};
use serde::Serialize;

use crate::cli::*;

pub fn run_command<S: SlotStorage, W: Write>(
    store: &BlogStore<S>,
    command: Command,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::List(args) => cmd_list(store, args, format, out),
        Command::Show(args) => cmd_show(store, args.id, format, out),
        Command::Create(args) => cmd_create(store, args, format, out),
        Command::Edit(args) => cmd_edit(store, args, format, out),
        Command::Delete(args) => cmd_delete(store, args.id, format, out),
        Command::Search(args) => cmd_search(store, args, format, out),
        Command::Categories => cmd_categories(store, format, out),
        Command::Comment(args) => match args.action {
            CommentAction::Add { blog_id, author, content } => {
                cmd_comment_add(store, blog_id, NewComment::new(author, content), format, out)
            }
            CommentAction::Delete { blog_id, comment_id } => {
                cmd_comment_delete(store, blog_id, comment_id, format, out)
            }
        },
    }
}

fn cmd_list<S: SlotStorage, W: Write>(
    store: &BlogStore<S>,
    args: ListArgs,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let blogs = match args.category {
        Some(category) => store.by_category(&category)?,
        None => store.list_blogs()?,
    };
    print_blogs(&blogs, format, out)
}

fn cmd_show<S: SlotStorage, W: Write>(
    store: &BlogStore<S>,
    id: BlogId,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let Some(blog) = store.get_blog_by_id(id)? else {
        bail!("blog {id} not found");
    };
    if format == OutputFormat::Json {
        return print_json(&blog, out);
    }

    writeln!(out, "{}", blog.title.bold())?;
    writeln!(
        out,
        "{} · {} · {} · {}",
        blog.author,
        blog.category.cyan(),
        blog.created_at,
        blog.read_time.dimmed()
    )?;
    writeln!(out, "Cover: {}", blog.cover_image.blue())?;
    writeln!(out)?;
    writeln!(out, "{}", blog.content)?;
    writeln!(out)?;
    writeln!(out, "Comments ({})", blog.comments.len())?;
    for comment in &blog.comments {
        writeln!(
            out,
            "  {} {} {}",
            format!("#{}", comment.id).yellow(),
            comment.author.bold(),
            comment.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
        )?;
        writeln!(out, "     {}", comment.content)?;
    }
    Ok(())
}

fn cmd_create<S: SlotStorage, W: Write>(
    store: &BlogStore<S>,
    args: CreateArgs,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let blog = store.create_blog(args.into_new_blog())?;
    if format == OutputFormat::Json {
        return print_json(&blog, out);
    }
    writeln!(out, "{} Created blog {} {}", "✓".green().bold(), format!("#{}", blog.id).yellow(), blog.title.bold())?;
    Ok(())
}

fn cmd_edit<S: SlotStorage, W: Write>(
    store: &BlogStore<S>,
    args: EditArgs,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let patch = args.to_patch();
    if patch.is_empty() {
        bail!("nothing to change; pass at least one field such as --title");
    }
    let Some(blog) = store.update_blog(args.id, patch)? else {
        bail!("blog {} not found", args.id);
    };
    if format == OutputFormat::Json {
        return print_json(&blog, out);
    }
    writeln!(out, "{} Updated blog {} {}", "✓".green().bold(), format!("#{}", blog.id).yellow(), blog.title.bold())?;
    Ok(())
}

fn cmd_delete<S: SlotStorage, W: Write>(
    store: &BlogStore<S>,
    id: BlogId,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let deletion = store.delete_blog(id)?;
    let Some(removed) = deletion.removed else {
        bail!("blog {id} not found");
    };
    if format == OutputFormat::Json {
        return print_json(&removed, out);
    }
    writeln!(
        out,
        "{} Deleted blog {} {} ({} comments, {} posts left)",
        "✓".green().bold(),
        format!("#{id}").yellow(),
        removed.title.bold(),
        removed.comments.len(),
        deletion.remaining.len()
    )?;
    Ok(())
}

fn cmd_search<S: SlotStorage, W: Write>(
    store: &BlogStore<S>,
    args: SearchArgs,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut query = BlogQuery::new().term(args.term).scope(args.scope);
    if let Some(category) = args.category {
        query = query.category(category);
    }
    let blogs = store.query(&query)?;
    print_blogs(&blogs, format, out)
}

fn cmd_categories<S: SlotStorage, W: Write>(
    store: &BlogStore<S>,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let blogs = store.list_blogs()?;
    let counts: BTreeMap<String, usize> = group_by_category(&blogs)
        .into_iter()
        .map(|(name, members)| (name, members.len()))
        .collect();
    if format == OutputFormat::Json {
        return print_json(&counts, out);
    }
    if counts.is_empty() {
        writeln!(out, "No categories.")?;
    }
    for (name, count) in &counts {
        writeln!(out, "{} ({count})", name.cyan())?;
    }
    Ok(())
}

fn cmd_comment_add<S: SlotStorage, W: Write>(
    store: &BlogStore<S>,
    blog_id: BlogId,
    comment: NewComment,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let Some(blog) = store.add_comment(blog_id, comment)? else {
        bail!("blog {blog_id} not found");
    };
    let added = blog
        .comments
        .last()
        .context("comment missing after add")?;
    if format == OutputFormat::Json {
        return print_json(added, out);
    }
    writeln!(
        out,
        "{} Added comment {} to blog {}",
        "✓".green().bold(),
        format!("#{}", added.id).yellow(),
        format!("#{blog_id}").yellow()
    )?;
    Ok(())
}

fn cmd_comment_delete<S: SlotStorage, W: Write>(
    store: &BlogStore<S>,
    blog_id: BlogId,
    comment_id: CommentId,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let Some(blog) = store.get_blog_by_id(blog_id)? else {
        bail!("blog {blog_id} not found");
    };
    if blog.comment(comment_id).is_none() {
        bail!("comment {comment_id} not found on blog {blog_id}");
    }
    let Some(blog) = store.delete_comment(blog_id, comment_id)? else {
        bail!("blog {blog_id} not found");
    };
    if format == OutputFormat::Json {
        return print_json(&blog, out);
    }
    writeln!(
        out,
        "{} Deleted comment {} from blog {}",
        "✓".green().bold(),
        format!("#{comment_id}").yellow(),
        format!("#{blog_id}").yellow()
    )?;
    Ok(())
}

fn print_blogs<W: Write>(blogs: &[Blog], format: OutputFormat, out: &mut W) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return print_json(&blogs, out);
    }
    if blogs.is_empty() {
        writeln!(out, "No posts.")?;
    }
    for blog in blogs {
        writeln!(
            out,
            "{} {}  [{}] {} · {} · {}",
            format!("#{}", blog.id).yellow(),
            blog.title.bold(),
            blog.category.cyan(),
            blog.author,
            blog.created_at,
            blog.read_time.dimmed()
        )?;
        writeln!(out, "    {}", snippet(&blog.content, SNIPPET_LEN).dimmed())?;
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized, W: Write>(value: &T, out: &mut W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use clap::Parser;
    use miniblog_store::{FileSlotStorage, InMemorySlotStorage};
    use miniblog_types::FixedClock;

    fn store() -> BlogStore<InMemorySlotStorage> {
        colored::control::set_override(false);
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        BlogStore::new(InMemorySlotStorage::new()).with_clock(FixedClock::new(at))
    }

    fn run<S: SlotStorage>(store: &BlogStore<S>, args: &[&str]) -> anyhow::Result<String> {
        let argv = std::iter::once("miniblog").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv)?;
        let mut out = Vec::new();
        run_command(store, cli.command, cli.format, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn list_shows_seed_posts() {
        let store = store();
        let out = run(&store, &["list"]).unwrap();
        assert!(out.contains("#1 Getting Started with React Hooks"));
        assert!(out.contains("#3 Exploring Japan's Hidden Temples"));
        assert!(out.contains("..."));
    }

    #[test]
    fn list_by_category() {
        let store = store();
        let out = run(&store, &["list", "--category", "Design"]).unwrap();
        assert!(out.contains("The Art of Modern Web Design"));
        assert!(!out.contains("React"));
    }

    #[test]
    fn list_json_is_array() {
        let store = store();
        let out = run(&store, &["list", "--format", "json"]).unwrap();
        let blogs: Vec<Blog> = serde_json::from_str(&out).unwrap();
        assert_eq!(blogs.len(), 3);
    }

    #[test]
    fn show_missing_blog_fails() {
        let store = store();
        let err = run(&store, &["show", "9"]).unwrap_err();
        assert!(err.to_string().contains("blog 9 not found"));
    }

    #[test]
    fn create_then_show() {
        let store = store();
        let out = run(&store, &[
            "create", "--title", "A", "--content", "c", "--author", "x",
            "--category", "tech", "--cover-image", "u",
        ]).unwrap();
        assert!(out.contains("Created blog #4 A"));

        let shown = run(&store, &["show", "4"]).unwrap();
        assert!(shown.contains("x · tech · 2024-06-01 · 1 min read"));
        assert!(shown.contains("Comments (0)"));
    }

    #[test]
    fn create_json_returns_record() {
        let store = store();
        let out = run(&store, &[
            "--format", "json", "create", "--title", "A", "--content", "c",
            "--author", "x", "--category", "tech", "--cover-image", "u", "--read-time", "1 min",
        ]).unwrap();
        let blog: Blog = serde_json::from_str(&out).unwrap();
        assert_eq!(blog.id, BlogId::new(4));
        assert_eq!(blog.read_time, "1 min");
        assert!(out.contains("\"coverImage\""));
    }

    #[test]
    fn edit_updates_fields() {
        let store = store();
        let out = run(&store, &["edit", "2", "--title", "Renamed"]).unwrap();
        assert!(out.contains("Updated blog #2 Renamed"));
        let blog = store.get_blog_by_id(BlogId::new(2)).unwrap().unwrap();
        assert_eq!(blog.title, "Renamed");
        assert_eq!(blog.author, "Alex Morgan");
    }

    #[test]
    fn edit_requires_a_field() {
        let store = store();
        assert!(run(&store, &["edit", "2"]).is_err());
    }

    #[test]
    fn edit_missing_blog_fails() {
        let store = store();
        let err = run(&store, &["edit", "8", "--title", "B"]).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn delete_removes_blog() {
        let store = store();
        let out = run(&store, &["delete", "1"]).unwrap();
        assert!(out.contains("Deleted blog #1"));
        assert!(out.contains("2 posts left"));
        assert!(run(&store, &["show", "1"]).is_err());
        assert!(run(&store, &["delete", "1"]).is_err());
    }

    #[test]
    fn search_with_scope() {
        let store = store();
        let out = run(&store, &["search", "temples", "--scope", "title"]).unwrap();
        assert!(out.contains("#3"));
        let none = run(&store, &["search", "temples", "--scope", "category"]).unwrap();
        assert!(none.contains("No posts."));
    }

    #[test]
    fn categories_counts() {
        let store = store();
        let out = run(&store, &["categories"]).unwrap();
        assert_eq!(out, "design (1)\ntechnology (1)\ntravel (1)\n");

        let json = run(&store, &["categories", "--format", "json"]).unwrap();
        let counts: BTreeMap<String, usize> = serde_json::from_str(&json).unwrap();
        assert_eq!(counts["travel"], 1);
    }

    #[test]
    fn comment_add_and_delete() {
        let store = store();
        let out = run(&store, &["comment", "add", "2", "--author", "y", "--content", "hi"]).unwrap();
        assert!(out.contains("Added comment #1 to blog #2"));

        let shown = run(&store, &["show", "2"]).unwrap();
        assert!(shown.contains("Comments (1)"));
        assert!(shown.contains("2024-06-01 09:00"));

        let out = run(&store, &["comment", "delete", "2", "1"]).unwrap();
        assert!(out.contains("Deleted comment #1 from blog #2"));
        assert!(run(&store, &["comment", "delete", "2", "1"]).is_err());
    }

    #[test]
    fn comment_on_missing_blog_fails() {
        let store = store();
        let err = run(&store, &["comment", "add", "7", "--author", "y", "--content", "hi"]).unwrap_err();
        assert!(err.to_string().contains("blog 7 not found"));
    }

    #[test]
    fn file_backed_store_persists_between_runs() {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        {
            let store = BlogStore::new(FileSlotStorage::open(dir.path()).unwrap());
            run(&store, &["delete", "3"]).unwrap();
        }
        let store = BlogStore::new(FileSlotStorage::open(dir.path()).unwrap());
        let out = run(&store, &["list"]).unwrap();
        assert!(!out.contains("#3"));
        assert!(dir.path().join("mini_blog_posts.json").is_file());
    }
}

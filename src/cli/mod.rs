//! Command-line interface for lessonlib.
//!
//! Provides commands for browsing the library (catalog, module lists,
//! rendered lessons), building the artifact tree from authored section
//! documents, and auditing a built tree against its manifest.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::authoring::{verify, Builder};
use crate::domain::SectionKey;
use crate::library::{
    ContentStore, FsContentStore, HttpContentStore, Manifest, Resolver, SectionCounts,
};
use crate::render::lesson_html;

/// lessonlib - Learning Library content engine
#[derive(Parser, Debug)]
#[command(name = "lessonlib")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List catalog sections with manifest counts
    Sections {
        /// Content root (defaults to the configured content directory)
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// List a section's modules
    Modules {
        /// Section key (lr, rc, ap)
        section: String,

        /// Fetch artifacts from a remote base URL instead of the local tree
        #[arg(long)]
        remote: Option<String>,
    },

    /// List a module's lessons
    Lessons {
        /// Section key (lr, rc, ap)
        section: String,

        /// Module id within the section
        module_id: u32,

        /// Fetch artifacts from a remote base URL instead of the local tree
        #[arg(long)]
        remote: Option<String>,
    },

    /// Render a lesson to an HTML fragment
    Show {
        /// Section key (lr, rc, ap)
        section: String,

        /// Lesson id within the section
        lesson_id: String,

        /// Print the raw lesson document as JSON instead of HTML
        #[arg(long)]
        json: bool,

        /// Fetch artifacts from a remote base URL instead of the local tree
        #[arg(long)]
        remote: Option<String>,
    },

    /// Build the artifact tree from authored section documents
    Build {
        /// Authoring source directory (defaults to the configured one)
        #[arg(long)]
        src: Option<PathBuf>,

        /// Output content root (defaults to the configured one)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Audit a built artifact tree against its manifest
    Check {
        /// Content root (defaults to the configured content directory)
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Sections { root } => list_sections(root).await,
            Commands::Modules { section, remote } => list_modules(&section, remote).await,
            Commands::Lessons {
                section,
                module_id,
                remote,
            } => list_lessons(&section, module_id, remote).await,
            Commands::Show {
                section,
                lesson_id,
                json,
                remote,
            } => show_lesson(&section, &lesson_id, json, remote).await,
            Commands::Build { src, out } => build(src, out).await,
            Commands::Check { root } => check(root).await,
            Commands::Config => show_config(),
        }
    }
}

fn content_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => crate::config::content_dir(),
    }
}

/// Build a resolver over the local tree or a remote artifact host
fn make_resolver(remote: Option<String>) -> Result<Resolver> {
    let store: Arc<dyn ContentStore> = match remote {
        Some(base_url) => Arc::new(HttpContentStore::new(base_url)),
        None => Arc::new(FsContentStore::new(crate::config::content_dir()?)),
    };
    Ok(Resolver::new(store))
}

/// Catalog view: section tiles from the manifest, no index loads
async fn list_sections(root: Option<PathBuf>) -> Result<()> {
    let root = content_root(root)?;
    let manifest = Manifest::load(&root)
        .await
        .context("No manifest found; run `lessonlib build` first")?;

    for key in SectionKey::ALL {
        match manifest.counts(key) {
            Some(SectionCounts { modules, lessons }) => {
                println!(
                    "{:<3} {:<24} {:>2} modules, {:>3} lessons",
                    key,
                    key.display_name(),
                    modules,
                    lessons
                );
            }
            None => println!("{:<3} {:<24} (not built)", key, key.display_name()),
        }
    }

    Ok(())
}

/// List a section's modules from its resolved index
async fn list_modules(section: &str, remote: Option<String>) -> Result<()> {
    let resolver = make_resolver(remote)?;
    let index = resolver.load_section_index(section).await?;

    println!("{}", index.section);
    for module in &index.modules {
        println!(
            "  [{:>2}] {} — {} ({} lessons)",
            module.id,
            module.unit,
            module.title,
            module.lessons.len()
        );
        println!("       {}", module.description);
    }

    Ok(())
}

/// List a module's lesson stubs
async fn list_lessons(section: &str, module_id: u32, remote: Option<String>) -> Result<()> {
    let resolver = make_resolver(remote)?;
    let index = resolver.load_section_index(section).await?;

    let module = index
        .module(module_id)
        .with_context(|| format!("No module {} in section '{}'", module_id, section))?;

    println!("{} — {}", module.unit, module.title);
    for stub in &module.lessons {
        println!("  {:<8} {}", stub.id, stub.title);
    }

    Ok(())
}

/// Resolve a lesson and print it rendered (or raw)
async fn show_lesson(
    section: &str,
    lesson_id: &str,
    json: bool,
    remote: Option<String>,
) -> Result<()> {
    let resolver = make_resolver(remote)?;
    let lesson = resolver.load_lesson_content(section, lesson_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&*lesson)?);
    } else {
        println!("{}", lesson_html(&lesson));
    }

    Ok(())
}

/// Run the authoring build
async fn build(src: Option<PathBuf>, out: Option<PathBuf>) -> Result<()> {
    let src = match src {
        Some(src) => src,
        None => crate::config::authoring_dir()?,
    };
    let out = content_root(out)?;

    let manifest = Builder::new(&src, &out).build().await?;

    let total_lessons: usize = manifest.sections.values().map(|c| c.lessons).sum();
    println!(
        "Built {} sections, {} lessons -> {}",
        manifest.sections.len(),
        total_lessons,
        out.display()
    );

    Ok(())
}

/// Audit the built tree; non-zero exit on findings
async fn check(root: Option<PathBuf>) -> Result<()> {
    let root = content_root(root)?;
    let findings = verify(&root).await?;

    if findings.is_empty() {
        println!("OK: {} is consistent with its manifest", root.display());
        return Ok(());
    }

    for finding in &findings {
        eprintln!("FAIL: {}", finding);
    }
    std::process::exit(1);
}

/// Show resolved configuration
fn show_config() -> Result<()> {
    let config = crate::config::config()?;

    println!("content:   {}", config.content.display());
    println!("authoring: {}", config.authoring.display());
    match &config.config_file {
        Some(path) => println!("config:    {}", path.display()),
        None => println!("config:    (none found, using env/defaults)"),
    }

    Ok(())
}

use crate::areas::repository::Repository;
use crate::commands::porcelain::log::LogFormat;
use anyhow::Result;
use clap::{Parser, Subcommand};

mod areas;
mod artifacts;
mod commands;
mod errors;

#[derive(Parser)]
#[command(
    name = "goit",
    version = "0.1.0",
    about = "A minimal content-addressed version control engine",
    long_about = "goit keeps snapshot-based history for a working directory: \
    staging file versions, commits forming a parent-linked DAG, movable branch \
    references, branch switching, and three-way merge with textual conflict \
    reporting. It is a learning project, not a git replacement.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Initialize a new goit repository (.goit/)")]
    Init,
    #[command(
        name = "add",
        about = "Add files to the staging area",
        long_about = "Hashes the given files (or every file, with '.') into the object \
        store and records them in the index for the next commit."
    )]
    Add {
        #[arg(index = 1, required = true, help = "The files to add, or '.' for all")]
        paths: Vec<String>,
    },
    #[command(name = "commit", about = "Commit the staged changes with a message")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show commit history")]
    Log {
        #[arg(short, long, help = "One line per commit")]
        compact: bool,
    },
    #[command(name = "status", about = "Show changes in the working directory")]
    Status,
    #[command(
        name = "branch",
        about = "List branches, or create a new branch at the current commit"
    )]
    Branch {
        #[arg(index = 1, help = "The name of the branch to create")]
        name: Option<String>,
    },
    #[command(name = "checkout", about = "Switch to a branch")]
    Checkout {
        #[arg(index = 1, help = "The branch to switch to")]
        branch: String,
    },
    #[command(
        name = "diff",
        about = "Show differences between staged files and the working directory"
    )]
    Diff {
        #[arg(index = 1, help = "Limit the report to one file")]
        path: Option<String>,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge in")]
        branch: String,
    },
    #[command(
        name = "resolve",
        about = "Finalize a merge after resolving conflicts",
        long_about = "Commits the index as the merge result, with the pre-merge head \
        and MERGE_HEAD as parents, and clears the merge-in-progress state."
    )]
    Resolve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let pwd = std::env::current_dir()?;

    match &cli.command {
        Commands::Init => {
            let mut repository = Repository::new(pwd, Box::new(std::io::stdout()))?;
            repository.init().await?
        }
        Commands::Add { paths } => {
            let mut repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;
            repository.add(paths).await?
        }
        Commands::Commit { message } => {
            let mut repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;
            repository.commit(message.as_str()).await?
        }
        Commands::Log { compact } => {
            let mut repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;
            let format = if *compact {
                LogFormat::Compact
            } else {
                LogFormat::Detailed
            };
            repository.log(format)?
        }
        Commands::Status => {
            let mut repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;
            repository.status().await?
        }
        Commands::Branch { name } => {
            let mut repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;
            match name {
                Some(name) => repository.create_branch(name)?,
                None => repository.list_branches()?,
            }
        }
        Commands::Checkout { branch } => {
            let mut repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;
            repository.checkout(branch).await?
        }
        Commands::Diff { path } => {
            let mut repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;
            repository.diff(path.as_deref()).await?
        }
        Commands::Merge { branch } => {
            let mut repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;
            repository.merge(branch).await?
        }
        Commands::Resolve => {
            let mut repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;
            repository.resolve().await?
        }
    }

    Ok(())
}

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use sprig::areas::repository::Repository;
use sprig::artifacts::core::{PagerWriter, should_page};
use sprig::commands::Command;
use sprig::errors::{UserError, as_user_error};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "sprig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small content-addressed version control system",
    long_about = "sprig tracks a flat directory of files with branches, \
    commits, three-way merges and unified diffs. Everything lives in the \
    .sprig directory next to the tracked files.",
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
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the .sprig directory, the master branch \
        and the root commit in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(name = "add", about = "Stage a file for addition")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "rm", about = "Stage a file for removal")]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Record the staged changes",
        long_about = "This command creates a new commit on the current branch from \
        the staged additions and removals."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: Option<String>,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged files and the working tree state")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file> restores a file from the head commit, \
        checkout <commit> -- <file> restores it from the given commit and \
        checkout <branch> switches to the given branch."
    )]
    Checkout {
        #[arg(index = 1, help = "A commit id or a branch name")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the current head")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "reset", about = "Check out a commit and move its branch to it")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge the given branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
    #[command(
        name = "diff",
        about = "Compare branch heads and the working tree",
        long_about = "diff compares the current branch with the working tree, \
        diff <branch> compares that branch with the working tree and \
        diff <branch1> <branch2> compares two branches."
    )]
    Diff {
        #[arg(index = 1)]
        from: Option<String>,
        #[arg(index = 2)]
        to: Option<String>,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object store"
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the blob to the object store")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "cat-file", about = "Print the content of a stored blob")]
    CatFile {
        #[arg(index = 1, help = "The blob id")]
        oid: String,
        #[arg(index = 2, help = "The file the blob was stored for")]
        file: String,
    },
}

impl TryFrom<Commands> for Command {
    type Error = UserError;

    fn try_from(command: Commands) -> Result<Self, Self::Error> {
        Ok(match command {
            Commands::Init { path } => Command::Init { path },
            Commands::Add { file } => Command::Add { name: file },
            Commands::Rm { file } => Command::Rm { name: file },
            Commands::Commit { message } => Command::Commit {
                message: message.unwrap_or_default(),
            },
            Commands::Log => Command::Log,
            Commands::GlobalLog => Command::GlobalLog,
            Commands::Find { message } => Command::Find { message },
            Commands::Status => Command::Status,
            Commands::Checkout { target, file } => match (target, file) {
                (commit, Some(name)) => Command::CheckoutFile { commit, name },
                (Some(name), None) => Command::CheckoutBranch { name },
                (None, None) => return Err(UserError::IncorrectOperands),
            },
            Commands::Branch { name } => Command::Branch { name },
            Commands::RmBranch { name } => Command::RmBranch { name },
            Commands::Reset { commit } => Command::Reset { commit },
            Commands::Merge { branch } => Command::Merge { branch },
            Commands::Diff { from, to } => Command::Diff { from, to },
            Commands::HashObject { write, file } => Command::HashObject { write, name: file },
            Commands::CatFile { oid, file } => Command::CatFile { oid, name: file },
        })
    }
}

fn parse_command() -> anyhow::Result<Command> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),
            ErrorKind::InvalidSubcommand => return Err(UserError::UnknownCommand.into()),
            _ => return Err(UserError::IncorrectOperands.into()),
        },
    };

    let command = cli.command.ok_or(UserError::NoCommand)?;
    Ok(Command::try_from(command)?)
}

async fn run() -> anyhow::Result<()> {
    let command = parse_command()?;

    let root = match &command {
        Command::Init { path: Some(path) } => path.clone(),
        _ => std::env::current_dir()?,
    };

    if command.is_paged() && should_page() {
        let pager = Pager::new();
        let repository = Repository::new(&root, Box::new(PagerWriter::new(pager.clone())))?;
        repository.execute(command).await?;
        minus::page_all(pager)?;
    } else {
        let repository = Repository::new(&root, Box::new(std::io::stdout()))?;
        repository.execute(command).await?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => match as_user_error(&error) {
            Some(user_error) => {
                println!("{user_error}");
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("fatal: {error:#}");
                ExitCode::FAILURE
            }
        },
    }
}

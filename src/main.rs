use anyhow::Result;
use clap::{Parser, Subcommand};

use gitx::config;
use gitx::git::{Git2Repository, ShellExecutor};
use gitx::messaging::{ConsoleMessenger, Messenger, WebhookMessenger};
use gitx::review::GithubClient;
use gitx::ui::{self, TerminalOperator};
use gitx::workflow::{Collaborators, ReleaseOutcome, Workflow};

#[derive(Parser)]
#[command(
    name = "gitx",
    version,
    about = "Run the team branching workflow: integrate through aggregate branches, reset them, release to production"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, help = "Do not post worklog messages")]
    quiet: bool,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Log debug output, including HTTP traffic"
    )]
    trace: bool,

    #[command(subcommand)]
    command: Verb,
}

#[derive(Subcommand)]
enum Verb {
    /// Update the current branch with latest changes from its remote branch and the base branch
    Update,
    /// Start a new branch with latest changes from the base branch
    Start { name: Option<String> },
    /// Share the current branch in the remote repository
    Share,
    /// Set the current branch to track the remote branch with the same name
    Track,
    /// Integrate the current branch into one of the aggregate branches
    Integrate { target: Option<String> },
    /// (DEPRECATED) Integrate the current branch into staging
    Promote,
    /// Reset the specified aggregate branch to a known good state
    Nuke {
        bad_branch: String,

        #[arg(short, long, help = "Destination branch to reset to")]
        destination: Option<String>,
    },
    /// Release the current branch to production
    Release,
    /// Delete branches that have been merged into the base branch
    Cleanup,
    /// Create a pull request for the current branch
    #[command(name = "reviewrequest")]
    ReviewRequest {
        #[arg(short, long, help = "Pull request description")]
        description: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.trace);

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let repo = match Git2Repository::open(".", &config.remote, &config.branches.base) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };
    let executor = ShellExecutor::new();
    let operator = TerminalOperator;
    let messenger: Box<dyn Messenger> = match &config.messaging.webhook_url {
        Some(url) => Box::new(WebhookMessenger::new(url)?),
        None => Box::new(ConsoleMessenger),
    };
    let reviewer = GithubClient::new(&config.github.api_url, &config.branches.base);

    let mut workflow = Workflow::new(
        &config,
        Collaborators {
            repo: &repo,
            executor: &executor,
            operator: &operator,
            messenger: messenger.as_ref(),
            reviewer: &reviewer,
        },
    )
    .quiet(args.quiet);

    let result = run(&mut workflow, args.command);

    for warning in workflow.take_warnings() {
        ui::display_warning(&warning);
    }

    if let Err(err) = result {
        ui::display_error(&err.to_string());
        if !err.is_validation() {
            ui::display_command_log(workflow.command_log());
        }
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(trace: bool) {
    let default_filter = if trace { "debug" } else { "error" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(workflow: &mut Workflow<'_>, verb: Verb) -> gitx::Result<()> {
    match verb {
        Verb::Update => workflow.update(),
        Verb::Start { name } => {
            let branch = workflow.start(name.as_deref())?;
            ui::display_success(&format!("Started work on {}", branch));
            Ok(())
        }
        Verb::Share => workflow.share(),
        Verb::Track => workflow.track(),
        Verb::Integrate { target } => workflow.integrate(target.as_deref()),
        Verb::Promote => workflow.promote(),
        Verb::Nuke {
            bad_branch,
            destination,
        } => {
            let report = workflow.nuke(&bad_branch, destination.as_deref())?;
            ui::display_success(&format!(
                "Reset {} to {}",
                bad_branch, report.good_branch
            ));
            Ok(())
        }
        Verb::Release => {
            match workflow.release()? {
                ReleaseOutcome::Declined => println!("Release cancelled by user."),
                ReleaseOutcome::Released { backport, .. } => {
                    if let Some(backport) = backport {
                        ui::display_success(&format!("Retained {} for backporting", backport));
                    }
                    ui::display_success("Released to production");
                }
            }
            Ok(())
        }
        Verb::Cleanup => {
            let report = workflow.cleanup()?;
            ui::display_success(&format!(
                "Deleted {} remote and {} local branch(es)",
                report.remote_deleted.len(),
                report.local_deleted.len()
            ));
            Ok(())
        }
        Verb::ReviewRequest { description } => {
            let url = workflow.review_request(description.as_deref())?;
            ui::display_success(&format!("Pull request created: {}", url));
            Ok(())
        }
    }
}

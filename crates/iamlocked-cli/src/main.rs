use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "iamlocked", version, about = "I Am Locked study planner CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Focus timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Focus session labels, sounds and log
    Focus {
        #[command(subcommand)]
        action: commands::focus::FocusAction,
    },
    /// Syllabus tree and progress
    Syllabus {
        #[command(subcommand)]
        action: commands::syllabus::SyllabusAction,
    },
    /// Syllabus template catalog
    Template {
        #[command(subcommand)]
        action: commands::template::TemplateAction,
    },
    /// Today's time-slot plan
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Daily completion streak
    Streak {
        #[command(subcommand)]
        action: commands::task::StreakAction,
    },
    /// Dashboard overview
    Dashboard {
        #[command(subcommand)]
        action: commands::dashboard::DashboardAction,
    },
    /// Account sign-in and profile
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Focus { action } => commands::focus::run(action),
        Commands::Syllabus { action } => commands::syllabus::run(action),
        Commands::Template { action } => commands::template::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Streak { action } => commands::task::run_streak(action),
        Commands::Dashboard { action } => commands::dashboard::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

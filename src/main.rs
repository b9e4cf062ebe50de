use clap::Parser;
use miette::Result;
use tyredex::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) so piping
    // to `head`, `grep -q`, etc. doesn't panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    // Install miette's fancy handler for diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => tyredex::cli::commands::init::run(args),
        Commands::Veh(cmd) => tyredex::cli::commands::veh::run(cmd, &global),
        Commands::Fit(cmd) => tyredex::cli::commands::fit::run(cmd, &global),
        Commands::Calc(args) => tyredex::cli::commands::calc::run(args, &global),
        Commands::Search(cmd) => tyredex::cli::commands::search::run(cmd, &global),
        Commands::Submit(args) => tyredex::cli::commands::submit::run(args, &global),
        Commands::Review(cmd) => tyredex::cli::commands::review::run(cmd, &global),
        Commands::Import(args) => tyredex::cli::commands::import::run(args, &global),
        Commands::Validate(args) => tyredex::cli::commands::validate::run(args, &global),
        Commands::Completions(args) => tyredex::cli::commands::completions::run(args),
    }
}

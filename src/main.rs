use clap::Parser;
use miette::Result;
use relia::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head` causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
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
    relia::cli::init_logging(&global);

    match cli.command {
        Commands::Init(args) => relia::cli::commands::init::run(args, &global),
        Commands::Summary(args) => relia::cli::commands::summary::run(args, &global),
        Commands::Curve(args) => relia::cli::commands::curve::run(args, &global),
        Commands::Percentile(args) => relia::cli::commands::percentile::run(args, &global),
        Commands::Eval(args) => relia::cli::commands::eval::run(args, &global),
        Commands::Plot(args) => relia::cli::commands::plot::run(args, &global),
        Commands::Run(args) => relia::cli::commands::run::run(args, &global),
        Commands::Completions(args) => relia::cli::commands::completions::run(args),
    }
}

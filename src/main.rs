use clap::Parser;
use tasklet::cli::commands::Cli;
use tasklet::cli::handlers;
use tasklet::io::config_io::resolve_data_dir;

fn main() {
    let cli = Cli::parse();

    let result = if cli.command.is_none() {
        // No subcommand → launch TUI
        tasklet::tui::run(&resolve_data_dir(cli.data_dir.as_deref()))
    } else {
        handlers::dispatch(cli)
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};
use kryptx_scaffold::api::{self, Options};
use std::path::PathBuf;

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("base")
                .short('C')
                .long("base")
                .value_name("DIR")
                .help("Directory to create the structure in (defaults to the current directory)"),
        )
        .arg(
            Arg::new("layout")
                .short('l')
                .long("layout")
                .value_name("SOURCE")
                .help("Layout file, directory holding scaffold.toml, or git reference (gh:account/repo)"),
        )
        .arg(
            Arg::new("dry-run")
                .short('n')
                .long("dry-run")
                .help("Print the structure as a tree without touching the disk")
                .action(ArgAction::SetTrue)
                .conflicts_with("confirm"),
        )
        .arg(
            Arg::new("confirm")
                .short('c')
                .long("confirm")
                .help("Preview the structure and ask before writing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("echo")
                .short('e')
                .long("echo")
                .help("Print a line for every created file")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_logger(matches.get_flag("verbose"));

    let options = build_options(&matches)?;

    api::scaffold(&options)?;

    Ok(())
}

fn init_logger(is_verbose: bool) {
    let default_filter = if is_verbose { "debug" } else { "warn" };

    env_logger::init_from_env(
        env_logger::Env::new()
            .filter_or("KRYPTX_SCAFFOLD_LOG", default_filter)
            .write_style_or("KRYPTX_SCAFFOLD_LOG_STYLE", "auto"),
    );

    log::debug!("executing in verbose mode");
}

fn build_options(args: &ArgMatches) -> miette::Result<Options> {
    let base = match args.get_one::<String>("base") {
        Some(base) => PathBuf::from(base),
        None => std::env::current_dir()
            .map_err(|error| miette::miette!("unable to read the current directory: {}", error))?,
    };

    Ok(Options {
        base,
        layout: args.get_one::<String>("layout").cloned(),
        dry_run: args.get_flag("dry-run"),
        confirm: args.get_flag("confirm"),
        echo: args.get_flag("echo"),
    })
}

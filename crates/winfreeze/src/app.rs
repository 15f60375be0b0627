use clap::{Arg, ArgAction, Command};
use winfreeze_core::TitleSource;

pub fn build_cli() -> Command {
    Command::new("winfreeze")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Remember and restore window positions")
        .long_about(
            "winfreeze captures the position and size of every on-screen application window \
             and later puts them back, for example after a display sleep or screen lock \
             rearranged them. Window control uses the macOS Accessibility API.",
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        // Capture subcommand
        .subcommand(
            Command::new("capture")
                .about("Save the geometry of all on-screen windows")
                .arg(file_arg())
                .arg(
                    Arg::new("title-source")
                        .long("title-source")
                        .help("Where window titles come from (default: from config, else accessibility)")
                        .value_parser(TitleSource::VALUES),
                )
                .arg(json_arg()),
        )
        // Restore subcommand
        .subcommand(
            Command::new("restore")
                .about("Move saved windows back to their recorded geometry")
                .visible_alias("reposition")
                .arg(file_arg())
                .arg(
                    Arg::new("timeout-ms")
                        .long("timeout-ms")
                        .help("Give up on windows still off target after this many milliseconds (default: 10000)")
                        .value_parser(clap::value_parser!(u64).range(1..)),
                )
                .arg(
                    Arg::new("interval-ms")
                        .long("interval-ms")
                        .help("Pause between attempts in milliseconds (default: 250)")
                        .value_parser(clap::value_parser!(u64).range(1..)),
                )
                .arg(
                    Arg::new("tolerance")
                        .long("tolerance")
                        .help("Per-axis distance in points at which a window counts as in place (default: 5.0)")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(json_arg()),
        )
        // List subcommand
        .subcommand(
            Command::new("list")
                .about("List the windows that a capture would save")
                .arg(json_arg()),
        )
        // Show subcommand
        .subcommand(
            Command::new("show")
                .about("Print a saved snapshot without touching any window")
                .arg(file_arg())
                .arg(json_arg()),
        )
}

fn file_arg() -> Arg {
    Arg::new("file")
        .help("Snapshot file (default: storage.snapshot_file from config, else ~/.winfreeze/windows.json)")
        .index(1)
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output in JSON format")
        .action(ArgAction::SetTrue)
}

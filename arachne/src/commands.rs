use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("arachne")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("arachne")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("crawl")
                .about(
                    "Passively spider a host or collection of hosts, collecting forms, secrets, \
                emails, comments, API endpoints, file references and meta tags.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("The URL to crawl (https:// is assumed when no scheme is given)")
                        .value_parser(clap::value_parser!(String))
                        .conflicts_with("hosts-file"),
                )
                .arg(
                    arg!(-H --"hosts-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of URLs to crawl one after another")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("url"),
                )
                .arg(
                    arg!(--"max-pages" <NUM>)
                        .required(false)
                        .help("Stop after this many URLs have been processed per host")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("50"),
                )
                .arg(
                    arg!(--"max-depth" <NUM>)
                        .required(false)
                        .help("Maximum link distance from the seed")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("3"),
                )
                .arg(
                    arg!(--"timeout" <SECS>)
                        .required(false)
                        .help("Per-request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("30"),
                )
                .arg(
                    arg!(--"delay" <MS>)
                        .required(false)
                        .help("Pause between requests in milliseconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("100"),
                )
                .arg(
                    arg!(-o --"output" <DIR>)
                        .required(false)
                        .help("Directory to save reports to (implies --save)")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Saved report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("json"),
                )
                .arg(
                    arg!(--"save")
                        .required(false)
                        .help("Save a report per host to the output directory (default: current directory)")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}

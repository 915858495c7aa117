#![recursion_limit = "1024"] // for error_chain

#[macro_use]
extern crate log;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate clap;

#[macro_use]
mod errors;
#[macro_use]
mod util;
mod cli;
mod convert;
mod img;
mod info;
mod logger;
mod version;
mod xspd;

use std::process::exit;

fn main() {
    let matches = cli::parse_cli_args();

    let (subcommand, sub_matches) = matches.subcommand();
    let verbosity = sub_matches
        .map(|m| m.occurrences_of("VERBOSE"))
        .unwrap_or(0)
        .max(matches.occurrences_of("VERBOSE"));
    logger::init(logger::level_for_verbosity(verbosity));

    let sub_matches = match sub_matches {
        Some(m) => m,
        None => exit(1),
    };
    let res = match subcommand {
        "info" => info::main(sub_matches),
        "convert" => convert::main(sub_matches),
        "image" => img::main(sub_matches),
        "version" => {
            version::print_version_info();
            Ok(())
        }
        _ => Ok(()),
    };

    if let Err(e) = res {
        error!("{}", e);
        for e in e.iter().skip(1) {
            error!("caused by: {}", e);
        }
        exit(1);
    }
}

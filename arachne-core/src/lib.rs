pub mod crawl;
pub mod report;
pub mod security;

use colored::Colorize;

const BANNER: &str = r"
    _                   _
   / \   _ __ __ _  ___| |__  _ __   ___
  / _ \ | '__/ _` |/ __| '_ \| '_ \ / _ \
 / ___ \| | | (_| | (__| | | | | | |  __/
/_/   \_\_|  \__,_|\___|_| |_|_| |_|\___|
";

pub fn print_banner() {
    println!("{}", BANNER.bright_magenta().bold());
    println!(
        "  {} v{}\n",
        "a reconnaissance spider".bright_white(),
        env!("CARGO_PKG_VERSION")
    );
}

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

const LOGO: &str = r"
 ░▒▓███████▓▒░░▒▓██████▓▒░░▒▓████████▓▒░▒▓████████▓▒░▒▓██████▓▒░
░▒▓█▓▒░      ░▒▓█▓▒░░▒▓█▓▒░▒▓█▓▒░      ░▒▓█▓▒░     ░▒▓█▓▒░░▒▓█▓▒░
░▒▓█▓▒░      ░▒▓█▓▒░░▒▓█▓▒░▒▓█▓▒░      ░▒▓█▓▒░     ░▒▓█▓▒░░▒▓█▓▒░
 ░▒▓██████▓▒░░▒▓████████▓▒░▒▓██████▓▒░ ░▒▓██████▓▒░░▒▓█▓▒░░▒▓█▓▒░
       ░▒▓█▓▒░▒▓█▓▒░░▒▓█▓▒░▒▓█▓▒░      ░▒▓█▓▒░     ░▒▓█▓▒░░▒▓█▓▒░
       ░▒▓█▓▒░▒▓█▓▒░░▒▓█▓▒░▒▓█▓▒░      ░▒▓█▓▒░     ░▒▓█▓▒░░▒▓█▓▒░
░▒▓███████▓▒░░▒▓█▓▒░░▒▓█▓▒░▒▓█▓▒░      ░▒▓████████▓▒░▒▓██████▓▒░
                                                       ░▒▓█▓▒░";

pub const COUNTDOWN_SECS: u64 = 10;

pub fn print_banner() {
    println!("{LOGO}");
    println!(
        "SafeQ Export Tool {:>39}",
        format!("Ver.{}", env!("CARGO_PKG_VERSION"))
    );
    println!("{}", "-".repeat(65));
    println!();
    println!("Usage: safeq_exporter [-h] [-c CONFIG]");
    println!();
}

/// Prints `message` and blocks until the operator presses Enter (or stdin closes).
pub fn wait_for_enter(message: &str) {
    println!("{message}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}

/// Counts down on a single console line before the process exits.
pub fn countdown(secs: u64) {
    let mut stdout = io::stdout();
    for remaining in (1..=secs).rev() {
        let _ = write!(stdout, "\rThis App will terminate in {remaining} seconds.");
        let _ = stdout.flush();
        thread::sleep(Duration::from_secs(1));
    }
    let _ = writeln!(stdout, "\rBye-bye!{:33}", "");
}

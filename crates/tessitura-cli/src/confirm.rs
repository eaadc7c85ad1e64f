use std::io::{BufRead, Write};
use std::path::Path;

/// Overwrite confirmation strategy. One capability: should the file at
/// `path` be replaced?
pub trait Confirm {
    fn confirm(&self, path: &Path) -> bool;
}

/// Interpret one line of user input. Empty input means yes; anything
/// unrecognized asks again.
fn parse_choice(line: &str) -> Option<bool> {
    match line.trim().to_lowercase().as_str() {
        "yes" | "y" | "ye" | "" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

/// Console prompt: announces the existing file and reads y/n from stdin.
pub struct Interactive;

impl Interactive {
    fn ask(&self, path: &Path, input: &mut dyn BufRead) -> bool {
        println!("File {} exists", path.display());
        println!("Overwrite?\n y/n");

        loop {
            print!("-> ");
            let _ = std::io::stdout().flush();

            let mut line = String::new();
            match input.read_line(&mut line) {
                // EOF on stdin: treat as a decline, never overwrite blind.
                Ok(0) => return false,
                Ok(_) => {}
                Err(_) => return false,
            }

            match parse_choice(&line) {
                Some(choice) => return choice,
                None => println!("Please respond with 'yes' or 'no'"),
            }
        }
    }
}

impl Confirm for Interactive {
    fn confirm(&self, path: &Path) -> bool {
        let stdin = std::io::stdin();
        let mut lock = stdin.lock();
        self.ask(path, &mut lock)
    }
}

/// Flag-driven strategies for non-interactive runs and tests.
pub struct AlwaysYes;
pub struct AlwaysNo;

impl Confirm for AlwaysYes {
    fn confirm(&self, _path: &Path) -> bool {
        true
    }
}

impl Confirm for AlwaysNo {
    fn confirm(&self, _path: &Path) -> bool {
        false
    }
}

use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::process::exit;

/// Read a whole input file, or exit with a message naming the path.
pub fn read_input(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: cannot read {}: {e}", path.display());
        exit(1);
    })
}

/// Write an output file, or exit with a message naming the path.
pub fn write_output(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap_or_else(|e| {
        eprintln!("error: cannot write {}: {e}", path.display());
        exit(1);
    });
}

/// Report a pipeline error and exit nonzero.
pub fn fail(error: impl Display) -> ! {
    eprintln!("error: {error}");
    exit(1);
}

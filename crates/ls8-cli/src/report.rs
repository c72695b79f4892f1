//! Diagnostics written to stderr

use ls8_parser::Program;
use ls8_vm::VmError;
use nu_ansi_term::{Color, Style};

fn styled(style: Style, label: &str) -> String {
    if std::env::var_os("NO_COLOR").is_some() {
        label.to_string()
    } else {
        style.paint(label).to_string()
    }
}

pub fn error(message: &str) {
    eprintln!("{} {}", styled(Color::Red.bold(), "error:"), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", styled(Color::Yellow.bold(), "warning:"), message);
}

/// `(file:line)` for the instruction loaded at `pc`, empty outside the program
fn location(program: &Program, filename: &str, pc: usize) -> String {
    program
        .line_of(pc)
        .map(|line| format!(" ({}:{})", filename, line))
        .unwrap_or_default()
}

/// Report a runtime fault raised by the instruction at `pc`
pub fn runtime_error(err: &VmError, pc: usize, program: &Program, filename: &str) {
    error(&format!("Runtime error: {}{}", err, location(program, filename, pc)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_points_at_source_line() {
        let program = ls8_parser::parse("# header\n00000001\n\n01000111\n00000000\n").unwrap();
        assert_eq!(location(&program, "prog.ls8", 0), " (prog.ls8:2)");
        assert_eq!(location(&program, "prog.ls8", 1), " (prog.ls8:4)");
        assert_eq!(location(&program, "prog.ls8", 200), "");
    }
}

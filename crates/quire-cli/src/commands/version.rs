//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - cQASM translation and result remapping for Quantum Inspire",
        style("Quire").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  quire-ir     Instruction streams and the Qobj wire format");
    println!("  quire-cqasm  cQASM emitter");
    println!("  quire-hal    Quantum Inspire backend binding");
    println!("  quire-cli    Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/quire-dev/quire").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}

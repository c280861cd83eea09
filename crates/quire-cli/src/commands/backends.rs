//! Backends command implementation.

use anyhow::Result;
use console::style;

use super::common::load_config;

/// Execute the backends command.
pub async fn execute(config: Option<&str>) -> Result<()> {
    let backend = load_config(config)?;

    println!("{} Configured backend:\n", style("Quire").cyan().bold());
    println!(
        "  {} {} {}",
        style("●").green(),
        style(&backend.backend_name).bold(),
        match (backend.simulator, backend.local) {
            (true, true) => "(local simulator)",
            (true, false) => "(remote simulator)",
            (false, _) => "(hardware)",
        }
    );
    println!("    Version: {}", backend.backend_version);
    println!("    Qubits: {}", backend.n_qubits);
    println!("    Max shots: {}", backend.max_shots);
    println!("    Gates: {}", backend.basis_gates.join(", "));
    println!(
        "    Conditional gates: {}",
        if backend.conditional { "yes" } else { "no" }
    );
    println!("    Memory: {}", if backend.memory { "yes" } else { "no" });
    println!();

    Ok(())
}

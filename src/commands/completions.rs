//! Shell completions

use clap::CommandFactory;
use clap_complete::Shell;

use crate::error::Result;

/// Generate shell completions on stdout
pub fn run(shell: Shell) -> Result<()> {
    let mut cmd = <crate::cli::Cli as CommandFactory>::command();
    clap_complete::generate(shell, &mut cmd, "resembed", &mut std::io::stdout().lock());

    Ok(())
}

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for tabletop")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, doc
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Launch the desktop demo, forwarding any extra arguments
    Run {
        #[arg(long)]
        release: bool,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

/// One cargo invocation, reported by name on failure.
struct Step {
    name: &'static str,
    args: Vec<String>,
}

impl Step {
    fn new(name: &'static str, args: &[&str]) -> Self {
        Self {
            name,
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn run(&self) -> Result<()> {
        println!("==> cargo {}", self.args.join(" "));
        let status = Command::new("cargo").args(&self.args).status()?;
        if !status.success() {
            bail!("{} failed ({status})", self.name);
        }
        Ok(())
    }
}

fn fmt() -> Step {
    Step::new("fmt", &["fmt", "--all", "--", "--check"])
}

fn clippy() -> Step {
    Step::new(
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn test() -> Step {
    Step::new("test", &["test", "--workspace"])
}

fn doc() -> Step {
    Step::new("doc", &["doc", "--workspace", "--no-deps"])
}

fn build() -> Step {
    Step::new("build", &["build", "--workspace"])
}

fn run_desktop(release: bool, extra: &[String]) -> Step {
    let mut step = Step::new("run", &["run", "-p", "tabletop-desktop"]);
    if release {
        step.args.push("--release".into());
    }
    if !extra.is_empty() {
        step.args.push("--".into());
        step.args.extend(extra.iter().cloned());
    }
    step
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let steps = match cli.command {
        Commands::Check => vec![fmt(), clippy(), test(), doc()],
        Commands::Fmt => vec![fmt()],
        Commands::Clippy => vec![clippy()],
        Commands::Test => vec![test()],
        Commands::Doc => vec![doc()],
        Commands::Build => vec![build()],
        Commands::Run { release, args } => vec![run_desktop(release, &args)],
    };
    for step in &steps {
        step.run()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_forwards_extra_arguments() {
        let step = run_desktop(true, &["--path".into(), "forward".into()]);
        assert_eq!(
            step.args,
            ["run", "-p", "tabletop-desktop", "--release", "--", "--path", "forward"]
        );
    }

    #[test]
    fn run_without_extras_has_no_separator() {
        let step = run_desktop(false, &[]);
        assert!(!step.args.iter().any(|a| a == "--"));
    }
}

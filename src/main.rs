use argh::FromArgs;
use command_interface::Interpreter;
use command_interface::arithmetic::Arithmetic;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// Evaluate calculator commands typed one per line. Type `help` for a list.
struct Args {
    #[argh(option, default = "String::from(\">>> \")")]
    /// prompt shown before each line in interactive mode.
    prompt: String,

    #[argh(option, short = 'e')]
    /// evaluate this line and print its result; may be repeated. Skips the loop.
    eval: Vec<String>,

    #[argh(option)]
    /// file to load line history from and save it to.
    history: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args: Args = argh::from_env();

    let mut interp = Interpreter::new(Arithmetic::default()).with_prompt(args.prompt);
    if let Some(path) = args.history {
        interp = interp.with_history(path);
    }

    if !args.eval.is_empty() {
        for line in &args.eval {
            println!("{}", interp.eval(line));
        }
        return Ok(());
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        interp.repl()
    } else {
        interp.run_lines(stdin.lock(), std::io::stdout().lock())
    }
}

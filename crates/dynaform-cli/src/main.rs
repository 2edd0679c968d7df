//! The `dynaform` binary.

fn main() {
    let mut stdout = std::io::stdout().lock();
    let code = dynaform_cli::run(std::env::args_os(), &mut stdout);
    drop(stdout);
    std::process::exit(code);
}

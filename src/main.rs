use privexec::{run, Error, Native, Request};
use std::{env, process::exit};

fn main() {
    env_logger::init();

    let mut args = env::args_os();
    let helper = args
        .next()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "privexec".to_string());

    let request = match Request::parse(args) {
        Ok(request) => request,
        Err(err @ Error::Usage) => {
            eprintln!("syntax: {} username path argv0 args...", helper);
            exit(err.exit_code());
        }
        Err(err) => {
            eprintln!("{}: {}", helper, err);
            exit(err.exit_code());
        }
    };

    // Only ever returns an error; on success the process image is
    // replaced by the target program.
    let err = match run(&Native, &request) {
        Err(err) => err,
        Ok(never) => match never {},
    };

    eprintln!("{}: {}", helper, err);
    exit(err.exit_code());
}

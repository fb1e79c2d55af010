use std::env;

use compound::Error;

#[tokio::main]
async fn main() {
    compound::logging::init();

    let raw_args: Vec<String> = env::args().collect();
    match raw_args.get(1).map(|s| s.as_str()) {
        Some("serve") => {
            let port = raw_args
                .get(2)
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(8080);
            if let Err(e) = compound::api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Some("project") => match compound::api::run_cli(&raw_args[1..]) {
            Ok(json) => println!("{json}"),
            Err(Error::Cli(e)) => e.exit(),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        },
        _ => {
            eprintln!("Usage: compound serve [port]");
            eprintln!("       compound project [--initial-value X] [--monthly-contribution X] [--annual-rate X] [--period-months N] [--pretty]");
            std::process::exit(1);
        }
    }
}

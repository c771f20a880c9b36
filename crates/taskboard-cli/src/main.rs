use std::ffi::OsString;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Vec<OsString> = std::env::args_os().collect();
    if let Err(err) = taskboard_cli::run(args).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

// 2025 Thomas Bicanic – MIT License
//
// Vektoraddition C = A + B auf dem ersten OpenCL-Gerät

use cl_demos::{simple_add, ClError, ComputeEnv};
use std::process::ExitCode;

#[cfg(feature = "metrics")]
use cl_demos::summary;

fn run() -> Result<(), ClError> {
    /* ---------- 1. OpenCL-Setup ---------------------------------- */
    let env = ComputeEnv::discover()?;
    for name in env.platforms() {
        println!("Got '{name}' platform");
    }
    for name in env.devices() {
        println!("Got '{name}' device");
    }
    println!("Using device: {}", env.device_name());

    /* ---------- 2. Kernel ausführen ------------------------------ */
    let c = simple_add::run(&env, &simple_add::A, &simple_add::B)?;

    /* ---------- 3. Ausgabe --------------------------------------- */
    println!(" result: ");
    let line: Vec<String> = c.iter().map(i32::to_string).collect();
    println!("{} ", line.join(" "));

    #[cfg(feature = "metrics")]
    summary();

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(" {e}");
            ExitCode::FAILURE
        }
    }
}

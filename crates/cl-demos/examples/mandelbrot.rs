// 2025 Thomas Bicanic – MIT License
//
// Mandelbrot-Menge auf dem ersten OpenCL-Gerät, Ausgabe als mandelbrot.ppm

use cl_demos::{
    mandelbrot::{self, OUTPUT_FILE},
    ppm, ClError, ComputeEnv, MandelbrotConfig,
};
use std::process::ExitCode;

#[cfg(feature = "metrics")]
use cl_demos::summary;

fn run() -> Result<(), ClError> {
    let cfg = MandelbrotConfig::default();

    /* ---------- 1. OpenCL-Setup ---------------------------------- */
    let env = ComputeEnv::discover()?;
    for name in env.platforms() {
        println!("Got '{name}' platform");
    }
    for name in env.devices() {
        println!("Got '{name}' device");
    }
    println!("Using device: {}", env.device_name());

    /* ---------- 2. Rendern --------------------------------------- */
    let image = mandelbrot::render(&env, &cfg)?;

    /* ---------- 3. Bild schreiben -------------------------------- */
    ppm::save_ppm(OUTPUT_FILE, cfg.width, cfg.height, &image)?;
    println!("\nwrote output image to '{OUTPUT_FILE}'");

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

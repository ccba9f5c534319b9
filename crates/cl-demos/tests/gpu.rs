//! Device-backed tests. Each one is skipped when no OpenCL platform or
//! device is available on the machine running the suite.

use cl_demos::{
    build_kernel, enqueue_kernel,
    kernels::{SIMPLE_ADD, SIMPLE_ADD_SRC},
    mandelbrot::{self, escape_time},
    simple_add, ClError, ComputeEnv, GpuBuffer, MandelbrotConfig, Queued,
};

fn env_or_skip() -> Option<ComputeEnv> {
    match ComputeEnv::discover() {
        Ok(env) => Some(env),
        Err(e) => {
            eprintln!("skipping device test: {e}");
            None
        }
    }
}

#[test]
fn discovery_selects_first_device() {
    let Some(env) = env_or_skip() else { return };
    assert!(!env.platforms().is_empty());
    assert!(!env.devices().is_empty());
    assert_eq!(env.device_name(), env.devices()[0]);
}

#[test]
fn simple_add_on_device() {
    let Some(env) = env_or_skip() else { return };
    let c = simple_add::run(&env, &simple_add::A, &simple_add::B).unwrap();
    assert_eq!(c, vec![0, 2, 4, 3, 5, 7, 6, 8, 10, 9]);
}

#[test]
fn simple_add_matches_reference_on_larger_input() {
    let Some(env) = env_or_skip() else { return };
    let a: Vec<i32> = (0..4096).map(|i| i * 3 - 7).collect();
    let b: Vec<i32> = (0..4096).map(|i| 100 - i).collect();
    let c = simple_add::run(&env, &a, &b).unwrap();
    assert_eq!(c, simple_add::add_reference(&a, &b).unwrap());
}

#[test]
fn simple_add_rejects_mismatched_inputs() {
    let Some(env) = env_or_skip() else { return };
    let err = simple_add::run(&env, &[1, 2], &[1]).unwrap_err();
    assert!(matches!(err, ClError::SizeMismatch { .. }));
}

#[test]
fn mandelbrot_matches_reference_at_corner_and_center() {
    let Some(env) = env_or_skip() else { return };
    let cfg = MandelbrotConfig::default();
    let img = mandelbrot::render(&env, &cfg).unwrap();
    assert_eq!(img.len(), cfg.pixel_count());

    for (i, j) in [(0, 0), (cfg.width / 2, cfg.height / 2)] {
        let (x, y) = cfg.point(i, j);
        assert_eq!(img[j * cfg.width + i], escape_time(x, y, cfg.max_iters), "pixel ({i}, {j})");
    }
}

#[test]
fn mandelbrot_small_image_matches_reference() {
    let Some(env) = env_or_skip() else { return };
    let cfg = MandelbrotConfig { width: 96, height: 64, max_iters: 64, ..Default::default() };
    let gpu = mandelbrot::render(&env, &cfg).unwrap();
    let cpu = mandelbrot::render_reference(&cfg).unwrap();
    assert_eq!(gpu, cpu);
}

#[test]
fn broken_kernel_reports_build_log() {
    let Some(env) = env_or_skip() else { return };
    let Err(err) = build_kernel(&env, "kernel void oops(global int* x) { x[0] = ; }", "oops") else {
        panic!("broken source compiled");
    };
    assert!(matches!(err, ClError::Build(_)));
    assert!(err.to_string().starts_with("Error building: "));
}

#[test]
fn buffer_states_enforce_lengths() {
    let Some(env) = env_or_skip() else { return };

    let err = GpuBuffer::<i32, Queued>::new(env.context(), 0).unwrap_err();
    assert!(matches!(err, ClError::InvalidSize(0)));

    let buf = GpuBuffer::<i32, Queued>::new(env.context(), 4).unwrap();
    assert_eq!(buf.byte_len(), 16);
    let err = buf.upload(env.queue(), &[1, 2, 3]).unwrap_err();
    assert!(matches!(err, ClError::SizeMismatch { expected: 4, actual: 3 }));

    let ready = GpuBuffer::<i32, Queued>::from_slice(env.context(), env.queue(), &[5, 6, 7, 8]).unwrap();
    let mut short = [0_i32; 2];
    assert!(ready.read_into(env.queue(), &mut short).is_err());
    assert_eq!(ready.download(env.queue()).unwrap(), vec![5, 6, 7, 8]);
}

#[test]
fn invalid_work_sizes_are_rejected() {
    let Some(env) = env_or_skip() else { return };
    let kernel = build_kernel(&env, SIMPLE_ADD_SRC, SIMPLE_ADD).unwrap();
    for global in [&[][..], &[0][..], &[1, 1, 1, 1][..]] {
        let Err(err) = enqueue_kernel(env.queue(), &kernel, global) else {
            panic!("work size {global:?} accepted");
        };
        assert!(matches!(err, ClError::InvalidWorkSize(_)));
    }
}

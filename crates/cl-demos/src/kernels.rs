//! OpenCL C sources, embedded at compile time.

pub const SIMPLE_ADD_SRC: &str = include_str!("../kernels/simple_add.cl");
pub const SIMPLE_ADD: &str = "simple_add";

pub const MANDELBROT_SRC: &str = include_str!("../kernels/mandelbrot.cl");
pub const MANDELBROT: &str = "mandelbrot";
